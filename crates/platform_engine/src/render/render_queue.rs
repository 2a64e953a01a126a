//! # Render Queue
//!
//! Collects draw commands for one frame. Commands are sorted by layer when
//! drained, keeping submission order within a layer.

use crate::foundation::math::Vec2;

/// One sprite frame to draw, in screen space
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteDraw {
    /// Texture identifier
    pub texture_id: String,
    /// Frame index on the texture
    pub frame: u32,
    /// Screen position of the top-left corner
    pub position: Vec2,
    /// Size on screen
    pub size: Vec2,
    /// Rotation in degrees
    pub rotation: f32,
    /// Mirror horizontally
    pub flipped: bool,
    /// Draw layer; higher draws on top
    pub layer: i32,
}

/// Rendering instruction
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Draw a sprite frame
    Sprite(SpriteDraw),
}

impl DrawCommand {
    /// Layer used for ordering
    pub const fn layer(&self) -> i32 {
        match self {
            Self::Sprite(sprite) => sprite.layer,
        }
    }
}

/// Per-frame list of draw commands
#[derive(Debug, Default)]
pub struct RenderQueue {
    commands: Vec<DrawCommand>,
}

impl RenderQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Number of queued commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True when nothing is queued
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Queued commands in submission order
    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    /// Take every command, ordered by layer, leaving the queue empty
    pub fn drain_sorted(&mut self) -> Vec<DrawCommand> {
        let mut commands = std::mem::take(&mut self.commands);
        commands.sort_by_key(DrawCommand::layer);
        commands
    }

    /// Drop every queued command
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}
