//! Sprite component
//!
//! Draws one frame of a texture at the owner's transform. The anchor offset
//! depends on the transform scale and is refreshed by
//! [`TransformComponent::apply_scale`].

use crate::core::context::FrameContext;
use crate::foundation::math::{Alignment, Vec2};
use crate::object::{Component, GameObject};
use crate::render::{DrawCommand, SpriteDraw};

use super::TransformComponent;

/// Textured quad anchored to the owner's position
#[derive(Debug, Clone)]
pub struct SpriteComponent {
    texture_id: String,
    frame_size: Vec2,
    frame: u32,
    alignment: Alignment,
    offset: Vec2,
    flipped: bool,
    visible: bool,
    layer: i32,
    parallax: Vec2,
    inert: bool,
}

impl SpriteComponent {
    /// Create a sprite for a texture with the given frame size
    pub fn new(texture_id: impl Into<String>, frame_size: Vec2) -> Self {
        Self {
            texture_id: texture_id.into(),
            frame_size,
            frame: 0,
            alignment: Alignment::TopLeft,
            offset: Vec2::zeros(),
            flipped: false,
            visible: true,
            layer: 0,
            parallax: Vec2::new(1.0, 1.0),
            inert: false,
        }
    }

    /// Set the anchor alignment
    #[must_use]
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self.update_offset(Vec2::new(1.0, 1.0));
        self
    }

    /// Set the draw layer; higher layers draw on top
    #[must_use]
    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    /// Set the scroll factor relative to the camera (background layers)
    #[must_use]
    pub fn with_parallax(mut self, parallax: Vec2) -> Self {
        self.parallax = parallax;
        self
    }

    /// Recompute the anchor offset for a transform scale
    pub fn update_offset(&mut self, scale: Vec2) {
        self.offset = self.alignment.offset(self.frame_size.component_mul(&scale));
    }

    /// Offset from the owner's position to the sprite's top-left corner
    pub const fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Texture identifier
    pub fn texture_id(&self) -> &str {
        &self.texture_id
    }

    /// Unscaled frame size
    pub const fn frame_size(&self) -> Vec2 {
        self.frame_size
    }

    /// Current frame index
    pub const fn frame(&self) -> u32 {
        self.frame
    }

    /// Select the frame to draw
    pub fn set_frame(&mut self, frame: u32) {
        self.frame = frame;
    }

    /// Whether the sprite is mirrored horizontally
    pub const fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Mirror the sprite horizontally
    pub fn set_flipped(&mut self, flipped: bool) {
        self.flipped = flipped;
    }

    /// Whether the sprite is drawn
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the sprite
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl Component for SpriteComponent {
    fn init(&mut self, owner: &mut GameObject, _ctx: &mut FrameContext<'_>) {
        let Some(transform) = owner.get::<TransformComponent>() else {
            log::error!("Sprite on '{}' requires a transform", owner.name());
            self.inert = true;
            return;
        };
        self.update_offset(transform.scale());
    }

    fn render(&self, owner: &GameObject, ctx: &mut FrameContext<'_>) {
        if self.inert || !self.visible {
            return;
        }
        let Some(transform) = owner.get::<TransformComponent>() else {
            return;
        };

        let world = transform.position + self.offset;
        ctx.render_queue.push(DrawCommand::Sprite(SpriteDraw {
            texture_id: self.texture_id.clone(),
            frame: self.frame,
            position: ctx.camera.world_to_screen_with_parallax(world, self.parallax),
            size: self.frame_size.component_mul(&transform.scale()),
            rotation: transform.rotation,
            flipped: self.flipped,
            layer: self.layer,
        }));
    }
}
