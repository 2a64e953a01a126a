//! Frame context
//!
//! [`Context`] owns the collaborators that outlive any single scene: input,
//! camera and the render queue. Each scene owns its physics integrator and
//! its structural command buffer. A scene splices both into a
//! [`FrameContext`] for the duration of a pass, and every component hook
//! receives that.

use crate::core::config::EngineConfig;
use crate::input::InputManager;
use crate::physics::PhysicsEngine;
use crate::render::{Camera, RenderQueue};
use crate::scene::SceneCommands;

/// Application-owned collaborators
#[derive(Debug)]
pub struct Context {
    /// Action states for this frame
    pub input: InputManager,
    /// View into the world
    pub camera: Camera,
    /// Draw commands produced by the render pass
    pub render_queue: RenderQueue,
}

impl Context {
    /// Build the context from configuration
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            input: InputManager::from_mappings(&config.input_mappings),
            camera: Camera::from_config(config.window.viewport(), &config.camera),
            render_queue: RenderQueue::new(),
        }
    }

    /// Borrow everything a pass needs, together with a scene's own parts
    pub fn frame<'a>(
        &'a mut self,
        physics: &'a mut PhysicsEngine,
        commands: &'a mut SceneCommands,
    ) -> FrameContext<'a> {
        FrameContext {
            input: &self.input,
            camera: &mut self.camera,
            render_queue: &mut self.render_queue,
            physics,
            commands,
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

/// Everything a component hook may touch during one pass
pub struct FrameContext<'a> {
    /// Action states; read-only while scenes run
    pub input: &'a InputManager,
    /// Camera
    pub camera: &'a mut Camera,
    /// Draw command sink
    pub render_queue: &'a mut RenderQueue,
    /// The current scene's integrator
    pub physics: &'a mut PhysicsEngine,
    /// Deferred spawns and removals for the current scene
    pub commands: &'a mut SceneCommands,
}
