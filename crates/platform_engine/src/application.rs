//! Application trait and lifecycle management

use thiserror::Error;

use crate::config::ConfigError;
use crate::engine::{Engine, EngineError};
use crate::input::KeyCode;

/// Application lifecycle trait
///
/// Implement this trait to drive a game with the engine loop. Per frame the
/// engine calls, in order: [`poll_input`](Self::poll_input), the scene input
/// and update passes, [`update`](Self::update), the scene render pass and
/// [`render`](Self::render).
pub trait Application {
    /// Initialize the application
    ///
    /// Called once before the first frame. Build and push the first scene
    /// here.
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Feed platform events for this frame
    ///
    /// Called after the input manager advanced its edge states and before
    /// the scenes read them.
    fn poll_input(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let _ = engine;
        Ok(())
    }

    /// Game logic that runs after the scene update pass
    ///
    /// # Arguments
    /// * `engine` - Mutable reference to the engine
    /// * `delta_time` - Time since last frame in seconds
    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError>;

    /// Submit the frame's draw commands
    ///
    /// The default implementation discards them.
    fn render(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        engine.context.render_queue.clear();
        Ok(())
    }

    /// Cleanup the application
    ///
    /// Called once after the loop ends, before the scenes are cleaned.
    fn cleanup(&mut self, engine: &mut Engine);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),

    /// Game logic error
    #[error("Game logic error: {0}")]
    GameLogic(String),
}

/// Platform events fed to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Key input event
    KeyInput {
        /// The key that was pressed/released
        key: KeyCode,
        /// Whether the key was pressed (true) or released (false)
        pressed: bool,
    },

    /// Window lost focus; every held action is released
    FocusLost,

    /// Window close requested
    CloseRequested,
}
