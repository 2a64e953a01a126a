//! Scene management
//!
//! - [`Scene`]: owns game objects and runs the per-frame pipeline
//! - [`SceneCommands`]: deferred structural changes requested from inside a pass
//! - [`SceneManager`]: stack of scenes with deferred push/pop/replace

pub mod commands;
pub mod scene;
pub mod scene_manager;

pub use commands::SceneCommands;
pub use scene::Scene;
pub use scene_manager::SceneManager;
