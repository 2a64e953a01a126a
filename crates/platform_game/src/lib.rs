//! # Platform Game
//!
//! Gameplay capabilities for a side-scrolling platformer:
//!
//! - [`player::PlayerComponent`]: the player's finite-state machine
//!   (idle, walk, jump, fall, hurt, dead)
//! - [`ai::AiComponent`]: enemy behaviors (patrol, jump patrol, up-down)
//! - [`factory`]: builders for the player and enemy objects
//! - [`config::GameConfig`]: tuning loaded from TOML or RON

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod ai;
pub mod config;
pub mod factory;
pub mod player;

pub use ai::{AiBehavior, AiComponent};
pub use config::{EnemyConfig, GameConfig, PlayerConfig};
pub use player::{PlayerComponent, PlayerState, PlayerStateKind, PlayerTuning};

/// Input action names the game reads
pub mod actions {
    /// Move left while held
    pub const MOVE_LEFT: &str = "move_left";
    /// Move right while held
    pub const MOVE_RIGHT: &str = "move_right";
    /// Jump on press
    pub const JUMP: &str = "jump";
}
