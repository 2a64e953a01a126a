//! # Platform Engine
//!
//! Runtime simulation core for 2D side-scrolling platform games.
//!
//! ## Features
//!
//! - **Capability objects**: game objects composed of typed components,
//!   looked up by type, with a settle-then-run lifecycle
//! - **Physics integration**: gravity, forces and a per-axis speed cap, with
//!   a pluggable collision pass that reports contacts as flags
//! - **Scenes**: arena-owned objects, an ordered frame pipeline and deferred
//!   structural changes that are safe to request mid-pass
//! - **Input actions**: named actions bound to keys by configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use platform_engine::prelude::*;
//!
//! struct MyGame;
//!
//! impl Application for MyGame {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         let mut scene = engine.create_scene("level-1");
//!         scene.add(
//!             GameObject::new("crate")
//!                 .with(TransformComponent::default())
//!                 .with(PhysicsComponent::default()),
//!             &mut engine.context,
//!         );
//!         engine.scenes.push(scene);
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, _engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     platform_engine::foundation::logging::init();
//!     Engine::run(EngineConfig::default(), &mut MyGame)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod core;
pub mod foundation;
pub mod input;
pub mod object;
pub mod physics;
pub mod render;
pub mod scene;

mod application;
mod engine;

pub use application::{AppError, AppEvent, Application};
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::{Config, ConfigError, Context, EngineConfig, FrameContext},
        foundation::math::{Alignment, Rect, Vec2},
        foundation::time::Timer,
        input::{ActionState, InputManager, KeyCode},
        object::components::{
            Animation, AnimationComponent, ColliderComponent, CollisionFlags, HealthComponent,
            PhysicsComponent, SpriteComponent, TransformComponent,
        },
        object::{Component, GameObject, ObjectId},
        physics::{CollisionResolver, PhysicsEngine},
        render::{Camera, DrawCommand, RenderQueue, SpriteDraw},
        scene::{Scene, SceneCommands, SceneManager},
        AppError, AppEvent, Application, Engine, EngineError,
    };
}
