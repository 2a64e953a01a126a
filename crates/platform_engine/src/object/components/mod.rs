//! Built-in capabilities
//!
//! - [`TransformComponent`]: position, scale, rotation
//! - [`SpriteComponent`]: textured quad drawn at the transform
//! - [`PhysicsComponent`]: velocity/force body registered with the integrator
//! - [`ColliderComponent`]: collision box read by the external collision system
//! - [`AnimationComponent`]: named frame animations driving the sprite
//! - [`HealthComponent`]: hit points with post-hit invincibility

pub mod animation;
pub mod collider;
pub mod health;
pub mod physics;
pub mod sprite;
pub mod transform;

pub use animation::{Animation, AnimationComponent};
pub use collider::ColliderComponent;
pub use health::HealthComponent;
pub use physics::{CollisionFlags, PhysicsComponent};
pub use sprite::SpriteComponent;
pub use transform::TransformComponent;
