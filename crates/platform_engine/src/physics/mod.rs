//! Physics module
//!
//! Semi-implicit Euler integration for registered bodies, followed by an
//! optional pluggable collision pass. Collision detection itself lives
//! outside the engine; it reports contacts by setting
//! [`CollisionFlags`](crate::object::components::CollisionFlags).

pub mod physics_engine;

pub use physics_engine::{CollisionResolver, PhysicsEngine};
