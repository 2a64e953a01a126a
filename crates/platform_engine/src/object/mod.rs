//! Game objects and their capabilities
//!
//! A [`GameObject`] is a named bag of [`Component`]s keyed by concrete type.
//! Objects live in a [`Scene`](crate::scene::Scene) arena and are referred to
//! by [`ObjectId`] handles, which go stale instead of dangling once the object
//! is removed.

pub mod component;
pub mod components;
pub mod game_object;

pub use component::{AsAny, Component};
pub use game_object::{GameObject, ObjectId};
