//! Rendering front end
//!
//! The engine does not talk to a graphics API. Capabilities push
//! [`DrawCommand`]s into the [`RenderQueue`] during the render pass, and the
//! application drains the queue into whatever backend it owns.

pub mod camera;
pub mod render_queue;

pub use camera::Camera;
pub use render_queue::{DrawCommand, RenderQueue, SpriteDraw};
