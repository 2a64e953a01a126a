//! Component trait
//!
//! Components are capabilities attached to a [`GameObject`]. At most one
//! component of each concrete type lives on an object. Every lifecycle hook
//! receives the owning object (with the called component temporarily taken
//! out of it) and the frame context, so a component reaches its siblings
//! through `owner.get_mut::<T>()` instead of holding references to them.
//!
//! Lifecycle:
//!
//! 1. `init` runs once, when the object is live in a scene and every
//!    component attached in the same batch is present.
//! 2. `handle_input`, `update` and `render` run every frame in attach order.
//! 3. `clean` runs exactly once, when the component is replaced, detached or
//!    its object is removed from the scene.

use std::any::Any;

use crate::core::context::FrameContext;

use super::GameObject;

/// Type-erased access used to downcast stored components
pub trait AsAny: Any {
    /// Borrow as `Any`
    fn as_any(&self) -> &dyn Any;
    /// Mutably borrow as `Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Type name for diagnostics
    fn type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Capability attached to a game object
#[allow(unused_variables)]
pub trait Component: AsAny {
    /// Called once after the owner is live and the attach batch is complete.
    ///
    /// Required siblings should be checked here; a component missing them
    /// logs an error and stays inert.
    fn init(&mut self, owner: &mut GameObject, ctx: &mut FrameContext<'_>) {}

    /// Input pass
    fn handle_input(&mut self, owner: &mut GameObject, ctx: &mut FrameContext<'_>) {}

    /// Update pass, after physics integration and the camera
    fn update(&mut self, delta_time: f32, owner: &mut GameObject, ctx: &mut FrameContext<'_>) {}

    /// Render pass; pushes draw commands to `ctx.render_queue`
    fn render(&self, owner: &GameObject, ctx: &mut FrameContext<'_>) {}

    /// Release anything registered with engine subsystems
    fn clean(&mut self, owner: &mut GameObject, ctx: &mut FrameContext<'_>) {}
}
