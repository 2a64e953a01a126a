//! Physics component
//!
//! A dynamic body: velocity, accumulated force, mass and the collision flags
//! written by the external collision system. Integration happens in
//! [`PhysicsEngine`](crate::physics::PhysicsEngine); this component only
//! registers itself there on init and unregisters on clean.

use bitflags::bitflags;

use crate::core::context::FrameContext;
use crate::foundation::math::Vec2;
use crate::object::{Component, GameObject};

use super::TransformComponent;

bitflags! {
    /// Sides on which the body touched solid geometry this frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CollisionFlags: u8 {
        /// Blocked on the left
        const LEFT = 1 << 0;
        /// Blocked on the right
        const RIGHT = 1 << 1;
        /// Blocked above (head bump)
        const ABOVE = 1 << 2;
        /// Standing on something
        const BELOW = 1 << 3;
    }
}

/// Dynamic body integrated by the physics engine
#[derive(Debug, Clone)]
pub struct PhysicsComponent {
    /// Velocity in pixels per second
    pub velocity: Vec2,
    force: Vec2,
    mass: f32,
    use_gravity: bool,
    enabled: bool,
    collisions: CollisionFlags,
}

impl Default for PhysicsComponent {
    fn default() -> Self {
        Self::new(true, 1.0)
    }
}

impl PhysicsComponent {
    /// Create a body; a non-positive mass is corrected to 1
    pub fn new(use_gravity: bool, mass: f32) -> Self {
        let mut body = Self {
            velocity: Vec2::zeros(),
            force: Vec2::zeros(),
            mass: 1.0,
            use_gravity,
            enabled: true,
            collisions: CollisionFlags::empty(),
        };
        body.set_mass(mass);
        body
    }

    /// Accumulate a force for the next integration step; ignored while disabled
    pub fn add_force(&mut self, force: Vec2) {
        if self.enabled {
            self.force += force;
        }
    }

    /// Force accumulated since the last integration
    pub const fn force(&self) -> Vec2 {
        self.force
    }

    /// Drop the accumulated force
    pub fn clear_force(&mut self) {
        self.force = Vec2::zeros();
    }

    /// Mass, always positive
    pub const fn mass(&self) -> f32 {
        self.mass
    }

    /// Set the mass; non-positive or non-finite values become 1
    pub fn set_mass(&mut self, mass: f32) {
        if mass.is_finite() && mass > 0.0 {
            self.mass = mass;
        } else {
            log::warn!("Invalid mass {mass}, using 1.0");
            self.mass = 1.0;
        }
    }

    /// Set the velocity
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Whether gravity applies to this body
    pub const fn uses_gravity(&self) -> bool {
        self.use_gravity
    }

    /// Enable or disable gravity
    pub fn set_use_gravity(&mut self, use_gravity: bool) {
        self.use_gravity = use_gravity;
    }

    /// Whether the integrator moves this body
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable integration
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Collision flags for this frame
    pub fn collision_flags(&self) -> CollisionFlags {
        self.collisions
    }

    /// Replace the collision flags (collision system)
    pub fn set_collision_flags(&mut self, flags: CollisionFlags) {
        self.collisions = flags;
    }

    /// Set or clear individual flags (collision system)
    pub fn set_collided(&mut self, flags: CollisionFlags, value: bool) {
        self.collisions.set(flags, value);
    }

    /// Clear all flags before the collision system runs
    pub fn reset_collision_flags(&mut self) {
        self.collisions = CollisionFlags::empty();
    }

    /// Blocked on the left this frame
    pub fn has_collided_left(&self) -> bool {
        self.collisions.contains(CollisionFlags::LEFT)
    }

    /// Blocked on the right this frame
    pub fn has_collided_right(&self) -> bool {
        self.collisions.contains(CollisionFlags::RIGHT)
    }

    /// Blocked above this frame
    pub fn has_collided_above(&self) -> bool {
        self.collisions.contains(CollisionFlags::ABOVE)
    }

    /// Standing on something this frame
    pub fn has_collided_below(&self) -> bool {
        self.collisions.contains(CollisionFlags::BELOW)
    }
}

impl Component for PhysicsComponent {
    fn init(&mut self, owner: &mut GameObject, ctx: &mut FrameContext<'_>) {
        if !owner.has::<TransformComponent>() {
            log::warn!(
                "'{}' has physics but no transform; velocity will not move it",
                owner.name()
            );
        }
        ctx.physics.register(owner.id());
    }

    fn clean(&mut self, owner: &mut GameObject, ctx: &mut FrameContext<'_>) {
        ctx.physics.unregister(owner.id());
    }
}
