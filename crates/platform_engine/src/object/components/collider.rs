//! Collider component
//!
//! Describes the box the external collision system tests against. Contacts
//! are reported back through [`CollisionFlags`](super::CollisionFlags) on
//! the physics component; this type holds no contact state itself.

use crate::core::context::FrameContext;
use crate::foundation::math::{Alignment, Rect, Vec2};
use crate::object::{Component, GameObject};

use super::TransformComponent;

/// Axis-aligned collision box anchored to the owner's position
#[derive(Debug, Clone)]
pub struct ColliderComponent {
    size: Vec2,
    alignment: Alignment,
    offset: Vec2,
    scale: Vec2,
    trigger: bool,
    active: bool,
    inert: bool,
}

impl ColliderComponent {
    /// Create a solid collider of the given unscaled size
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            alignment: Alignment::TopLeft,
            offset: Vec2::zeros(),
            scale: Vec2::new(1.0, 1.0),
            trigger: false,
            active: true,
            inert: false,
        }
    }

    /// Set the anchor alignment
    #[must_use]
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self.update_offset(self.scale);
        self
    }

    /// Make this a trigger: overlaps are reported but never block movement
    #[must_use]
    pub const fn as_trigger(mut self) -> Self {
        self.trigger = true;
        self
    }

    /// Recompute the anchor offset for a transform scale
    pub fn update_offset(&mut self, scale: Vec2) {
        self.scale = scale;
        self.offset = self.alignment.offset(self.scaled_size());
    }

    /// Size after scaling
    pub fn scaled_size(&self) -> Vec2 {
        self.size.component_mul(&self.scale)
    }

    /// Offset from the owner's position to the box's top-left corner
    pub const fn offset(&self) -> Vec2 {
        self.offset
    }

    /// World-space box for an owner position
    pub fn bounds_at(&self, position: Vec2) -> Rect {
        Rect::new(position + self.offset, self.scaled_size())
    }

    /// World-space box using the owner's transform
    pub fn world_bounds(&self, owner: &GameObject) -> Option<Rect> {
        owner
            .get::<TransformComponent>()
            .map(|transform| self.bounds_at(transform.position))
    }

    /// Whether this is a trigger
    pub const fn is_trigger(&self) -> bool {
        self.trigger
    }

    /// Whether the collision system should consider this collider
    pub const fn is_active(&self) -> bool {
        self.active && !self.inert
    }

    /// Enable or disable collision response
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl Component for ColliderComponent {
    fn init(&mut self, owner: &mut GameObject, _ctx: &mut FrameContext<'_>) {
        let Some(transform) = owner.get::<TransformComponent>() else {
            log::error!("Collider on '{}' requires a transform", owner.name());
            self.inert = true;
            return;
        };
        self.update_offset(transform.scale());
    }
}
