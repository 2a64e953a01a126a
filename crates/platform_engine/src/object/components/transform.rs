//! Transform component
//!
//! Position is in world pixels with y growing downward. Scale is kept
//! private: changing it must also move the anchor offsets of the sprite and
//! collider, so it goes through [`TransformComponent::apply_scale`].

use crate::foundation::math::Vec2;
use crate::object::{Component, GameObject};

use super::{ColliderComponent, SpriteComponent};

/// World-space placement of an object
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// World position
    pub position: Vec2,
    /// Rotation in degrees, clockwise
    pub rotation: f32,
    scale: Vec2,
}

impl Component for TransformComponent {}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl TransformComponent {
    /// Create from position only
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Set the initial scale (builder style, before the object is live)
    #[must_use]
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Current scale
    pub const fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Move by an offset
    pub fn translate(&mut self, offset: Vec2) {
        self.position += offset;
    }

    /// Change the owner's scale and refresh every scale-dependent sibling.
    ///
    /// Returns false if the owner has no transform.
    pub fn apply_scale(owner: &mut GameObject, scale: Vec2) -> bool {
        let Some(transform) = owner.get_mut::<Self>() else {
            log::warn!("Cannot scale '{}': no transform", owner.name());
            return false;
        };
        transform.scale = scale;

        if let Some(sprite) = owner.get_mut::<SpriteComponent>() {
            sprite.update_offset(scale);
        }
        if let Some(collider) = owner.get_mut::<ColliderComponent>() {
            collider.update_offset(scale);
        }
        true
    }
}
