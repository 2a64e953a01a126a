//! Stand-in collision system: a flat floor between two walls.
//!
//! Pushes colliders out of the floor and walls and raises the matching
//! collision flags, which is all the player states and enemy behaviors
//! consume.

use platform_engine::foundation::math::{Rect, Vec2};
use platform_engine::object::components::{
    ColliderComponent, CollisionFlags, PhysicsComponent, TransformComponent,
};
use platform_engine::object::GameObject;
use platform_engine::physics::CollisionResolver;

/// Floor height and wall positions in world pixels
#[derive(Debug, Clone, Copy)]
pub struct FlatWorld {
    /// Top of the floor
    pub floor: f32,
    /// Inner face of the left wall
    pub left_wall: f32,
    /// Inner face of the right wall
    pub right_wall: f32,
}

impl FlatWorld {
    /// Playable area
    pub fn bounds(&self) -> Rect {
        Rect::new(
            Vec2::new(self.left_wall, 0.0),
            Vec2::new(self.right_wall - self.left_wall, self.floor),
        )
    }

    fn push_out(&self, bounds: Rect) -> (Vec2, CollisionFlags) {
        let mut correction = Vec2::zeros();
        let mut flags = CollisionFlags::empty();

        if bounds.bottom() >= self.floor {
            correction.y = self.floor - bounds.bottom();
            flags |= CollisionFlags::BELOW;
        }
        if bounds.left() <= self.left_wall {
            correction.x = self.left_wall - bounds.left();
            flags |= CollisionFlags::LEFT;
        } else if bounds.right() >= self.right_wall {
            correction.x = self.right_wall - bounds.right();
            flags |= CollisionFlags::RIGHT;
        }
        (correction, flags)
    }
}

impl CollisionResolver for FlatWorld {
    fn resolve(&mut self, object: &mut GameObject) {
        let Some(bounds) = object
            .get::<ColliderComponent>()
            .filter(|collider| collider.is_active())
            .and_then(|collider| collider.world_bounds(object))
        else {
            return;
        };

        let (correction, flags) = self.push_out(bounds);
        if flags.is_empty() {
            return;
        }

        if let Some(transform) = object.get_mut::<TransformComponent>() {
            transform.translate(correction);
        }
        if let Some(body) = object.get_mut::<PhysicsComponent>() {
            if flags.contains(CollisionFlags::BELOW) {
                body.velocity.y = body.velocity.y.min(0.0);
            }
            if flags.contains(CollisionFlags::LEFT) {
                body.velocity.x = body.velocity.x.max(0.0);
            }
            if flags.contains(CollisionFlags::RIGHT) {
                body.velocity.x = body.velocity.x.min(0.0);
            }
            body.set_collided(flags, true);
        }
    }
}
