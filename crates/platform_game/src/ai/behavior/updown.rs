use platform_engine::object::components::{PhysicsComponent, TransformComponent};
use platform_engine::object::GameObject;

use super::{ordered_bounds, play, resolve, Behavior};

/// Flies between `min_y` (top) and `max_y` (bottom) with gravity off
#[derive(Debug, Clone, PartialEq)]
pub struct UpDownBehavior {
    min_y: f32,
    max_y: f32,
    speed: f32,
    moving_down: bool,
}

impl UpDownBehavior {
    /// Fly within `[min_y, max_y]` at `speed`, starting upward
    pub fn new(min_y: f32, max_y: f32, speed: f32) -> Self {
        let (min_y, max_y) = ordered_bounds("UpDown", min_y, max_y);
        Self {
            min_y,
            max_y,
            speed: speed.abs(),
            moving_down: false,
        }
    }

    /// Current heading
    pub const fn is_moving_down(&self) -> bool {
        self.moving_down
    }

    /// Flight bounds
    pub const fn bounds(&self) -> (f32, f32) {
        (self.min_y, self.max_y)
    }
}

impl Behavior for UpDownBehavior {
    fn enter(&mut self, agent: &mut GameObject) {
        play(agent, "fly");
        if let Some(body) = agent.get_mut::<PhysicsComponent>() {
            body.set_use_gravity(false);
        }
    }

    fn update(&mut self, _delta_time: f32, agent: &mut GameObject) {
        if !resolve(agent, "UpDown", false, false) {
            return;
        }
        let Some(y) = agent.get::<TransformComponent>().map(|transform| transform.position.y) else {
            return;
        };
        let Some(body) = agent.get_mut::<PhysicsComponent>() else {
            return;
        };

        if body.has_collided_above() || y <= self.min_y {
            self.moving_down = true;
        } else if body.has_collided_below() || y >= self.max_y {
            self.moving_down = false;
        }
        body.velocity.y = if self.moving_down { self.speed } else { -self.speed };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform_engine::foundation::math::Vec2;

    fn eagle_at(y: f32) -> GameObject {
        GameObject::new("eagle")
            .with(TransformComponent::from_position(Vec2::new(0.0, y)))
            .with(PhysicsComponent::new(true, 1.0))
    }

    #[test]
    fn test_enter_disables_gravity() {
        let mut eagle = eagle_at(50.0);
        UpDownBehavior::new(0.0, 100.0, 40.0).enter(&mut eagle);
        assert!(!eagle.get::<PhysicsComponent>().unwrap().uses_gravity());
    }

    #[test]
    fn test_turns_at_both_bounds() {
        let mut eagle = eagle_at(0.0);
        let mut updown = UpDownBehavior::new(0.0, 100.0, 40.0);

        updown.update(0.016, &mut eagle);
        assert!(updown.is_moving_down());
        assert_eq!(eagle.get::<PhysicsComponent>().unwrap().velocity.y, 40.0);

        eagle.get_mut::<TransformComponent>().unwrap().position.y = 100.0;
        updown.update(0.016, &mut eagle);
        assert!(!updown.is_moving_down());
        assert_eq!(eagle.get::<PhysicsComponent>().unwrap().velocity.y, -40.0);
    }
}
