use platform_engine::object::components::{PhysicsComponent, SpriteComponent, TransformComponent};
use platform_engine::object::GameObject;

use super::{ordered_bounds, play, resolve, Behavior};

/// Walks between `min_x` and `max_x`, turning at either bound or when a
/// wall is hit
#[derive(Debug, Clone, PartialEq)]
pub struct PatrolBehavior {
    min_x: f32,
    max_x: f32,
    speed: f32,
    moving_right: bool,
}

impl PatrolBehavior {
    /// Patrol `[min_x, max_x]` at `speed`, starting leftward
    pub fn new(min_x: f32, max_x: f32, speed: f32) -> Self {
        let (min_x, max_x) = ordered_bounds("Patrol", min_x, max_x);
        Self {
            min_x,
            max_x,
            speed: speed.abs(),
            moving_right: false,
        }
    }

    /// Start moving rightward instead
    #[must_use]
    pub const fn moving_right(mut self, moving_right: bool) -> Self {
        self.moving_right = moving_right;
        self
    }

    /// Current heading
    pub const fn is_moving_right(&self) -> bool {
        self.moving_right
    }

    /// Patrol bounds
    pub const fn bounds(&self) -> (f32, f32) {
        (self.min_x, self.max_x)
    }

    /// Walking speed
    pub const fn speed(&self) -> f32 {
        self.speed
    }
}

impl Behavior for PatrolBehavior {
    fn enter(&mut self, agent: &mut GameObject) {
        play(agent, "walk");
    }

    fn update(&mut self, _delta_time: f32, agent: &mut GameObject) {
        if !resolve(agent, "Patrol", true, false) {
            return;
        }
        let Some(x) = agent.get::<TransformComponent>().map(|transform| transform.position.x) else {
            return;
        };

        if let Some(body) = agent.get_mut::<PhysicsComponent>() {
            if body.has_collided_right() || x >= self.max_x {
                self.moving_right = false;
            } else if body.has_collided_left() || x <= self.min_x {
                self.moving_right = true;
            }
            body.velocity.x = if self.moving_right { self.speed } else { -self.speed };
        }

        // Enemy art faces left
        if let Some(sprite) = agent.get_mut::<SpriteComponent>() {
            sprite.set_flipped(self.moving_right);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform_engine::foundation::math::Vec2;
    use platform_engine::object::components::CollisionFlags;

    fn agent_at(x: f32) -> GameObject {
        GameObject::new("opossum")
            .with(TransformComponent::from_position(Vec2::new(x, 0.0)))
            .with(PhysicsComponent::new(true, 1.0))
            .with(SpriteComponent::new("opossum", Vec2::new(36.0, 28.0)))
    }

    #[test]
    fn test_turns_at_max_bound() {
        let mut agent = agent_at(100.0);
        let mut patrol = PatrolBehavior::new(0.0, 100.0, 50.0).moving_right(true);
        patrol.update(0.016, &mut agent);

        assert!(!patrol.is_moving_right());
        assert_eq!(agent.get::<PhysicsComponent>().unwrap().velocity.x, -50.0);
        assert!(!agent.get::<SpriteComponent>().unwrap().is_flipped());
    }

    #[test]
    fn test_turns_on_left_wall() {
        let mut agent = agent_at(50.0);
        agent
            .get_mut::<PhysicsComponent>()
            .unwrap()
            .set_collided(CollisionFlags::LEFT, true);
        let mut patrol = PatrolBehavior::new(0.0, 100.0, 50.0);
        patrol.update(0.016, &mut agent);

        assert!(patrol.is_moving_right());
        assert_eq!(agent.get::<PhysicsComponent>().unwrap().velocity.x, 50.0);
        assert!(agent.get::<SpriteComponent>().unwrap().is_flipped());
    }

    #[test]
    fn test_keeps_heading_inside_range() {
        let mut agent = agent_at(50.0);
        let mut patrol = PatrolBehavior::new(0.0, 100.0, 50.0);
        patrol.update(0.016, &mut agent);
        assert!(!patrol.is_moving_right());
        assert_eq!(agent.get::<PhysicsComponent>().unwrap().velocity.x, -50.0);
    }

    #[test]
    fn test_reversed_bounds_are_swapped() {
        let patrol = PatrolBehavior::new(100.0, 0.0, -50.0);
        assert_eq!(patrol.bounds(), (0.0, 100.0));
        assert_eq!(patrol.speed(), 50.0);
    }

    #[test]
    fn test_missing_sprite_is_a_no_op() {
        let mut agent = GameObject::new("ghost")
            .with(TransformComponent::from_position(Vec2::new(100.0, 0.0)))
            .with(PhysicsComponent::new(true, 1.0));
        let mut patrol = PatrolBehavior::new(0.0, 100.0, 50.0).moving_right(true);
        patrol.update(0.016, &mut agent);

        assert!(patrol.is_moving_right());
        assert_eq!(agent.get::<PhysicsComponent>().unwrap().velocity.x, 0.0);
    }
}
