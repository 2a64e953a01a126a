use platform_engine::foundation::math::Vec2;
use platform_engine::object::components::{PhysicsComponent, SpriteComponent, TransformComponent};
use platform_engine::object::GameObject;

use super::{ordered_bounds, play, resolve, Behavior};

/// Interval used when a non-positive one is given
pub const DEFAULT_JUMP_INTERVAL: f32 = 2.0;

/// Upward launch speed used when a zero one is given
pub const DEFAULT_JUMP_SPEED: f32 = 300.0;

/// Waits on the ground, then hops toward the current heading every
/// `interval` seconds. The heading flips when a bound or wall is reached.
#[derive(Debug, Clone, PartialEq)]
pub struct JumpBehavior {
    min_x: f32,
    max_x: f32,
    jump_velocity: Vec2,
    interval: f32,
    timer: f32,
    jumping_right: bool,
}

impl JumpBehavior {
    /// Hop within `[min_x, max_x]`.
    ///
    /// `jump_velocity.x` is the horizontal speed of a hop, `jump_velocity.y`
    /// its launch speed and must point up (negative y).
    pub fn new(min_x: f32, max_x: f32, jump_velocity: Vec2, interval: f32) -> Self {
        let (min_x, max_x) = ordered_bounds("Jump", min_x, max_x);

        let interval = if interval > 0.0 {
            interval
        } else {
            log::error!("Jump interval {interval} must be positive, using {DEFAULT_JUMP_INTERVAL}");
            DEFAULT_JUMP_INTERVAL
        };

        let mut jump_velocity = Vec2::new(jump_velocity.x.abs(), jump_velocity.y);
        if jump_velocity.y > 0.0 {
            log::error!("Jump launch speed {} points down, negating", jump_velocity.y);
            jump_velocity.y = -jump_velocity.y;
        } else if jump_velocity.y == 0.0 {
            log::error!("Jump launch speed is zero, using {DEFAULT_JUMP_SPEED}");
            jump_velocity.y = -DEFAULT_JUMP_SPEED;
        }

        Self {
            min_x,
            max_x,
            jump_velocity,
            interval,
            timer: 0.0,
            jumping_right: false,
        }
    }

    /// Current heading
    pub const fn is_jumping_right(&self) -> bool {
        self.jumping_right
    }

    /// Seconds spent waiting on the ground since the last hop
    pub const fn timer(&self) -> f32 {
        self.timer
    }

    /// Seconds between hops
    pub const fn interval(&self) -> f32 {
        self.interval
    }

    /// Launch velocity of a rightward hop
    pub const fn jump_velocity(&self) -> Vec2 {
        self.jump_velocity
    }

    fn update_heading(&mut self, x: f32, body: &PhysicsComponent) {
        if self.jumping_right && (body.has_collided_right() || x >= self.max_x) {
            self.jumping_right = false;
        } else if !self.jumping_right && (body.has_collided_left() || x <= self.min_x) {
            self.jumping_right = true;
        }
    }
}

impl Behavior for JumpBehavior {
    fn enter(&mut self, agent: &mut GameObject) {
        play(agent, "idle");
    }

    fn update(&mut self, delta_time: f32, agent: &mut GameObject) {
        if !resolve(agent, "Jump", true, true) {
            return;
        }
        let Some(x) = agent.get::<TransformComponent>().map(|transform| transform.position.x) else {
            return;
        };
        let Some(body) = agent.get_mut::<PhysicsComponent>() else {
            return;
        };

        if !body.has_collided_below() {
            let rising = body.velocity.y < 0.0;
            play(agent, if rising { "jump" } else { "fall" });
            return;
        }

        self.timer += delta_time;
        body.velocity.x = 0.0;
        if self.timer < self.interval {
            play(agent, "idle");
            return;
        }

        self.timer = 0.0;
        self.update_heading(x, body);
        let direction = if self.jumping_right { 1.0 } else { -1.0 };
        body.velocity = Vec2::new(direction * self.jump_velocity.x, self.jump_velocity.y);
        log::trace!("'{}' hops {}", agent.name(), if self.jumping_right { "right" } else { "left" });

        play(agent, "jump");
        if let Some(sprite) = agent.get_mut::<SpriteComponent>() {
            sprite.set_flipped(self.jumping_right);
        }
    }
}
