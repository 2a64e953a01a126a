use platform_engine::foundation::math::Vec2;

use super::{PlayerContext, StateBehavior};

/// Terminal state: pops upward and drops through the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeadState;

impl StateBehavior for DeadState {
    fn enter(&mut self, player: &mut PlayerContext<'_>) {
        player.play_animation("hurt");
        let knockback = player.tuning().death_knockback;
        player.set_velocity(Vec2::new(0.0, -knockback));
        player.set_collision_active(false);
    }
}
