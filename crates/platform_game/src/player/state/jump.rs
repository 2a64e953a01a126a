use platform_engine::input::InputManager;

use super::{steer_from_input, PlayerContext, PlayerState, StateBehavior};

/// Rising after a jump; steerable in the air
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JumpState;

impl StateBehavior for JumpState {
    fn enter(&mut self, player: &mut PlayerContext<'_>) {
        player.play_animation("jump");
        let mut velocity = player.velocity();
        velocity.y = -player.tuning().jump_velocity;
        player.set_velocity(velocity);
    }

    fn handle_input(&mut self, player: &mut PlayerContext<'_>, input: &InputManager) -> Option<PlayerState> {
        steer_from_input(player, input);
        None
    }

    fn update(&mut self, _delta_time: f32, player: &mut PlayerContext<'_>) -> Option<PlayerState> {
        player.clamp_horizontal_speed();
        if player.velocity().y >= 0.0 {
            Some(PlayerState::fall())
        } else {
            None
        }
    }
}
