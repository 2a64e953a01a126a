use platform_engine::input::InputManager;

use super::{steer_from_input, PlayerContext, PlayerState, StateBehavior};

/// Airborne and descending; steerable until landing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FallState;

impl StateBehavior for FallState {
    fn enter(&mut self, player: &mut PlayerContext<'_>) {
        player.play_animation("fall");
    }

    fn handle_input(&mut self, player: &mut PlayerContext<'_>, input: &InputManager) -> Option<PlayerState> {
        steer_from_input(player, input);
        None
    }

    fn update(&mut self, _delta_time: f32, player: &mut PlayerContext<'_>) -> Option<PlayerState> {
        player.clamp_horizontal_speed();
        player.is_grounded().then(|| player.landing_state())
    }
}
