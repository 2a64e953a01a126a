use platform_engine::input::InputManager;

use crate::actions;

use super::{steer_from_input, PlayerContext, PlayerState, StateBehavior};

/// Walking on the ground under input force
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WalkState;

impl StateBehavior for WalkState {
    fn enter(&mut self, player: &mut PlayerContext<'_>) {
        player.play_animation("walk");
    }

    fn handle_input(&mut self, player: &mut PlayerContext<'_>, input: &InputManager) -> Option<PlayerState> {
        if input.is_action_pressed(actions::JUMP) {
            return Some(PlayerState::jump());
        }
        match steer_from_input(player, input) {
            Some(_) => None,
            None => Some(PlayerState::idle()),
        }
    }

    fn update(&mut self, _delta_time: f32, player: &mut PlayerContext<'_>) -> Option<PlayerState> {
        player.clamp_horizontal_speed();
        if player.is_grounded() {
            None
        } else {
            Some(PlayerState::fall())
        }
    }
}
