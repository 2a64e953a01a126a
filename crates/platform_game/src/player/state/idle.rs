use platform_engine::input::InputManager;

use crate::actions;

use super::{move_intent, PlayerContext, PlayerState, StateBehavior};

/// Standing still; friction bleeds off leftover horizontal speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IdleState;

impl StateBehavior for IdleState {
    fn enter(&mut self, player: &mut PlayerContext<'_>) {
        player.play_animation("idle");
    }

    fn handle_input(&mut self, _player: &mut PlayerContext<'_>, input: &InputManager) -> Option<PlayerState> {
        if input.is_action_pressed(actions::JUMP) {
            return Some(PlayerState::jump());
        }
        move_intent(input).map(|_| PlayerState::walk())
    }

    fn update(&mut self, _delta_time: f32, player: &mut PlayerContext<'_>) -> Option<PlayerState> {
        player.apply_friction();
        if player.is_grounded() {
            None
        } else {
            Some(PlayerState::fall())
        }
    }
}
