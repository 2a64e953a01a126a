//! Scripted input: which actions are held on which frames

use platform_engine::input::InputManager;
use platform_game::actions;

/// One action held over a half-open frame range
#[derive(Debug, Clone, Copy)]
pub struct Hold {
    /// Action name
    pub action: &'static str,
    /// First frame the action is down
    pub from: u32,
    /// First frame the action is up again
    pub until: u32,
}

impl Hold {
    const fn new(action: &'static str, from: u32, until: u32) -> Self {
        Self { action, from, until }
    }

    const fn covers(&self, frame: u32) -> bool {
        self.from <= frame && frame < self.until
    }
}

/// A fixed input timeline
#[derive(Debug, Clone)]
pub struct InputScript {
    holds: Vec<Hold>,
}

impl InputScript {
    /// Walk right, hop twice, turn around and walk back
    pub fn demo() -> Self {
        Self {
            holds: vec![
                Hold::new(actions::MOVE_RIGHT, 30, 150),
                Hold::new(actions::JUMP, 60, 70),
                Hold::new(actions::JUMP, 120, 125),
                Hold::new(actions::MOVE_LEFT, 180, 300),
                Hold::new(actions::JUMP, 240, 250),
            ],
        }
    }

    /// Drive every scripted action for `frame`
    pub fn apply(&self, frame: u32, input: &mut InputManager) {
        for action in [actions::MOVE_LEFT, actions::MOVE_RIGHT, actions::JUMP] {
            let down = self
                .holds
                .iter()
                .any(|hold| hold.action == action && hold.covers(frame));
            input.set_action(action, down);
        }
    }

    /// Last frame any action is held
    pub fn length(&self) -> u32 {
        self.holds.iter().map(|hold| hold.until).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_follow_the_timeline() {
        let script = InputScript::demo();
        let mut input = InputManager::new();

        script.apply(59, &mut input);
        assert!(!input.is_action_down(actions::JUMP));

        input.update();
        script.apply(60, &mut input);
        assert!(input.is_action_pressed(actions::JUMP));

        input.update();
        script.apply(61, &mut input);
        assert!(input.is_action_down(actions::JUMP));
        assert!(!input.is_action_pressed(actions::JUMP));

        assert_eq!(script.length(), 300);
    }
}
