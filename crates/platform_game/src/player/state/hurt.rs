use super::{PlayerContext, PlayerState, StateBehavior};

/// Knocked back after a hit. Input is ignored until the player lands or
/// the stun runs out.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HurtState {
    stunned_timer: f32,
}

impl HurtState {
    /// Fresh state with the stun timer at zero
    pub const fn new() -> Self {
        Self { stunned_timer: 0.0 }
    }

    /// Seconds spent in this state
    pub const fn stunned_timer(&self) -> f32 {
        self.stunned_timer
    }
}

impl StateBehavior for HurtState {
    fn enter(&mut self, player: &mut PlayerContext<'_>) {
        player.play_animation("hurt");
        self.stunned_timer = 0.0;

        let mut knockback = player.tuning().hurt_knockback;
        if player.is_facing_left() {
            knockback.x = -knockback.x;
        }
        player.set_velocity(knockback);
    }

    fn update(&mut self, delta_time: f32, player: &mut PlayerContext<'_>) -> Option<PlayerState> {
        self.stunned_timer += delta_time;
        if player.is_grounded() {
            Some(player.landing_state())
        } else if self.stunned_timer > player.tuning().stunned_duration {
            Some(PlayerState::fall())
        } else {
            None
        }
    }
}
