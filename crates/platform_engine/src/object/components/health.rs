//! Health component
//!
//! Integer hit points with an optional invincibility window after each hit.

use crate::core::context::FrameContext;
use crate::object::{Component, GameObject};

/// Hit points
#[derive(Debug, Clone)]
pub struct HealthComponent {
    max_health: i32,
    current_health: i32,
    invincible_duration: f32,
    invincible_timer: f32,
}

impl HealthComponent {
    /// Create with full health; a non-positive maximum becomes 1
    pub fn new(max_health: i32) -> Self {
        let max_health = if max_health > 0 {
            max_health
        } else {
            log::warn!("Invalid max health {max_health}, using 1");
            1
        };
        Self {
            max_health,
            current_health: max_health,
            invincible_duration: 0.0,
            invincible_timer: 0.0,
        }
    }

    /// Grant invincibility for `seconds` after every non-lethal hit
    #[must_use]
    pub fn with_invincibility(mut self, seconds: f32) -> Self {
        self.invincible_duration = seconds.max(0.0);
        self
    }

    /// Apply damage. Returns false when nothing happened: non-positive
    /// amount, already dead, or currently invincible.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if amount <= 0 || !self.is_alive() || self.is_invincible() {
            return false;
        }

        self.current_health = (self.current_health - amount).max(0);
        if self.is_alive() {
            self.invincible_timer = self.invincible_duration;
        }
        log::debug!("Took {amount} damage, {}/{} left", self.current_health, self.max_health);
        true
    }

    /// Restore health up to the maximum; the dead stay dead
    pub fn heal(&mut self, amount: i32) {
        if amount > 0 && self.is_alive() {
            self.current_health = (self.current_health + amount).min(self.max_health);
        }
    }

    /// Current hit points
    pub const fn current(&self) -> i32 {
        self.current_health
    }

    /// Maximum hit points
    pub const fn max(&self) -> i32 {
        self.max_health
    }

    /// More than zero hit points
    pub const fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    /// Inside the post-hit invincibility window
    pub fn is_invincible(&self) -> bool {
        self.invincible_timer > 0.0
    }

    /// Count down the invincibility window
    pub fn tick(&mut self, delta_time: f32) {
        self.invincible_timer = (self.invincible_timer - delta_time).max(0.0);
    }
}

impl Component for HealthComponent {
    fn update(&mut self, delta_time: f32, _owner: &mut GameObject, _ctx: &mut FrameContext<'_>) {
        self.tick(delta_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_and_death() {
        let mut health = HealthComponent::new(3);
        assert!(health.take_damage(1));
        assert_eq!(health.current(), 2);
        assert!(health.take_damage(5));
        assert_eq!(health.current(), 0);
        assert!(!health.is_alive());
        assert!(!health.take_damage(1));
    }

    #[test]
    fn test_rejects_non_positive_damage() {
        let mut health = HealthComponent::new(3);
        assert!(!health.take_damage(0));
        assert!(!health.take_damage(-2));
        assert_eq!(health.current(), 3);
    }

    #[test]
    fn test_invincibility_window() {
        let mut health = HealthComponent::new(3).with_invincibility(1.0);
        assert!(health.take_damage(1));
        assert!(health.is_invincible());
        assert!(!health.take_damage(1));
        health.tick(1.0);
        assert!(!health.is_invincible());
        assert!(health.take_damage(1));
        assert_eq!(health.current(), 1);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut health = HealthComponent::new(3);
        health.take_damage(2);
        health.heal(5);
        assert_eq!(health.current(), 3);
    }
}
