//! Game configuration
//!
//! One file holds the engine section and the gameplay tuning:
//!
//! ```toml
//! [engine.physics]
//! gravity = [0.0, 980.0]
//!
//! [player]
//! jump_velocity = 380.0
//!
//! [enemies]
//! patrol_speed = 40.0
//! ```

use platform_engine::core::{Config, EngineConfig};
use platform_engine::foundation::math::{utils, Vec2};
use serde::{Deserialize, Serialize};

/// Complete game configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Engine settings
    pub engine: EngineConfig,
    /// Player tuning
    pub player: PlayerConfig,
    /// Enemy tuning
    pub enemies: EnemyConfig,
}

impl Config for GameConfig {}

impl GameConfig {
    /// Correct unusable values in every section, logging each fix
    pub fn validate(&mut self) {
        self.engine.validate();
        self.player.validate();
        self.enemies.validate();
    }
}

/// Player movement and damage tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Horizontal force while a move action is held
    pub move_force: f32,
    /// Horizontal speed cap
    pub max_speed: f32,
    /// Horizontal velocity multiplier per idle frame, in `[0, 1]`
    pub friction_factor: f32,
    /// Upward speed at jump start
    pub jump_velocity: f32,
    /// Seconds the hurt state ignores input while airborne
    pub stunned_duration: f32,
    /// Knockback when hurt while facing right; x is mirrored when facing left
    pub hurt_knockback: Vec2,
    /// Upward speed applied on death
    pub death_knockback: f32,
    /// Hit points
    pub max_health: i32,
    /// Invincibility after a hit, in seconds
    pub invincible_duration: f32,
    /// Body mass
    pub mass: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_force: 200.0,
            max_speed: 120.0,
            friction_factor: 0.85,
            jump_velocity: 350.0,
            stunned_duration: 0.4,
            hurt_knockback: Vec2::new(-100.0, -150.0),
            death_knockback: 200.0,
            max_health: 3,
            invincible_duration: 2.0,
            mass: 1.0,
        }
    }
}

impl PlayerConfig {
    /// Correct unusable values, logging each fix
    pub fn validate(&mut self) {
        let defaults = Self::default();
        if !(0.0..=1.0).contains(&self.friction_factor) {
            log::warn!("player.friction_factor {} outside [0, 1], using {}", self.friction_factor, defaults.friction_factor);
            self.friction_factor = defaults.friction_factor;
        }
        if !utils::is_positive_finite(self.max_speed) {
            log::warn!("player.max_speed must be positive and finite, using {}", defaults.max_speed);
            self.max_speed = defaults.max_speed;
        }
        if self.jump_velocity < 0.0 {
            log::warn!("player.jump_velocity is a speed; using its magnitude");
            self.jump_velocity = -self.jump_velocity;
        }
        if self.stunned_duration < 0.0 {
            self.stunned_duration = 0.0;
        }
        if self.max_health <= 0 {
            log::warn!("player.max_health must be positive, using {}", defaults.max_health);
            self.max_health = defaults.max_health;
        }
    }
}

/// Enemy behavior tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Walking speed of patrolling enemies
    pub patrol_speed: f32,
    /// Half-width of the patrol range around the spawn point
    pub patrol_range: f32,
    /// Jump velocity of jumping enemies (x is mirrored by direction)
    pub jump_velocity: Vec2,
    /// Seconds on the ground between jumps
    pub jump_interval: f32,
    /// Half-width of the jump range around the spawn point
    pub jump_range: f32,
    /// Vertical speed of flying enemies
    pub fly_speed: f32,
    /// Half-height of the flight range around the spawn point
    pub fly_range: f32,
    /// Hit points
    pub max_health: i32,
    /// Damage dealt to the player on contact
    pub contact_damage: i32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            patrol_speed: 50.0,
            patrol_range: 64.0,
            jump_velocity: Vec2::new(100.0, -300.0),
            jump_interval: 2.0,
            jump_range: 96.0,
            fly_speed: 50.0,
            fly_range: 48.0,
            max_health: 1,
            contact_damage: 1,
        }
    }
}

impl EnemyConfig {
    /// Correct unusable values, logging each fix
    pub fn validate(&mut self) {
        let defaults = Self::default();
        for (name, range, fallback) in [
            ("patrol_range", &mut self.patrol_range, defaults.patrol_range),
            ("jump_range", &mut self.jump_range, defaults.jump_range),
            ("fly_range", &mut self.fly_range, defaults.fly_range),
        ] {
            if *range < 0.0 {
                log::warn!("enemies.{name} must not be negative, using {fallback}");
                *range = fallback;
            }
        }
        if self.max_health <= 0 {
            self.max_health = defaults.max_health;
        }
        if self.contact_damage < 0 {
            self.contact_damage = 0;
        }
    }
}
