//! Player component
//!
//! Owns the player's live [`PlayerState`] and the movement tuning the states
//! read. Requires Transform, Physics and Sprite siblings; Animation, Collider
//! and Health are optional and only limit what the states can do.

pub mod state;

use platform_engine::core::context::FrameContext;
use platform_engine::foundation::math::{utils, Vec2};
use platform_engine::object::components::{
    AnimationComponent, HealthComponent, PhysicsComponent, SpriteComponent, TransformComponent,
};
use platform_engine::object::{Component, GameObject};

use crate::config::PlayerConfig;

pub use state::{PlayerContext, PlayerState, PlayerStateKind};

/// Movement parameters read by the player states
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerTuning {
    /// Horizontal force while a move action is held
    pub move_force: f32,
    /// Horizontal speed cap
    pub max_speed: f32,
    /// Horizontal velocity multiplier per idle frame
    pub friction_factor: f32,
    /// Upward speed at jump start
    pub jump_velocity: f32,
    /// Airborne stun length after a hit
    pub stunned_duration: f32,
    /// Knockback when hurt facing right
    pub hurt_knockback: Vec2,
    /// Upward speed on death
    pub death_knockback: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self::from(&PlayerConfig::default())
    }
}

impl From<&PlayerConfig> for PlayerTuning {
    fn from(config: &PlayerConfig) -> Self {
        Self {
            move_force: config.move_force,
            max_speed: config.max_speed,
            friction_factor: config.friction_factor,
            jump_velocity: config.jump_velocity,
            stunned_duration: config.stunned_duration,
            hurt_knockback: config.hurt_knockback,
            death_knockback: config.death_knockback,
        }
    }
}

/// Player finite-state machine
#[derive(Debug, Clone)]
pub struct PlayerComponent {
    tuning: PlayerTuning,
    state: Option<PlayerState>,
    previous: Option<PlayerStateKind>,
    transitions: u32,
    dead: bool,
    inert: bool,
}

impl PlayerTuning {
    /// Replace unusable values with the defaults, logging each fix.
    ///
    /// Speeds and durations must be finite; the speed cap must be positive
    /// and friction must lie in `[0, 1]`.
    #[must_use]
    pub fn corrected(self) -> Self {
        let defaults = Self::from(&PlayerConfig::default());
        let mut tuning = self;
        if !utils::is_positive_finite(tuning.max_speed) {
            log::warn!("Player max_speed {} is unusable, using {}", tuning.max_speed, defaults.max_speed);
            tuning.max_speed = defaults.max_speed;
        }
        if !(0.0..=1.0).contains(&tuning.friction_factor) {
            log::warn!(
                "Player friction_factor {} outside [0, 1], using {}",
                tuning.friction_factor,
                defaults.friction_factor
            );
            tuning.friction_factor = defaults.friction_factor;
        }
        for (name, value, fallback) in [
            ("move_force", &mut tuning.move_force, defaults.move_force),
            ("jump_velocity", &mut tuning.jump_velocity, defaults.jump_velocity),
            ("death_knockback", &mut tuning.death_knockback, defaults.death_knockback),
        ] {
            if !value.is_finite() {
                log::warn!("Player {name} {value} is not finite, using {fallback}");
                *value = fallback;
            } else if *value < 0.0 {
                log::warn!("Player {name} is a magnitude; using {}", -*value);
                *value = -*value;
            }
        }
        if !(tuning.stunned_duration.is_finite() && tuning.stunned_duration >= 0.0) {
            log::warn!(
                "Player stunned_duration {} is unusable, using {}",
                tuning.stunned_duration,
                defaults.stunned_duration
            );
            tuning.stunned_duration = defaults.stunned_duration;
        }
        if !(tuning.hurt_knockback.x.is_finite() && tuning.hurt_knockback.y.is_finite()) {
            log::warn!("Player hurt_knockback is not finite, using the default");
            tuning.hurt_knockback = defaults.hurt_knockback;
        }
        tuning
    }
}

impl Default for PlayerComponent {
    fn default() -> Self {
        Self::new(PlayerTuning::default())
    }
}

impl PlayerComponent {
    /// Create a player; it enters Idle when its object joins a scene.
    ///
    /// Unusable tuning values are corrected (see [`PlayerTuning::corrected`]).
    pub fn new(tuning: PlayerTuning) -> Self {
        Self {
            tuning: tuning.corrected(),
            state: None,
            previous: None,
            transitions: 0,
            dead: false,
            inert: false,
        }
    }

    /// Movement tuning
    pub const fn tuning(&self) -> &PlayerTuning {
        &self.tuning
    }

    /// Kind of the live state, `None` before init
    pub fn state_kind(&self) -> Option<PlayerStateKind> {
        self.state.as_ref().map(PlayerState::kind)
    }

    /// The live state
    pub const fn state(&self) -> Option<&PlayerState> {
        self.state.as_ref()
    }

    /// Kind of the state before the last switch
    pub const fn previous_state_kind(&self) -> Option<PlayerStateKind> {
        self.previous
    }

    /// Number of state switches so far
    pub const fn transition_count(&self) -> u32 {
        self.transitions
    }

    /// True once lethal damage was taken
    pub const fn is_dead(&self) -> bool {
        self.dead
    }

    /// True if required siblings were missing at init
    pub const fn is_inert(&self) -> bool {
        self.inert
    }

    /// Switch state: exit the current one, store the new one, enter it.
    ///
    /// Switches that are not an edge of the machine (anything out of Dead,
    /// for instance) are refused and logged.
    pub fn set_state(&mut self, owner: &mut GameObject, next: PlayerState) -> bool {
        let from = self.state_kind();
        let to = next.kind();
        if let Some(from) = from {
            if !from.can_transition_to(to) {
                log::warn!("Refusing player transition {from} -> {to}");
                return false;
            }
        }

        let mut player = PlayerContext::new(owner, &self.tuning);
        if let Some(current) = self.state.as_mut() {
            current.exit(&mut player);
        }
        self.state = Some(next);
        if let Some(current) = self.state.as_mut() {
            current.enter(&mut player);
        }

        match from {
            Some(from) => log::debug!("Player state {from} -> {to}"),
            None => log::debug!("Player starts in {to}"),
        }
        self.previous = from;
        self.transitions += 1;
        true
    }

    /// Apply damage through the sibling health component.
    ///
    /// Fails (returns false) when the player is dead or inert, the amount is
    /// not positive, there is no health component, or the hit was absorbed
    /// by invincibility. Otherwise switches to Hurt, or to Dead when the hit
    /// was lethal.
    pub fn take_damage(&mut self, owner: &mut GameObject, amount: i32) -> bool {
        if self.dead || self.inert {
            log::debug!("Ignoring damage to '{}': not alive", owner.name());
            return false;
        }
        if amount <= 0 {
            log::warn!("Ignoring non-positive damage {amount}");
            return false;
        }
        let Some(health) = owner.get_mut::<HealthComponent>() else {
            log::warn!("'{}' has no health component, cannot take damage", owner.name());
            return false;
        };
        if !health.take_damage(amount) {
            return false;
        }
        let alive = health.is_alive();

        if alive {
            self.set_state(owner, PlayerState::hurt());
        } else {
            log::info!("'{}' died", owner.name());
            self.dead = true;
            self.set_state(owner, PlayerState::dead());
        }
        true
    }

    /// Apply damage to the player component of `object`.
    ///
    /// Returns false if the object has no player component.
    pub fn damage(object: &mut GameObject, amount: i32) -> bool {
        object
            .with_component_mut(|player: &mut Self, owner| player.take_damage(owner, amount))
            .unwrap_or(false)
    }

    fn missing_requirements(owner: &GameObject) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !owner.has::<TransformComponent>() {
            missing.push("transform");
        }
        if !owner.has::<PhysicsComponent>() {
            missing.push("physics");
        }
        if !owner.has::<SpriteComponent>() {
            missing.push("sprite");
        }
        missing
    }
}

impl Component for PlayerComponent {
    fn init(&mut self, owner: &mut GameObject, _ctx: &mut FrameContext<'_>) {
        let missing = Self::missing_requirements(owner);
        if !missing.is_empty() {
            log::error!(
                "Player '{}' is missing {}; it will not move",
                owner.name(),
                missing.join(", ")
            );
            self.inert = true;
            return;
        }
        if !owner.has::<AnimationComponent>() {
            log::warn!("Player '{}' has no animation component", owner.name());
        }
        if !owner.has::<HealthComponent>() {
            log::warn!("Player '{}' has no health component; damage is ignored", owner.name());
        }
        if self.state.is_none() {
            self.set_state(owner, PlayerState::idle());
        }
    }

    fn handle_input(&mut self, owner: &mut GameObject, ctx: &mut FrameContext<'_>) {
        if self.inert {
            return;
        }
        let next = {
            let Some(state) = self.state.as_mut() else {
                return;
            };
            let mut player = PlayerContext::new(owner, &self.tuning);
            state.handle_input(&mut player, ctx.input)
        };
        if let Some(next) = next {
            self.set_state(owner, next);
        }
    }

    fn update(&mut self, delta_time: f32, owner: &mut GameObject, _ctx: &mut FrameContext<'_>) {
        if self.inert {
            return;
        }
        let next = {
            let Some(state) = self.state.as_mut() else {
                return;
            };
            let mut player = PlayerContext::new(owner, &self.tuning);
            state.update(delta_time, &mut player)
        };
        if let Some(next) = next {
            self.set_state(owner, next);
        }
    }
}
