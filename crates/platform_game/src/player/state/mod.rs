//! Player states
//!
//! Exactly one state is live per player. A state never switches itself:
//! `handle_input` and `update` return the next state and the owning
//! [`PlayerComponent`](super::PlayerComponent) performs the switch
//! (exit old, store new, enter new).
//!
//! Edges (guards in parentheses):
//!
//! - Idle -> Walk (move held), Jump (jump pressed), Fall (no ground)
//! - Walk -> Idle (no move held), Jump (jump pressed), Fall (no ground)
//! - Jump -> Fall (vertical velocity >= 0)
//! - Fall -> Idle or Walk (ground; split on horizontal speed)
//! - Hurt -> Idle or Walk (ground), Fall (stun over while airborne)
//! - any live state -> Hurt or Dead (damage, applied from outside)
//! - Dead is terminal

mod dead;
mod fall;
mod hurt;
mod idle;
mod jump;
mod walk;

use std::fmt;

use platform_engine::input::InputManager;
use platform_engine::object::components::{
    AnimationComponent, ColliderComponent, PhysicsComponent, SpriteComponent,
};
use platform_engine::object::GameObject;
use platform_engine::foundation::math::{utils, Vec2};

use crate::actions;

use super::PlayerTuning;

pub use dead::DeadState;
pub use fall::FallState;
pub use hurt::HurtState;
pub use idle::IdleState;
pub use jump::JumpState;
pub use walk::WalkState;

/// Horizontal speed under which a landing counts as standing still
pub const STILL_THRESHOLD: f32 = 1.0;

/// Behavior shared by every player state
#[allow(unused_variables)]
pub trait StateBehavior {
    /// Called when the state becomes live
    fn enter(&mut self, player: &mut PlayerContext<'_>) {}

    /// Called when the state is replaced
    fn exit(&mut self, player: &mut PlayerContext<'_>) {}

    /// React to input; return the next state to switch
    fn handle_input(&mut self, player: &mut PlayerContext<'_>, input: &InputManager) -> Option<PlayerState> {
        None
    }

    /// Advance by `delta_time`; return the next state to switch
    fn update(&mut self, delta_time: f32, player: &mut PlayerContext<'_>) -> Option<PlayerState> {
        None
    }
}

/// The live state of a player
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerState {
    /// Standing
    Idle(IdleState),
    /// Walking on the ground
    Walk(WalkState),
    /// Rising after a jump
    Jump(JumpState),
    /// Airborne and descending (or walked off a ledge)
    Fall(FallState),
    /// Knocked back after a hit
    Hurt(HurtState),
    /// Terminal
    Dead(DeadState),
}

macro_rules! dispatch {
    ($state:expr, $inner:ident => $call:expr) => {
        match $state {
            PlayerState::Idle($inner) => $call,
            PlayerState::Walk($inner) => $call,
            PlayerState::Jump($inner) => $call,
            PlayerState::Fall($inner) => $call,
            PlayerState::Hurt($inner) => $call,
            PlayerState::Dead($inner) => $call,
        }
    };
}

impl PlayerState {
    /// Idle state
    pub const fn idle() -> Self {
        Self::Idle(IdleState)
    }

    /// Walk state
    pub const fn walk() -> Self {
        Self::Walk(WalkState)
    }

    /// Jump state
    pub const fn jump() -> Self {
        Self::Jump(JumpState)
    }

    /// Fall state
    pub const fn fall() -> Self {
        Self::Fall(FallState)
    }

    /// Hurt state with a fresh stun timer
    pub const fn hurt() -> Self {
        Self::Hurt(HurtState::new())
    }

    /// Dead state
    pub const fn dead() -> Self {
        Self::Dead(DeadState)
    }

    /// Fieldless discriminant
    pub const fn kind(&self) -> PlayerStateKind {
        match self {
            Self::Idle(_) => PlayerStateKind::Idle,
            Self::Walk(_) => PlayerStateKind::Walk,
            Self::Jump(_) => PlayerStateKind::Jump,
            Self::Fall(_) => PlayerStateKind::Fall,
            Self::Hurt(_) => PlayerStateKind::Hurt,
            Self::Dead(_) => PlayerStateKind::Dead,
        }
    }

    /// Enter the state
    pub fn enter(&mut self, player: &mut PlayerContext<'_>) {
        #[cfg(test)]
        hook_log::record(Hook::Enter, self.kind());
        dispatch!(self, state => state.enter(player));
    }

    /// Exit the state
    pub fn exit(&mut self, player: &mut PlayerContext<'_>) {
        #[cfg(test)]
        hook_log::record(Hook::Exit, self.kind());
        dispatch!(self, state => state.exit(player));
    }

    /// React to input
    pub fn handle_input(&mut self, player: &mut PlayerContext<'_>, input: &InputManager) -> Option<Self> {
        dispatch!(self, state => state.handle_input(player, input))
    }

    /// Advance the state
    pub fn update(&mut self, delta_time: f32, player: &mut PlayerContext<'_>) -> Option<Self> {
        dispatch!(self, state => state.update(delta_time, player))
    }
}

/// Lifecycle hook of a state
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Hook {
    Enter,
    Exit,
}


/// Which state a player is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerStateKind {
    /// Standing
    Idle,
    /// Walking
    Walk,
    /// Rising
    Jump,
    /// Falling
    Fall,
    /// Knocked back
    Hurt,
    /// Dead
    Dead,
}

impl PlayerStateKind {
    /// Every state
    pub const ALL: [Self; 6] = [Self::Idle, Self::Walk, Self::Jump, Self::Fall, Self::Hurt, Self::Dead];

    /// Lowercase name, also used as the animation name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walk => "walk",
            Self::Jump => "jump",
            Self::Fall => "fall",
            Self::Hurt => "hurt",
            Self::Dead => "dead",
        }
    }

    /// Whether a switch from `self` to `next` is a legal edge.
    ///
    /// Hurt and Dead are reachable from every live state because damage is
    /// applied from outside the machine.
    pub const fn can_transition_to(self, next: Self) -> bool {
        use PlayerStateKind::{Dead, Fall, Hurt, Idle, Jump, Walk};
        match (self, next) {
            (Dead, _) => false,
            (_, Hurt | Dead) => true,
            (Idle, Walk | Jump | Fall)
            | (Walk, Idle | Jump | Fall)
            | (Jump, Fall)
            | (Fall, Idle | Walk)
            | (Hurt, Idle | Walk | Fall) => true,
            _ => false,
        }
    }
}

impl fmt::Display for PlayerStateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a state may act on: the player object and its tuning
pub struct PlayerContext<'a> {
    owner: &'a mut GameObject,
    tuning: &'a PlayerTuning,
}

impl<'a> PlayerContext<'a> {
    /// Wrap a player object for the duration of a state call
    pub fn new(owner: &'a mut GameObject, tuning: &'a PlayerTuning) -> Self {
        Self { owner, tuning }
    }

    /// Movement tuning
    pub const fn tuning(&self) -> &PlayerTuning {
        self.tuning
    }

    /// The player object
    pub fn owner(&mut self) -> &mut GameObject {
        &mut *self.owner
    }

    /// Current velocity, zero without a physics body
    pub fn velocity(&self) -> Vec2 {
        self.owner
            .get::<PhysicsComponent>()
            .map_or_else(Vec2::zeros, |body| body.velocity)
    }

    /// Replace the velocity
    pub fn set_velocity(&mut self, velocity: Vec2) {
        if let Some(body) = self.owner.get_mut::<PhysicsComponent>() {
            body.velocity = velocity;
        }
    }

    /// Standing on something this frame
    pub fn is_grounded(&self) -> bool {
        self.owner
            .get::<PhysicsComponent>()
            .is_some_and(PhysicsComponent::has_collided_below)
    }

    /// Sprite mirrored, i.e. facing left
    pub fn is_facing_left(&self) -> bool {
        self.owner
            .get::<SpriteComponent>()
            .is_some_and(SpriteComponent::is_flipped)
    }

    /// Play an animation if the player has an animation component
    pub fn play_animation(&mut self, name: &str) {
        match self.owner.get_mut::<AnimationComponent>() {
            Some(animation) => {
                animation.play(name);
            }
            None => log::trace!("'{}' has no animation for '{name}'", self.owner.name()),
        }
    }

    /// Push horizontally toward `direction` (-1 left, 1 right) and face it.
    ///
    /// Velocity against the push is cancelled first so turning is instant.
    pub fn steer(&mut self, direction: f32) {
        let force = direction * self.tuning.move_force;
        if let Some(body) = self.owner.get_mut::<PhysicsComponent>() {
            if body.velocity.x * direction < 0.0 {
                body.velocity.x = 0.0;
            }
            body.add_force(Vec2::new(force, 0.0));
        }
        if let Some(sprite) = self.owner.get_mut::<SpriteComponent>() {
            sprite.set_flipped(direction < 0.0);
        }
    }

    /// Clamp horizontal speed to the player's cap
    pub fn clamp_horizontal_speed(&mut self) {
        let max_speed = self.tuning.max_speed;
        if let Some(body) = self.owner.get_mut::<PhysicsComponent>() {
            body.velocity.x = utils::clamp_abs(body.velocity.x, max_speed);
        }
    }

    /// Decay horizontal velocity by the friction factor
    pub fn apply_friction(&mut self) {
        let factor = self.tuning.friction_factor;
        if let Some(body) = self.owner.get_mut::<PhysicsComponent>() {
            body.velocity.x *= factor;
        }
    }

    /// Enable or disable collision response
    pub fn set_collision_active(&mut self, active: bool) {
        if let Some(collider) = self.owner.get_mut::<ColliderComponent>() {
            collider.set_active(active);
        }
    }

    /// State after touching the ground: Idle when nearly still, else Walk
    pub fn landing_state(&self) -> PlayerState {
        if self.velocity().x.abs() < STILL_THRESHOLD {
            PlayerState::idle()
        } else {
            PlayerState::walk()
        }
    }
}

/// Horizontal input direction: -1 for left, 1 for right. Left wins when
/// both are held.
pub fn move_intent(input: &InputManager) -> Option<f32> {
    if input.is_action_down(actions::MOVE_LEFT) {
        Some(-1.0)
    } else if input.is_action_down(actions::MOVE_RIGHT) {
        Some(1.0)
    } else {
        None
    }
}

/// Air and ground steering shared by Walk, Jump and Fall
pub fn steer_from_input(player: &mut PlayerContext<'_>, input: &InputManager) -> Option<f32> {
    let direction = move_intent(input)?;
    player.steer(direction);
    Some(direction)
}
