//! Enemy behaviors
//!
//! One behavior is live per [`AiComponent`](super::AiComponent). Unlike
//! player states, behaviors have no exit hook: switching simply enters the
//! new behavior and drops the old one.

mod jump;
mod patrol;
mod updown;

use std::fmt;

use platform_engine::object::components::{
    AnimationComponent, PhysicsComponent, SpriteComponent, TransformComponent,
};
use platform_engine::object::GameObject;

pub use jump::JumpBehavior;
pub use patrol::PatrolBehavior;
pub use updown::UpDownBehavior;

/// Behavior shared by every enemy strategy
#[allow(unused_variables)]
pub trait Behavior {
    /// Called once when the behavior becomes live
    fn enter(&mut self, agent: &mut GameObject) {}

    /// Drive the agent for one frame
    fn update(&mut self, delta_time: f32, agent: &mut GameObject);
}

/// The live behavior of an enemy
#[derive(Debug, Clone, PartialEq)]
pub enum AiBehavior {
    /// Walk back and forth between two x bounds
    Patrol(PatrolBehavior),
    /// Hop back and forth between two x bounds
    Jump(JumpBehavior),
    /// Fly up and down between two y bounds
    UpDown(UpDownBehavior),
}

impl AiBehavior {
    /// Fieldless discriminant
    pub const fn kind(&self) -> AiBehaviorKind {
        match self {
            Self::Patrol(_) => AiBehaviorKind::Patrol,
            Self::Jump(_) => AiBehaviorKind::Jump,
            Self::UpDown(_) => AiBehaviorKind::UpDown,
        }
    }

    /// Enter the behavior
    pub fn enter(&mut self, agent: &mut GameObject) {
        match self {
            Self::Patrol(behavior) => behavior.enter(agent),
            Self::Jump(behavior) => behavior.enter(agent),
            Self::UpDown(behavior) => behavior.enter(agent),
        }
    }

    /// Drive the agent
    pub fn update(&mut self, delta_time: f32, agent: &mut GameObject) {
        match self {
            Self::Patrol(behavior) => behavior.update(delta_time, agent),
            Self::Jump(behavior) => behavior.update(delta_time, agent),
            Self::UpDown(behavior) => behavior.update(delta_time, agent),
        }
    }
}

impl From<PatrolBehavior> for AiBehavior {
    fn from(behavior: PatrolBehavior) -> Self {
        Self::Patrol(behavior)
    }
}

impl From<JumpBehavior> for AiBehavior {
    fn from(behavior: JumpBehavior) -> Self {
        Self::Jump(behavior)
    }
}

impl From<UpDownBehavior> for AiBehavior {
    fn from(behavior: UpDownBehavior) -> Self {
        Self::UpDown(behavior)
    }
}

/// Which behavior an enemy runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AiBehaviorKind {
    /// Horizontal walk
    Patrol,
    /// Horizontal hops
    Jump,
    /// Vertical flight
    UpDown,
}

impl fmt::Display for AiBehaviorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Patrol => "patrol",
            Self::Jump => "jump",
            Self::UpDown => "updown",
        })
    }
}

/// Whether `agent` has what a behavior drives; logs what is missing.
///
/// Transform and physics are always required, sprite and animation only
/// when asked for.
pub(crate) fn resolve(agent: &GameObject, behavior: &str, sprite: bool, animation: bool) -> bool {
    let mut missing = Vec::new();
    if !agent.has::<TransformComponent>() {
        missing.push("transform");
    }
    if !agent.has::<PhysicsComponent>() {
        missing.push("physics");
    }
    if sprite && !agent.has::<SpriteComponent>() {
        missing.push("sprite");
    }
    if animation && !agent.has::<AnimationComponent>() {
        missing.push("animation");
    }
    if missing.is_empty() {
        return true;
    }
    log::error!(
        "{behavior} behavior on '{}' is missing {}; skipping",
        agent.name(),
        missing.join(", ")
    );
    false
}

/// Play an animation if the agent has one to play
pub(crate) fn play(agent: &mut GameObject, name: &str) {
    if let Some(animation) = agent.get_mut::<AnimationComponent>() {
        animation.play(name);
    }
}

/// Order a pair of bounds, logging when they came in reversed
pub(crate) fn ordered_bounds(behavior: &str, min: f32, max: f32) -> (f32, f32) {
    if min > max {
        log::error!("{behavior} bounds reversed ({min} > {max}); swapping");
        (max, min)
    } else {
        (min, max)
    }
}
