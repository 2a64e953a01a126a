//! Enemy AI component
//!
//! Holds one live [`AiBehavior`] and runs it every update. The behavior
//! given at construction is entered when the owning object joins a scene.

pub mod behavior;

use platform_engine::core::context::FrameContext;
use platform_engine::object::components::{
    HealthComponent, PhysicsComponent, SpriteComponent, TransformComponent,
};
use platform_engine::object::{Component, GameObject};

pub use behavior::{AiBehavior, AiBehaviorKind, Behavior, JumpBehavior, PatrolBehavior, UpDownBehavior};

/// Drives an enemy with a swappable behavior
#[derive(Debug, Clone, Default)]
pub struct AiComponent {
    behavior: Option<AiBehavior>,
    queued: Option<AiBehavior>,
    inert: bool,
}

impl AiComponent {
    /// Create with a behavior that starts on init
    pub fn new(behavior: impl Into<AiBehavior>) -> Self {
        Self {
            behavior: None,
            queued: Some(behavior.into()),
            inert: false,
        }
    }

    /// Replace the live behavior and enter the new one
    pub fn set_behavior(&mut self, owner: &mut GameObject, behavior: impl Into<AiBehavior>) {
        let mut behavior = behavior.into();
        log::debug!("'{}' switches to {} behavior", owner.name(), behavior.kind());
        behavior.enter(owner);
        self.behavior = Some(behavior);
    }

    /// The live behavior
    pub const fn behavior(&self) -> Option<&AiBehavior> {
        self.behavior.as_ref()
    }

    /// Kind of the live behavior
    pub fn behavior_kind(&self) -> Option<AiBehaviorKind> {
        self.behavior.as_ref().map(AiBehavior::kind)
    }

    /// True if required siblings were missing at init
    pub const fn is_inert(&self) -> bool {
        self.inert
    }

    /// Apply damage through the object's health component.
    ///
    /// False without a health component or when the hit was not taken.
    pub fn take_damage(object: &mut GameObject, amount: i32) -> bool {
        object
            .get_mut::<HealthComponent>()
            .is_some_and(|health| health.take_damage(amount))
    }

    /// Alive per the health component; objects without one never die
    pub fn is_alive(object: &GameObject) -> bool {
        object.get::<HealthComponent>().map_or(true, HealthComponent::is_alive)
    }
}

impl Component for AiComponent {
    fn init(&mut self, owner: &mut GameObject, _ctx: &mut FrameContext<'_>) {
        if !(owner.has::<TransformComponent>()
            && owner.has::<PhysicsComponent>()
            && owner.has::<SpriteComponent>())
        {
            log::error!("AI on '{}' needs transform, physics and sprite; it will not act", owner.name());
            self.inert = true;
            return;
        }
        if let Some(behavior) = self.queued.take() {
            self.set_behavior(owner, behavior);
        }
    }

    fn update(&mut self, delta_time: f32, owner: &mut GameObject, _ctx: &mut FrameContext<'_>) {
        if self.inert {
            return;
        }
        match self.behavior.as_mut() {
            Some(behavior) => behavior.update(delta_time, owner),
            None => log::debug!("AI on '{}' has no behavior", owner.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform_engine::foundation::math::Vec2;

    fn eagle() -> GameObject {
        GameObject::new("eagle")
            .with(TransformComponent::default())
            .with(PhysicsComponent::new(true, 1.0))
            .with(SpriteComponent::new("eagle", Vec2::new(40.0, 41.0)))
    }

    #[test]
    fn test_set_behavior_enters() {
        let mut object = eagle();
        let mut ai = AiComponent::default();
        assert_eq!(ai.behavior_kind(), None);

        ai.set_behavior(&mut object, UpDownBehavior::new(0.0, 100.0, 40.0));
        assert_eq!(ai.behavior_kind(), Some(AiBehaviorKind::UpDown));
        assert!(!object.get::<PhysicsComponent>().unwrap().uses_gravity());
    }

    #[test]
    fn test_damage_delegates_to_health() {
        let mut object = eagle();
        assert!(!AiComponent::take_damage(&mut object, 1));
        assert!(AiComponent::is_alive(&object));

        object.attach(HealthComponent::new(1));
        assert!(AiComponent::take_damage(&mut object, 1));
        assert!(!AiComponent::is_alive(&object));
        assert!(!AiComponent::take_damage(&mut object, 1));
    }
}
