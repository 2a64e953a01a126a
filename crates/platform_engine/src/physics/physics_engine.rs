//! Physics integrator
//!
//! Holds a non-owning registry of object handles. Each step, for every
//! registered and enabled body:
//!
//! 1. gravity (scaled by mass) is added to the accumulated force,
//! 2. velocity += force / mass * dt, then the force is cleared,
//! 3. the transform moves by velocity * dt,
//! 4. each velocity axis is clamped to `[-max_speed, max_speed]`,
//! 5. collision flags are reset and the [`CollisionResolver`] (if any) runs.
//!
//! Handles are resolved against the scene's arena on every access, so a
//! stale registration is skipped instead of reaching a freed object.

use slotmap::{Key, SlotMap};

use crate::core::config::{PhysicsConfig, DEFAULT_MAX_SPEED};
use crate::foundation::math::{utils, utils::clamp_abs, Vec2};
use crate::object::components::{PhysicsComponent, TransformComponent};
use crate::object::{GameObject, ObjectId};

/// External collision system hook.
///
/// Runs right after an object is integrated, with its collision flags
/// already cleared. Implementations push the object out of solid geometry
/// and set the flags for the sides it touched.
pub trait CollisionResolver {
    /// Resolve contacts for one integrated object
    fn resolve(&mut self, object: &mut GameObject);
}

/// Integrates registered physics bodies
pub struct PhysicsEngine {
    bodies: Vec<ObjectId>,
    gravity: Vec2,
    max_speed: f32,
    resolver: Option<Box<dyn CollisionResolver>>,
}

impl Default for PhysicsEngine {
    fn default() -> Self {
        Self::new(&PhysicsConfig::default())
    }
}

impl PhysicsEngine {
    /// Create an integrator from configuration
    pub fn new(config: &PhysicsConfig) -> Self {
        Self {
            bodies: Vec::new(),
            gravity: config.gravity,
            max_speed: checked_max_speed(config.max_speed),
            resolver: None,
        }
    }

    /// Install the collision hook (builder style)
    #[must_use]
    pub fn with_resolver(mut self, resolver: impl CollisionResolver + 'static) -> Self {
        self.set_resolver(resolver);
        self
    }

    /// Install or replace the collision hook
    pub fn set_resolver(&mut self, resolver: impl CollisionResolver + 'static) {
        self.resolver = Some(Box::new(resolver));
    }

    /// Remove the collision hook
    pub fn clear_resolver(&mut self) {
        self.resolver = None;
    }

    /// Gravity acceleration
    pub const fn gravity(&self) -> Vec2 {
        self.gravity
    }

    /// Change gravity
    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    /// Per-axis speed cap
    pub const fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Change the speed cap; non-positive or non-finite caps fall back to
    /// [`DEFAULT_MAX_SPEED`]
    pub fn set_max_speed(&mut self, max_speed: f32) {
        self.max_speed = checked_max_speed(max_speed);
    }

    /// Register a body; duplicates are ignored
    pub fn register(&mut self, id: ObjectId) {
        if id.is_null() {
            log::warn!("Refusing to register a physics body with a null handle");
            return;
        }
        if self.bodies.contains(&id) {
            log::trace!("Physics body {id:?} already registered");
            return;
        }
        self.bodies.push(id);
    }

    /// Unregister a body; unknown handles are ignored
    pub fn unregister(&mut self, id: ObjectId) {
        self.bodies.retain(|registered| *registered != id);
    }

    /// Whether a handle is registered
    pub fn is_registered(&self, id: ObjectId) -> bool {
        self.bodies.contains(&id)
    }

    /// Number of registered bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Advance every registered body by `delta_time` seconds
    pub fn integrate(&mut self, delta_time: f32, objects: &mut SlotMap<ObjectId, GameObject>) {
        let gravity = self.gravity;
        let max_speed = self.max_speed;

        for &id in &self.bodies {
            let Some(object) = objects.get_mut(id) else {
                log::trace!("Skipping stale physics body {id:?}");
                continue;
            };
            let Some(displacement) = step_body(object, gravity, max_speed, delta_time) else {
                continue;
            };

            if let Some(transform) = object.get_mut::<TransformComponent>() {
                transform.translate(displacement);
            }

            if let Some(resolver) = self.resolver.as_mut() {
                if let Some(body) = object.get_mut::<PhysicsComponent>() {
                    body.reset_collision_flags();
                }
                resolver.resolve(object);
            }
        }
    }
}

/// Integrate one body's velocity; returns the displacement for this step
fn checked_max_speed(max_speed: f32) -> f32 {
    if utils::is_positive_finite(max_speed) {
        max_speed
    } else {
        log::warn!("Invalid max speed {max_speed}, using {DEFAULT_MAX_SPEED}");
        DEFAULT_MAX_SPEED
    }
}

fn step_body(object: &mut GameObject, gravity: Vec2, max_speed: f32, delta_time: f32) -> Option<Vec2> {
    let body = object.get_mut::<PhysicsComponent>()?;
    if !body.is_enabled() || body.mass() <= 0.0 {
        return None;
    }

    if body.uses_gravity() {
        body.add_force(gravity * body.mass());
    }
    let acceleration = body.force() / body.mass();
    body.velocity += acceleration * delta_time;
    body.clear_force();

    let displacement = body.velocity * delta_time;
    body.velocity = Vec2::new(
        clamp_abs(body.velocity.x, max_speed),
        clamp_abs(body.velocity.y, max_speed),
    );
    Some(displacement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::components::CollisionFlags;
    use approx::assert_relative_eq;

    fn arena_with_body(body: PhysicsComponent) -> (SlotMap<ObjectId, GameObject>, ObjectId) {
        let mut objects = SlotMap::with_key();
        let id = objects.insert(
            GameObject::new("body")
                .with(TransformComponent::default())
                .with(body),
        );
        (objects, id)
    }

    #[test]
    fn test_gravity_integration() {
        let mut engine = PhysicsEngine::default();
        let (mut objects, id) = arena_with_body(PhysicsComponent::new(true, 2.0));
        engine.register(id);

        let dt = 1.0 / 60.0;
        engine.integrate(dt, &mut objects);

        let object = &objects[id];
        let body = object.get::<PhysicsComponent>().unwrap();
        assert_relative_eq!(body.velocity.y, 980.0 * dt, epsilon = 1e-4);
        assert_relative_eq!(body.velocity.x, 0.0);
        assert_relative_eq!(body.force(), Vec2::zeros());

        let transform = object.get::<TransformComponent>().unwrap();
        assert_relative_eq!(transform.position.y, 980.0 * dt * dt, epsilon = 1e-4);
    }

    #[test]
    fn test_speed_clamped_per_axis() {
        let mut engine = PhysicsEngine::default();
        let mut body = PhysicsComponent::new(false, 1.0);
        body.set_velocity(Vec2::new(-800.0, 600.0));
        let (mut objects, id) = arena_with_body(body);
        engine.register(id);

        engine.integrate(0.1, &mut objects);

        let object = &objects[id];
        let body = object.get::<PhysicsComponent>().unwrap();
        assert_relative_eq!(body.velocity, Vec2::new(-500.0, 500.0));
        // Displacement uses the unclamped velocity
        let transform = object.get::<TransformComponent>().unwrap();
        assert_relative_eq!(transform.position, Vec2::new(-80.0, 60.0), epsilon = 1e-4);
    }

    #[test]
    fn test_unusable_max_speed_uses_default() {
        let mut engine = PhysicsEngine::default();
        engine.set_max_speed(f32::NAN);
        assert_relative_eq!(engine.max_speed(), DEFAULT_MAX_SPEED);
        engine.set_max_speed(-50.0);
        assert_relative_eq!(engine.max_speed(), DEFAULT_MAX_SPEED);
        engine.set_max_speed(250.0);
        assert_relative_eq!(engine.max_speed(), 250.0);

        let engine = PhysicsEngine::new(&PhysicsConfig {
            gravity: Vec2::new(0.0, 980.0),
            max_speed: f32::INFINITY,
        });
        assert_relative_eq!(engine.max_speed(), DEFAULT_MAX_SPEED);
    }

    #[test]
    fn test_integrate_after_nan_max_speed() {
        let mut engine = PhysicsEngine::default();
        engine.set_max_speed(f32::NAN);
        let mut body = PhysicsComponent::new(false, 1.0);
        body.set_velocity(Vec2::new(900.0, 0.0));
        let (mut objects, id) = arena_with_body(body);
        engine.register(id);

        engine.integrate(1.0 / 60.0, &mut objects);

        let body = objects[id].get::<PhysicsComponent>().unwrap();
        assert_relative_eq!(body.velocity.x, DEFAULT_MAX_SPEED);
    }

    #[test]
    fn test_disabled_body_untouched() {
        let mut engine = PhysicsEngine::default();
        let mut body = PhysicsComponent::new(true, 1.0);
        body.set_enabled(false);
        let (mut objects, id) = arena_with_body(body);
        engine.register(id);

        engine.integrate(0.5, &mut objects);

        let body = objects[id].get::<PhysicsComponent>().unwrap();
        assert_relative_eq!(body.velocity, Vec2::zeros());
    }

    #[test]
    fn test_registration_is_idempotent() {
        let mut engine = PhysicsEngine::default();
        let (mut objects, id) = arena_with_body(PhysicsComponent::new(true, 1.0));
        engine.register(id);
        engine.register(id);
        assert_eq!(engine.body_count(), 1);

        engine.integrate(0.1, &mut objects);
        let body = objects[id].get::<PhysicsComponent>().unwrap();
        assert_relative_eq!(body.velocity.y, 98.0, epsilon = 1e-3);

        engine.unregister(id);
        engine.unregister(id);
        assert!(!engine.is_registered(id));
        engine.register(ObjectId::null());
        assert_eq!(engine.body_count(), 0);
    }

    #[test]
    fn test_stale_handle_skipped() {
        let mut engine = PhysicsEngine::default();
        let (mut objects, id) = arena_with_body(PhysicsComponent::new(true, 1.0));
        engine.register(id);
        objects.remove(id);
        let replacement = objects.insert(GameObject::new("other").with(PhysicsComponent::new(true, 1.0)));

        engine.integrate(0.1, &mut objects);

        let body = objects[replacement].get::<PhysicsComponent>().unwrap();
        assert_relative_eq!(body.velocity, Vec2::zeros());
    }

    struct Floor {
        y: f32,
    }

    impl CollisionResolver for Floor {
        fn resolve(&mut self, object: &mut GameObject) {
            let Some(transform) = object.get_mut::<TransformComponent>() else {
                return;
            };
            if transform.position.y < self.y {
                return;
            }
            transform.position.y = self.y;
            if let Some(body) = object.get_mut::<PhysicsComponent>() {
                body.velocity.y = 0.0;
                body.set_collided(CollisionFlags::BELOW, true);
            }
        }
    }

    #[test]
    fn test_resolver_sets_flags_after_reset() {
        let mut engine = PhysicsEngine::default().with_resolver(Floor { y: 0.0 });
        let mut body = PhysicsComponent::new(true, 1.0);
        body.set_collided(CollisionFlags::LEFT, true);
        let (mut objects, id) = arena_with_body(body);
        engine.register(id);

        engine.integrate(1.0 / 60.0, &mut objects);

        let body = objects[id].get::<PhysicsComponent>().unwrap();
        assert!(body.has_collided_below());
        assert!(!body.has_collided_left());
        assert_relative_eq!(body.velocity.y, 0.0);
    }
}
