//! Enemy behaviors driven through a live scene

use approx::assert_relative_eq;
use platform_engine::prelude::*;
use platform_game::ai::{AiBehaviorKind, AiComponent, PatrolBehavior};
use platform_game::factory::{self, EnemyKind};
use platform_game::EnemyConfig;

const DT: f32 = 1.0 / 60.0;
const FLOOR: f32 = 200.0;

/// Flat ground at a fixed height
struct Floor(f32);

impl CollisionResolver for Floor {
    fn resolve(&mut self, object: &mut GameObject) {
        let Some(transform) = object.get_mut::<TransformComponent>() else {
            return;
        };
        if transform.position.y < self.0 {
            return;
        }
        transform.position.y = self.0;
        if let Some(body) = object.get_mut::<PhysicsComponent>() {
            body.velocity.y = body.velocity.y.min(0.0);
            body.set_collided(CollisionFlags::BELOW, true);
        }
    }
}

fn level() -> (Scene, Context) {
    let mut scene = Scene::new("level");
    scene.physics_mut().set_resolver(Floor(FLOOR));
    (scene, Context::default())
}

fn position(scene: &Scene, id: ObjectId) -> Vec2 {
    scene
        .get(id)
        .and_then(|enemy| enemy.get::<TransformComponent>())
        .map_or_else(Vec2::zeros, |transform| transform.position)
}

fn velocity(scene: &Scene, id: ObjectId) -> Vec2 {
    scene
        .get(id)
        .and_then(|enemy| enemy.get::<PhysicsComponent>())
        .map_or_else(Vec2::zeros, |body| body.velocity)
}

#[test]
fn behavior_starts_when_the_enemy_joins() {
    let (mut scene, mut ctx) = level();
    let config = EnemyConfig::default();
    let ids: Vec<_> = EnemyKind::ALL
        .into_iter()
        .map(|kind| scene.add(factory::enemy(kind, Vec2::new(100.0, FLOOR), &config), &mut ctx))
        .collect();

    let kinds: Vec<_> = ids
        .iter()
        .map(|&id| {
            scene
                .get(id)
                .and_then(|enemy| enemy.get::<AiComponent>())
                .and_then(AiComponent::behavior_kind)
        })
        .collect();
    assert_eq!(
        kinds,
        [
            Some(AiBehaviorKind::Patrol),
            Some(AiBehaviorKind::Jump),
            Some(AiBehaviorKind::UpDown)
        ]
    );
}

#[test]
fn patrol_oscillates_between_bounds() {
    let (mut scene, mut ctx) = level();
    let config = EnemyConfig::default();
    let id = scene.add(factory::enemy(EnemyKind::Opossum, Vec2::new(100.0, FLOOR), &config), &mut ctx);

    let (min_x, max_x) = (100.0 - config.patrol_range, 100.0 + config.patrol_range);
    let slack = config.patrol_speed * DT * 2.0;
    let mut turns = 0;
    let mut heading = 0.0_f32;
    for _ in 0..600 {
        scene.update(DT, &mut ctx);
        let x = position(&scene, id).x;
        assert!(x >= min_x - slack && x <= max_x + slack, "x = {x}");

        let vx = velocity(&scene, id).x;
        if vx.signum() != heading.signum() && heading != 0.0 {
            turns += 1;
        }
        heading = vx;
    }
    assert!(turns >= 2, "only {turns} turns");
}

#[test]
fn patrol_turns_at_right_wall() {
    let mut ctx = Context::default();
    let mut scene = Scene::new("walls");
    let id = scene.add(
        GameObject::new("opossum")
            .with(TransformComponent::from_position(Vec2::new(164.0, 0.0)))
            .with(SpriteComponent::new("opossum", Vec2::new(36.0, 28.0)))
            .with(PhysicsComponent::new(false, 1.0))
            .with(AiComponent::new(PatrolBehavior::new(36.0, 164.0, 50.0).moving_right(true))),
        &mut ctx,
    );
    if let Some(body) = scene.get_mut(id).and_then(|enemy| enemy.get_mut::<PhysicsComponent>()) {
        body.set_collided(CollisionFlags::RIGHT, true);
    }

    scene.handle_input(&mut ctx);
    scene.update(DT, &mut ctx);
    assert_relative_eq!(velocity(&scene, id).x, -50.0);
    let moving_right = scene
        .get(id)
        .and_then(|enemy| enemy.get::<AiComponent>())
        .and_then(AiComponent::behavior)
        .map(|behavior| match behavior {
            platform_game::AiBehavior::Patrol(patrol) => patrol.is_moving_right(),
            _ => true,
        });
    assert_eq!(moving_right, Some(false));
}

#[test]
fn frog_waits_then_hops() {
    let (mut scene, mut ctx) = level();
    let config = EnemyConfig::default();
    let id = scene.add(factory::enemy(EnemyKind::Frog, Vec2::new(100.0, FLOOR), &config), &mut ctx);

    let wait_frames = (config.jump_interval / DT) as usize;
    for _ in 0..wait_frames / 2 {
        scene.update(DT, &mut ctx);
    }
    assert_relative_eq!(position(&scene, id).y, FLOOR);

    let mut airborne = false;
    for _ in 0..wait_frames {
        scene.update(DT, &mut ctx);
        airborne |= position(&scene, id).y < FLOOR - 1.0;
    }
    assert!(airborne);
}

#[test]
fn eagle_flies_without_gravity() {
    let (mut scene, mut ctx) = level();
    let config = EnemyConfig::default();
    let start = Vec2::new(100.0, 100.0);
    let id = scene.add(factory::enemy(EnemyKind::Eagle, start, &config), &mut ctx);

    let slack = config.fly_speed * DT * 2.0;
    let (mut highest, mut lowest) = (start.y, start.y);
    for _ in 0..600 {
        scene.update(DT, &mut ctx);
        let y = position(&scene, id).y;
        highest = highest.min(y);
        lowest = lowest.max(y);
        assert_relative_eq!(position(&scene, id).x, start.x);
    }
    assert!(highest <= start.y - config.fly_range + slack);
    assert!(lowest >= start.y + config.fly_range - slack);
    assert!(highest >= start.y - config.fly_range - slack);
    assert!(lowest <= start.y + config.fly_range + slack);
}

#[test]
fn defeated_enemy_is_removed() {
    let (mut scene, mut ctx) = level();
    let config = EnemyConfig::default();
    let id = scene.add(factory::enemy(EnemyKind::Opossum, Vec2::new(100.0, FLOOR), &config), &mut ctx);
    assert_eq!(scene.physics().body_count(), 1);

    let enemy = scene.get_mut(id).unwrap();
    assert!(AiComponent::take_damage(enemy, config.max_health));
    assert!(!AiComponent::is_alive(enemy));
    assert!(scene.request_removal(id));

    scene.update(DT, &mut ctx);
    assert!(!scene.contains(id));
    assert_eq!(scene.physics().body_count(), 0);
}
