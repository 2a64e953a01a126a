//! Player state machine driven through a live scene

use approx::assert_relative_eq;
use platform_engine::prelude::*;
use platform_game::factory;
use platform_game::{actions, PlayerComponent, PlayerConfig, PlayerState, PlayerStateKind};

const DT: f32 = 1.0 / 60.0;
const FLOOR: f32 = 100.0;

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

fn level(with_floor: bool) -> (Scene, Context, ObjectId) {
    let mut ctx = Context::default();
    let mut scene = Scene::new("level");
    if with_floor {
        scene.physics_mut().set_resolver(Floor(FLOOR));
    }
    let config = PlayerConfig {
        invincible_duration: 0.0,
        ..PlayerConfig::default()
    };
    let id = scene.add(factory::player(Vec2::new(50.0, FLOOR), &config), &mut ctx);
    (scene, ctx, id)
}

fn step(scene: &mut Scene, ctx: &mut Context, dt: f32) {
    scene.handle_input(ctx);
    scene.update(dt, ctx);
    ctx.input.update();
}

fn kind(scene: &Scene, id: ObjectId) -> Option<PlayerStateKind> {
    scene.get(id)?.get::<PlayerComponent>()?.state_kind()
}

fn velocity(scene: &Scene, id: ObjectId) -> Vec2 {
    scene
        .get(id)
        .and_then(|player| player.get::<PhysicsComponent>())
        .map_or_else(Vec2::zeros, |body| body.velocity)
}

fn damage(scene: &mut Scene, id: ObjectId, amount: i32) -> bool {
    scene
        .get_mut(id)
        .is_some_and(|player| PlayerComponent::damage(player, amount))
}

#[test]
fn walk_jump_and_land_walking() {
    let (mut scene, mut ctx, id) = level(true);
    assert_eq!(kind(&scene, id), Some(PlayerStateKind::Idle));

    step(&mut scene, &mut ctx, DT);
    assert_eq!(kind(&scene, id), Some(PlayerStateKind::Idle));

    ctx.input.set_action(actions::MOVE_RIGHT, true);
    step(&mut scene, &mut ctx, DT);
    assert_eq!(kind(&scene, id), Some(PlayerStateKind::Walk));

    for _ in 0..10 {
        step(&mut scene, &mut ctx, DT);
    }
    assert!(velocity(&scene, id).x > 0.0);

    ctx.input.set_action(actions::JUMP, true);
    let mut visited = vec![kind(&scene, id)];
    for _ in 0..120 {
        step(&mut scene, &mut ctx, DT);
        let now = kind(&scene, id);
        if visited.last() != Some(&now) {
            visited.push(now);
        }
    }

    let expected = [
        PlayerStateKind::Walk,
        PlayerStateKind::Jump,
        PlayerStateKind::Fall,
        PlayerStateKind::Walk,
    ];
    let visited: Vec<_> = visited.into_iter().flatten().collect();
    assert_eq!(visited, expected);
}

#[test]
fn unusable_speed_cap_falls_back_to_default() {
    let mut ctx = Context::default();
    let mut scene = Scene::new("level");
    scene.physics_mut().set_resolver(Floor(FLOOR));
    let config = PlayerConfig {
        max_speed: -50.0,
        ..PlayerConfig::default()
    };
    let id = scene.add(factory::player(Vec2::new(50.0, FLOOR), &config), &mut ctx);

    ctx.input.set_action(actions::MOVE_RIGHT, true);
    for _ in 0..120 {
        step(&mut scene, &mut ctx, DT);
    }
    assert_eq!(kind(&scene, id), Some(PlayerStateKind::Walk));
    let vx = velocity(&scene, id).x;
    assert!(vx > 0.0);
    assert!(vx <= PlayerConfig::default().max_speed);
}

#[test]
fn jump_launches_at_configured_speed() {
    let (mut scene, mut ctx, id) = level(true);
    step(&mut scene, &mut ctx, DT);

    ctx.input.set_action(actions::JUMP, true);
    scene.handle_input(&mut ctx);
    assert_eq!(kind(&scene, id), Some(PlayerStateKind::Jump));
    assert_relative_eq!(velocity(&scene, id).y, -350.0);
}

#[test]
fn idle_without_ground_falls() {
    let (mut scene, mut ctx, id) = level(false);
    step(&mut scene, &mut ctx, DT);
    assert_eq!(kind(&scene, id), Some(PlayerStateKind::Fall));

    // Falling forever without ground
    for _ in 0..30 {
        step(&mut scene, &mut ctx, DT);
    }
    assert_eq!(kind(&scene, id), Some(PlayerStateKind::Fall));
}

#[test]
fn hurt_knockback_mirrors_with_facing() {
    let (mut scene, mut ctx, id) = level(true);
    step(&mut scene, &mut ctx, DT);

    assert!(damage(&mut scene, id, 1));
    assert_eq!(kind(&scene, id), Some(PlayerStateKind::Hurt));
    assert_relative_eq!(velocity(&scene, id).x, -100.0);
    assert_relative_eq!(velocity(&scene, id).y, -150.0);

    let (mut scene, mut ctx, id) = level(true);
    ctx.input.set_action(actions::MOVE_LEFT, true);
    step(&mut scene, &mut ctx, DT);
    step(&mut scene, &mut ctx, DT);
    assert!(scene
        .get(id)
        .and_then(|player| player.get::<SpriteComponent>())
        .is_some_and(SpriteComponent::is_flipped));

    assert!(damage(&mut scene, id, 1));
    assert_relative_eq!(velocity(&scene, id).x, 100.0);
}

#[test]
fn airborne_stun_ends_in_fall() {
    let (mut scene, mut ctx, id) = level(false);
    step(&mut scene, &mut ctx, DT);
    assert!(damage(&mut scene, id, 1));

    step(&mut scene, &mut ctx, 0.1);
    step(&mut scene, &mut ctx, 0.1);
    assert_eq!(kind(&scene, id), Some(PlayerStateKind::Hurt));

    for _ in 0..4 {
        step(&mut scene, &mut ctx, 0.1);
    }
    assert_eq!(kind(&scene, id), Some(PlayerStateKind::Fall));
}

#[test]
fn hurt_ignores_input_until_landing() {
    let (mut scene, mut ctx, id) = level(true);
    step(&mut scene, &mut ctx, DT);
    assert!(damage(&mut scene, id, 1));

    ctx.input.set_action(actions::JUMP, true);
    scene.handle_input(&mut ctx);
    assert_eq!(kind(&scene, id), Some(PlayerStateKind::Hurt));

    let mut landed = None;
    for frame in 0..120 {
        step(&mut scene, &mut ctx, DT);
        if kind(&scene, id) != Some(PlayerStateKind::Hurt) {
            landed = Some(frame);
            break;
        }
    }
    assert!(landed.is_some());
    assert!(matches!(
        kind(&scene, id),
        Some(PlayerStateKind::Idle | PlayerStateKind::Walk)
    ));
}

#[test]
fn lethal_damage_enters_dead_once() {
    let (mut scene, mut ctx, id) = level(true);
    step(&mut scene, &mut ctx, DT);

    assert!(damage(&mut scene, id, 1));
    assert!(damage(&mut scene, id, 1));
    assert!(damage(&mut scene, id, 1));
    assert_eq!(kind(&scene, id), Some(PlayerStateKind::Dead));
    assert_relative_eq!(velocity(&scene, id).y, -200.0);
    assert_relative_eq!(velocity(&scene, id).x, 0.0);

    let transitions = scene
        .get(id)
        .and_then(|player| player.get::<PlayerComponent>())
        .map(PlayerComponent::transition_count);

    assert!(!damage(&mut scene, id, 1));
    ctx.input.set_action(actions::JUMP, true);
    for _ in 0..60 {
        step(&mut scene, &mut ctx, DT);
    }

    let player = scene.get(id).and_then(|player| player.get::<PlayerComponent>());
    assert_eq!(player.and_then(PlayerComponent::state_kind), Some(PlayerStateKind::Dead));
    assert_eq!(player.map(PlayerComponent::transition_count), transitions);
    assert!(scene
        .get(id)
        .and_then(|player| player.get::<ColliderComponent>())
        .is_some_and(|collider| !collider.is_active()));
}

/// Every live state, under every input combination, on the ground and in the
/// air, produces either no switch or a legal one.
#[test]
fn every_state_handles_every_input() {
    let states = [
        PlayerState::idle(),
        PlayerState::walk(),
        PlayerState::jump(),
        PlayerState::fall(),
        PlayerState::hurt(),
        PlayerState::dead(),
    ];

    for state in states {
        for mask in 0..8u8 {
            for grounded in [false, true] {
                let mut ctx = Context::default();
                ctx.input.set_action(actions::MOVE_LEFT, mask & 1 != 0);
                ctx.input.set_action(actions::MOVE_RIGHT, mask & 2 != 0);
                ctx.input.set_action(actions::JUMP, mask & 4 != 0);

                let mut object = factory::player(Vec2::zeros(), &PlayerConfig::default());
                let mut player = PlayerComponent::default();
                let from = state.kind();
                assert!(player.set_state(&mut object, state.clone()));
                if let Some(body) = object.get_mut::<PhysicsComponent>() {
                    body.set_collided(CollisionFlags::BELOW, grounded);
                }

                let mut physics = PhysicsEngine::default();
                let mut commands = SceneCommands::new();
                let mut frame = ctx.frame(&mut physics, &mut commands);
                player.handle_input(&mut object, &mut frame);
                let after_input = player.state_kind().unwrap();
                assert!(after_input == from || from.can_transition_to(after_input));

                player.update(DT, &mut object, &mut frame);
                let after_update = player.state_kind().unwrap();
                assert!(after_update == after_input || after_input.can_transition_to(after_update));
            }
        }
    }
}
