//! Platformer demo application
//!
//! Runs a small level headless: the player walks and jumps along a scripted
//! input timeline while a patrolling opossum, a hopping frog and a flying
//! eagle go about their routes. Touching an enemy hurts the player, landing
//! on one defeats it.
//!
//! Usage: `platformer_demo [config.toml|config.ron]`

mod script;
mod world;

use platform_engine::foundation::logging;
use platform_engine::prelude::*;
use platform_game::factory::{self, EnemyKind, ENEMY_TAG};
use platform_game::{AiComponent, GameConfig, PlayerComponent, PlayerStateKind};

use script::InputScript;
use world::FlatWorld;

const DEFAULT_CONFIG: &str = "demo_app/assets/config.toml";

/// Frames to keep running after the script ends
const SETTLE_FRAMES: u32 = 120;

struct DemoApp {
    config: GameConfig,
    world: FlatWorld,
    script: InputScript,
    frame: u32,
    player: Option<ObjectId>,
    last_state: Option<PlayerStateKind>,
    defeated: u32,
}

impl DemoApp {
    fn new(config: GameConfig) -> Self {
        Self {
            config,
            world: FlatWorld {
                floor: 300.0,
                left_wall: 0.0,
                right_wall: 960.0,
            },
            script: InputScript::demo(),
            frame: 0,
            player: None,
            last_state: None,
            defeated: 0,
        }
    }

    fn build_level(&mut self, engine: &mut Engine) -> Scene {
        let mut scene = engine.create_scene("level-1");
        scene.physics_mut().set_resolver(self.world);

        let floor = self.world.floor;
        let player = scene.add(
            factory::player(Vec2::new(60.0, floor), &self.config.player),
            &mut engine.context,
        );
        self.player = Some(player);

        for (kind, position) in [
            (EnemyKind::Opossum, Vec2::new(300.0, floor)),
            (EnemyKind::Frog, Vec2::new(520.0, floor)),
            (EnemyKind::Eagle, Vec2::new(700.0, floor - 120.0)),
        ] {
            scene.add(factory::enemy(kind, position, &self.config.enemies), &mut engine.context);
        }

        engine.context.camera.set_limit_bounds(Some(self.world.bounds()));
        engine.context.camera.set_target(Some(player));
        log::info!("Level built with {} objects", scene.len());
        scene
    }

    /// Contact between the player and enemies: landing on top defeats the
    /// enemy and bounces the player, any other touch hurts the player.
    fn resolve_contacts(&mut self, scene: &mut Scene) {
        let Some(player_id) = self.player else {
            return;
        };
        let Some(player) = scene.get(player_id) else {
            return;
        };
        let Some(player_box) = player
            .get::<ColliderComponent>()
            .filter(|collider| collider.is_active())
            .and_then(|collider| collider.world_bounds(player))
        else {
            return;
        };
        let falling = player
            .get::<PhysicsComponent>()
            .is_some_and(|body| body.velocity.y > 0.0);

        let contacts: Vec<(ObjectId, bool)> = scene
            .find_by_tag(ENEMY_TAG)
            .into_iter()
            .filter_map(|id| {
                let enemy = scene.get(id)?;
                let bounds = enemy
                    .get::<ColliderComponent>()
                    .filter(|collider| collider.is_active())?
                    .world_bounds(enemy)?;
                let stomp = falling && player_box.bottom() < bounds.top() + bounds.size.y * 0.5;
                player_box.intersects(&bounds).then_some((id, stomp))
            })
            .collect();

        for (id, stomp) in contacts {
            if stomp {
                self.stomp(scene, player_id, id);
            } else if self.config.enemies.contact_damage > 0 {
                let damage = self.config.enemies.contact_damage;
                if let Some(player) = scene.get_mut(player_id) {
                    if PlayerComponent::damage(player, damage) {
                        log::info!("Frame {}: player hit for {damage}", self.frame);
                    }
                }
            }
        }
    }

    fn stomp(&mut self, scene: &mut Scene, player_id: ObjectId, enemy_id: ObjectId) {
        if let Some(enemy) = scene.get_mut(enemy_id) {
            AiComponent::take_damage(enemy, 1);
            if !AiComponent::is_alive(enemy) {
                log::info!("Frame {}: '{}' defeated", self.frame, enemy.name());
                scene.request_removal(enemy_id);
                self.defeated += 1;
            }
        }
        let bounce = -self.config.player.jump_velocity * 0.5;
        if let Some(body) = scene
            .get_mut(player_id)
            .and_then(|player| player.get_mut::<PhysicsComponent>())
        {
            body.velocity.y = bounce;
        }
    }

    fn player_state(&self, scene: &Scene) -> Option<PlayerStateKind> {
        scene
            .get(self.player?)?
            .get::<PlayerComponent>()?
            .state_kind()
    }
}

impl Application for DemoApp {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let scene = self.build_level(engine);
        engine.scenes.push(scene);
        Ok(())
    }

    fn poll_input(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        self.script.apply(self.frame, &mut engine.context.input);
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
        let scene = engine
            .scenes
            .current_mut()
            .ok_or_else(|| AppError::GameLogic("level scene missing".to_string()))?;

        self.resolve_contacts(scene);

        let state = self.player_state(scene);
        if state != self.last_state {
            if let Some(state) = state {
                log::info!("Frame {}: player is {state}", self.frame);
            }
            self.last_state = state;
        }

        self.frame += 1;
        if self.frame >= self.script.length() + SETTLE_FRAMES {
            engine.quit();
        }
        Ok(())
    }

    fn render(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let commands = engine.context.render_queue.drain_sorted();
        if self.frame % 60 == 0 {
            log::debug!(
                "Frame {}: {} draw commands, camera at {:?}",
                self.frame,
                commands.len(),
                engine.context.camera.position()
            );
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        let health = engine
            .scenes
            .current()
            .zip(self.player)
            .and_then(|(scene, id)| scene.get(id))
            .and_then(|player| player.get::<HealthComponent>())
            .map(HealthComponent::current);
        log::info!(
            "Demo finished after {} frames: {} enemies defeated, player health {:?}",
            self.frame,
            self.defeated,
            health
        );
    }
}

fn main() -> Result<(), AppError> {
    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let loaded = GameConfig::load_or_default(&path);

    let level = loaded
        .as_ref()
        .map_or("info", |config| config.engine.log_level.as_str());
    logging::init_with_level(level);

    let mut config = loaded.map_err(|e| {
        log::error!("Failed to load {path}: {e}");
        e
    })?;
    config.validate();

    log::info!("Starting platformer demo");
    let mut app = DemoApp::new(config.clone());
    Engine::run(config.engine, &mut app)?;
    log::info!("Platformer demo completed successfully");
    Ok(())
}
