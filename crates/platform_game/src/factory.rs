//! Entity factories
//!
//! Assemble the player and enemy objects from configuration. Sprite sheets
//! use one row per character; frame indices below refer to that row.

use std::fmt;
use std::str::FromStr;

use platform_engine::core::ConfigError;
use platform_engine::foundation::math::{Alignment, Vec2};
use platform_engine::object::components::{
    Animation, AnimationComponent, ColliderComponent, HealthComponent, PhysicsComponent,
    SpriteComponent, TransformComponent,
};
use platform_engine::object::GameObject;

use crate::ai::{AiComponent, JumpBehavior, PatrolBehavior, UpDownBehavior};
use crate::config::{EnemyConfig, PlayerConfig};
use crate::player::{PlayerComponent, PlayerTuning};

/// Name given to the player object
pub const PLAYER_NAME: &str = "player";
/// Tag of the player object
pub const PLAYER_TAG: &str = "player";
/// Tag of every enemy object
pub const ENEMY_TAG: &str = "enemy";

/// Build the player standing at `position` (bottom center of its sprite)
pub fn player(position: Vec2, config: &PlayerConfig) -> GameObject {
    let animations = AnimationComponent::new()
        .with_animation("idle", Animation::looping(0, 4, 0.15))
        .with_animation("walk", Animation::looping(4, 6, 0.1))
        .with_animation("jump", Animation::once(10, 1, 0.1))
        .with_animation("fall", Animation::once(11, 1, 0.1))
        .with_animation("hurt", Animation::once(12, 2, 0.1));

    GameObject::new(PLAYER_NAME)
        .with_tag(PLAYER_TAG)
        .with(TransformComponent::from_position(position))
        .with(
            SpriteComponent::new("player", Vec2::new(32.0, 32.0))
                .with_alignment(Alignment::BottomCenter)
                .with_layer(1),
        )
        .with(PhysicsComponent::new(true, config.mass))
        .with(ColliderComponent::new(Vec2::new(16.0, 22.0)).with_alignment(Alignment::BottomCenter))
        .with(animations)
        .with(HealthComponent::new(config.max_health).with_invincibility(config.invincible_duration))
        .with(PlayerComponent::new(PlayerTuning::from(config)))
}

/// Kinds of enemy the level format knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    /// Walks a patrol route
    Opossum,
    /// Hops back and forth
    Frog,
    /// Flies up and down
    Eagle,
}

impl EnemyKind {
    /// Every kind
    pub const ALL: [Self; 3] = [Self::Opossum, Self::Frog, Self::Eagle];

    /// Lowercase name, also the object name and texture id
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Opossum => "opossum",
            Self::Frog => "frog",
            Self::Eagle => "eagle",
        }
    }

    fn frame_size(self) -> Vec2 {
        match self {
            Self::Opossum => Vec2::new(36.0, 28.0),
            Self::Frog => Vec2::new(35.0, 32.0),
            Self::Eagle => Vec2::new(40.0, 41.0),
        }
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnemyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "enemy".to_string(),
                reason: format!("unknown enemy kind '{s}'"),
            })
    }
}

/// Build an enemy spawned at `position`. Its route is centred on the spawn
/// point and sized by the matching range in `config`.
pub fn enemy(kind: EnemyKind, position: Vec2, config: &EnemyConfig) -> GameObject {
    let (animations, ai, use_gravity) = match kind {
        EnemyKind::Opossum => (
            AnimationComponent::new().with_animation("walk", Animation::looping(0, 6, 0.1)),
            AiComponent::new(PatrolBehavior::new(
                position.x - config.patrol_range,
                position.x + config.patrol_range,
                config.patrol_speed,
            )),
            true,
        ),
        EnemyKind::Frog => (
            AnimationComponent::new()
                .with_animation("idle", Animation::looping(0, 4, 0.15))
                .with_animation("jump", Animation::once(4, 1, 0.1))
                .with_animation("fall", Animation::once(5, 1, 0.1)),
            AiComponent::new(JumpBehavior::new(
                position.x - config.jump_range,
                position.x + config.jump_range,
                config.jump_velocity,
                config.jump_interval,
            )),
            true,
        ),
        EnemyKind::Eagle => (
            AnimationComponent::new().with_animation("fly", Animation::looping(0, 4, 0.1)),
            AiComponent::new(UpDownBehavior::new(
                position.y - config.fly_range,
                position.y + config.fly_range,
                config.fly_speed,
            )),
            false,
        ),
    };

    let frame_size = kind.frame_size();
    GameObject::new(kind.as_str())
        .with_tag(ENEMY_TAG)
        .with(TransformComponent::from_position(position))
        .with(SpriteComponent::new(kind.as_str(), frame_size).with_alignment(Alignment::BottomCenter))
        .with(PhysicsComponent::new(use_gravity, 1.0))
        .with(ColliderComponent::new(frame_size * 0.6).with_alignment(Alignment::BottomCenter))
        .with(animations)
        .with(HealthComponent::new(config.max_health))
        .with(ai)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::AiBehaviorKind;

    #[test]
    fn test_player_has_every_capability() {
        let player = player(Vec2::new(10.0, 20.0), &PlayerConfig::default());
        assert_eq!(player.name(), PLAYER_NAME);
        assert_eq!(player.tag(), PLAYER_TAG);
        assert!(player.has::<TransformComponent>());
        assert!(player.has::<SpriteComponent>());
        assert!(player.has::<PhysicsComponent>());
        assert!(player.has::<ColliderComponent>());
        assert!(player.has::<AnimationComponent>());
        assert_eq!(player.get::<HealthComponent>().map(HealthComponent::max), Some(3));
        assert!(player.has::<PlayerComponent>());
    }

    #[test]
    fn test_enemy_kinds_parse() {
        assert_eq!("Frog".parse::<EnemyKind>().ok(), Some(EnemyKind::Frog));
        assert!("dragon".parse::<EnemyKind>().is_err());
        assert_eq!(EnemyKind::Eagle.to_string(), "eagle");
    }

    #[test]
    fn test_enemy_behavior_is_queued_until_init() {
        let config = EnemyConfig::default();
        for kind in EnemyKind::ALL {
            let enemy = enemy(kind, Vec2::new(200.0, 100.0), &config);
            assert_eq!(enemy.tag(), ENEMY_TAG);
            let ai = enemy.get::<AiComponent>().unwrap();
            assert_eq!(ai.behavior_kind(), None::<AiBehaviorKind>);
        }
        let eagle = enemy(EnemyKind::Eagle, Vec2::zeros(), &config);
        assert!(!eagle.get::<PhysicsComponent>().unwrap().uses_gravity());
    }
}
