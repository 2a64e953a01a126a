//! # Engine Configuration
//!
//! Configuration for the engine subsystems that the simulation core talks to.
//! Loaded from TOML or RON through the [`Config`] trait; every section has
//! defaults so partial files are accepted.
//!
//! ```toml
//! log_level = "debug"
//!
//! [physics]
//! gravity = [0.0, 980.0]
//! max_speed = 500.0
//!
//! [input_mappings]
//! jump = ["J", "Space"]
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Rect, Vec2};

pub use crate::config::{Config, ConfigError};

/// Default gravity in pixels per second squared (positive y is down)
pub const DEFAULT_GRAVITY: f32 = 980.0;

/// Default per-axis speed cap in pixels per second
pub const DEFAULT_MAX_SPEED: f32 = 500.0;

/// Window / viewport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Platformer".to_string(),
            width: 640,
            height: 360,
        }
    }
}

impl WindowConfig {
    /// Viewport size as a vector
    #[allow(clippy::cast_precision_loss)]
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Frame timing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Frame-rate cap, zero for uncapped
    pub target_fps: u32,
    /// Use a constant delta of `1 / target_fps` instead of wall-clock time
    pub fixed_step: bool,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            fixed_step: false,
        }
    }
}

/// Physics integrator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity acceleration applied to every gravity-enabled body
    pub gravity: Vec2,
    /// Per-axis speed cap applied after integration
    pub max_speed: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, DEFAULT_GRAVITY),
            max_speed: DEFAULT_MAX_SPEED,
        }
    }
}

/// Camera settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Follow smoothing factor per second; zero snaps to the target
    pub smooth_speed: f32,
    /// Optional world bounds the camera may not leave
    pub limit_bounds: Option<Rect>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            smooth_speed: 5.0,
            limit_bounds: None,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window / viewport settings
    pub window: WindowConfig,
    /// Frame timing
    pub performance: PerformanceConfig,
    /// Physics integrator settings
    pub physics: PhysicsConfig,
    /// Camera settings
    pub camera: CameraConfig,
    /// Action name to key names
    pub input_mappings: BTreeMap<String, Vec<String>>,
    /// Fallback log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            performance: PerformanceConfig::default(),
            physics: PhysicsConfig::default(),
            camera: CameraConfig::default(),
            input_mappings: default_input_mappings(),
            log_level: "info".to_string(),
        }
    }
}

impl Config for EngineConfig {}

impl EngineConfig {
    /// Create a configuration with the given window title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            window: WindowConfig {
                title: title.into(),
                ..WindowConfig::default()
            },
            ..Self::default()
        }
    }

    /// Set viewport dimensions
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Set physics parameters
    pub fn with_physics(mut self, gravity: Vec2, max_speed: f32) -> Self {
        self.physics = PhysicsConfig { gravity, max_speed };
        self
    }

    /// Correct values that would break the simulation, logging each fix
    pub fn validate(&mut self) {
        if !(self.physics.max_speed.is_finite() && self.physics.max_speed > 0.0) {
            log::warn!(
                "Invalid physics.max_speed {}, using {DEFAULT_MAX_SPEED}",
                self.physics.max_speed
            );
            self.physics.max_speed = DEFAULT_MAX_SPEED;
        }
        if !(self.physics.gravity.x.is_finite() && self.physics.gravity.y.is_finite()) {
            log::warn!("Invalid physics.gravity, using default");
            self.physics.gravity = PhysicsConfig::default().gravity;
        }
        if self.camera.smooth_speed < 0.0 {
            log::warn!("Negative camera.smooth_speed, snapping instead");
            self.camera.smooth_speed = 0.0;
        }
        if self.window.width == 0 || self.window.height == 0 {
            log::warn!("Zero-sized viewport, using default");
            let defaults = WindowConfig::default();
            self.window.width = defaults.width;
            self.window.height = defaults.height;
        }
    }
}

/// Default action bindings
pub fn default_input_mappings() -> BTreeMap<String, Vec<String>> {
    let bindings: [(&str, &[&str]); 7] = [
        ("move_left", &["A", "Left"]),
        ("move_right", &["D", "Right"]),
        ("move_up", &["W", "Up"]),
        ("move_down", &["S", "Down"]),
        ("jump", &["J", "Space"]),
        ("attack", &["K"]),
        ("pause", &["P", "Escape"]),
    ];

    bindings
        .iter()
        .map(|(action, keys)| {
            (
                (*action).to_string(),
                keys.iter().map(|key| (*key).to_string()).collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_relative_eq!(config.physics.gravity, Vec2::new(0.0, 980.0));
        assert_relative_eq!(config.physics.max_speed, 500.0);
        assert_eq!(config.input_mappings["jump"], vec!["J", "Space"]);
        assert_eq!(config.input_mappings.len(), 7);
    }

    #[test]
    fn test_partial_toml() {
        let config = EngineConfig::from_toml_str(
            r#"
            log_level = "debug"

            [physics]
            max_speed = 300.0
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_relative_eq!(config.physics.max_speed, 300.0);
        assert_relative_eq!(config.physics.gravity.y, 980.0);
        assert_eq!(config.window.width, 640);
    }

    #[test]
    fn test_ron_config() {
        let config = EngineConfig::from_ron_str(
            r#"(
                physics: (gravity: [0.0, 500.0], max_speed: 250.0),
                input_mappings: { "jump": ["Up"] },
            )"#,
        )
        .unwrap();

        assert_relative_eq!(config.physics.gravity.y, 500.0);
        assert_eq!(config.input_mappings["jump"], vec!["Up"]);
        assert!(!config.input_mappings.contains_key("move_left"));
    }

    #[test]
    fn test_malformed_toml() {
        let result = EngineConfig::from_toml_str("physics = 12");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let result = EngineConfig::load_from_file("engine.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_validate_corrects_values() {
        let mut config = EngineConfig::default().with_physics(Vec2::new(0.0, 980.0), -5.0);
        config.window.width = 0;
        config.validate();
        assert_relative_eq!(config.physics.max_speed, DEFAULT_MAX_SPEED);
        assert_eq!(config.window.width, 640);
    }
}
