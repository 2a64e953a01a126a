//! Core engine implementation
//!
//! The engine owns the frame timer, the [`Context`] and the scene stack, and
//! runs the main loop for an [`Application`].

use thiserror::Error;

use crate::application::{AppEvent, Application};
use crate::config::ConfigError;
use crate::core::config::EngineConfig;
use crate::core::context::Context;
use crate::foundation::time::Timer;
use crate::physics::PhysicsEngine;
use crate::scene::{Scene, SceneManager};

/// Main engine struct
///
/// The engine coordinates all subsystems and manages the main loop.
pub struct Engine {
    /// Input, camera and render queue
    pub context: Context,

    /// Scene stack
    pub scenes: SceneManager,

    timer: Timer,
    config: EngineConfig,
    running: bool,
}

impl Engine {
    /// Create a new engine instance
    #[allow(clippy::cast_precision_loss)]
    pub fn new(mut config: EngineConfig) -> Self {
        log::info!("Initializing engine '{}'...", config.window.title);
        config.validate();

        let mut timer = Timer::new().with_target_fps(config.performance.target_fps);
        if config.performance.fixed_step && config.performance.target_fps > 0 {
            timer = timer.with_fixed_step(1.0 / config.performance.target_fps as f32);
        }

        Self {
            context: Context::new(&config),
            scenes: SceneManager::new(),
            timer,
            config,
            running: true,
        }
    }

    /// Run the engine main loop with the given application
    pub fn run<T: Application>(config: EngineConfig, app: &mut T) -> Result<(), EngineError> {
        let mut engine = Self::new(config);

        app.initialize(&mut engine)
            .map_err(|e| EngineError::InitializationFailed(format!("App initialization: {e}")))?;

        log::info!("Starting main loop...");
        let result = engine.run_loop(app);

        app.cleanup(&mut engine);
        engine.scenes.clear(&mut engine.context);

        log::info!(
            "Engine shutdown complete after {} frames ({:.1} fps average)",
            engine.timer.frame_count(),
            engine.timer.average_fps()
        );
        result
    }

    fn run_loop<T: Application>(&mut self, app: &mut T) -> Result<(), EngineError> {
        while self.running {
            self.step(app)?;
        }
        Ok(())
    }

    /// Run a single frame
    pub fn step<T: Application>(&mut self, app: &mut T) -> Result<(), EngineError> {
        let delta_time = self.timer.update();

        self.context.input.update();
        app.poll_input(self)
            .map_err(|e| EngineError::ApplicationError(format!("App input: {e}")))?;

        self.scenes.handle_input(&mut self.context);
        self.scenes.update(delta_time, &mut self.context);

        app.update(self, delta_time)
            .map_err(|e| EngineError::ApplicationError(format!("App update: {e}")))?;

        self.context.render_queue.clear();
        self.scenes.render(&mut self.context);
        app.render(self)
            .map_err(|e| EngineError::ApplicationError(format!("App render: {e}")))?;

        if self.context.input.quit_requested() {
            log::info!("Quit requested");
            self.running = false;
        } else if self.scenes.is_empty() {
            log::info!("No scenes left, stopping");
            self.running = false;
        }
        Ok(())
    }

    /// Handle a platform event
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::KeyInput { key, pressed } => {
                self.context.input.handle_key_input(key, pressed);
            }
            AppEvent::FocusLost => self.context.input.release_all(),
            AppEvent::CloseRequested => self.quit(),
        }
    }

    /// Create an empty scene using the configured physics settings
    pub fn create_scene(&self, name: impl Into<String>) -> Scene {
        Scene::with_physics(name, PhysicsEngine::new(&self.config.physics))
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the main loop keeps running
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Engine configuration (validated)
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Frame timer
    pub const fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Mutable frame timer, e.g. to change the time scale
    pub fn timer_mut(&mut self) -> &mut Timer {
        &mut self.timer
    }
}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Engine initialization failed
    #[error("Engine initialization failed: {0}")]
    InitializationFailed(String),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::AppError;
    use crate::input::KeyCode;
    use crate::object::GameObject;

    struct CountingApp {
        frames: u32,
        stop_after: u32,
        cleaned: bool,
        jump_seen: bool,
    }

    impl Application for CountingApp {
        fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
            let mut scene = engine.create_scene("test");
            scene.add(GameObject::new("thing"), &mut engine.context);
            engine.scenes.push(scene);
            Ok(())
        }

        fn poll_input(&mut self, engine: &mut Engine) -> Result<(), AppError> {
            if self.frames == 1 {
                engine.handle_event(AppEvent::KeyInput {
                    key: KeyCode::Space,
                    pressed: true,
                });
            }
            Ok(())
        }

        fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
            self.jump_seen |= engine.context.input.is_action_pressed("jump");
            self.frames += 1;
            if self.frames >= self.stop_after {
                engine.quit();
            }
            Ok(())
        }

        fn cleanup(&mut self, _engine: &mut Engine) {
            self.cleaned = true;
        }
    }

    #[test]
    fn test_run_until_quit() {
        let mut config = EngineConfig::default();
        config.performance.fixed_step = true;
        config.performance.target_fps = 60;

        let mut app = CountingApp {
            frames: 0,
            stop_after: 3,
            cleaned: false,
            jump_seen: false,
        };
        Engine::run(config, &mut app).unwrap();

        assert_eq!(app.frames, 3);
        assert!(app.cleaned);
        assert!(app.jump_seen);
    }

    struct FailingApp;

    impl Application for FailingApp {
        fn initialize(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
            Err(AppError::Custom("no level".to_string()))
        }

        fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
            Ok(())
        }

        fn cleanup(&mut self, _engine: &mut Engine) {}
    }

    #[test]
    fn test_initialization_error_propagates() {
        let result = Engine::run(EngineConfig::default(), &mut FailingApp);
        assert!(matches!(result, Err(EngineError::InitializationFailed(_))));
    }
}
