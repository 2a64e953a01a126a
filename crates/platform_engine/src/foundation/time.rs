//! Time management utilities

use std::time::{Duration, Instant};

/// Frame timer producing the per-frame delta fed to the scene pipeline.
///
/// Supports a frame-rate cap, a time scale (slow motion, pause) and a fixed
/// step mode used by headless runs and tests.
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    unscaled_delta: f32,
    total_time: f32,
    frame_count: u64,
    time_scale: f32,
    target_frame_time: Option<Duration>,
    fixed_step: Option<f32>,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new uncapped timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            unscaled_delta: 0.0,
            total_time: 0.0,
            frame_count: 0,
            time_scale: 1.0,
            target_frame_time: None,
            fixed_step: None,
        }
    }

    /// Cap the frame rate; zero disables the cap
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_frame_time = (fps > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(fps)));
        self
    }

    /// Report a constant delta every frame instead of measuring wall time
    pub fn with_fixed_step(mut self, step: f32) -> Self {
        if step > 0.0 {
            self.fixed_step = Some(step);
        } else {
            log::warn!("Ignoring non-positive fixed time step {step}");
        }
        self
    }

    /// Update the timer (should be called once per frame) and return the
    /// scaled delta time in seconds
    pub fn update(&mut self) -> f32 {
        let raw = if let Some(step) = self.fixed_step {
            step
        } else {
            if let Some(target) = self.target_frame_time {
                let spent = self.last_frame.elapsed();
                if spent < target {
                    std::thread::sleep(target - spent);
                }
            }
            let now = Instant::now();
            let elapsed = now.duration_since(self.last_frame).as_secs_f32();
            self.last_frame = now;
            elapsed
        };

        self.unscaled_delta = raw;
        self.delta_time = raw * self.time_scale;
        self.total_time += self.delta_time;
        self.frame_count += 1;
        self.delta_time
    }

    /// Get the scaled time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the time since the last frame ignoring the time scale
    pub fn unscaled_delta_time(&self) -> f32 {
        self.unscaled_delta
    }

    /// Get the total scaled time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Current time scale
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Set the time scale; negative values are clamped to zero
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Get the average FPS since timer creation
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}
