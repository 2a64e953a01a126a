//! 2D camera
//!
//! The camera position is the world coordinate of the viewport's top-left
//! corner. It can follow a target object with exponential smoothing and be
//! kept inside world bounds.

use crate::core::config::CameraConfig;
use crate::foundation::math::{Rect, Vec2};
use crate::object::ObjectId;

/// Distance under which a following camera snaps onto its target
const SNAP_DISTANCE: f32 = 0.5;

/// Side-scrolling camera
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec2,
    viewport: Vec2,
    limit_bounds: Option<Rect>,
    target: Option<ObjectId>,
    smooth_speed: f32,
}

impl Camera {
    /// Create a camera for a viewport size
    pub fn new(viewport: Vec2) -> Self {
        Self {
            position: Vec2::zeros(),
            viewport,
            limit_bounds: None,
            target: None,
            smooth_speed: 0.0,
        }
    }

    /// Create a camera from configuration
    pub fn from_config(viewport: Vec2, config: &CameraConfig) -> Self {
        let mut camera = Self::new(viewport);
        camera.smooth_speed = config.smooth_speed.max(0.0);
        camera.limit_bounds = config.limit_bounds;
        camera
    }

    /// World position of the viewport's top-left corner
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Move to a position, respecting bounds
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.clamp_position();
    }

    /// Move by an offset, respecting bounds
    pub fn move_by(&mut self, offset: Vec2) {
        self.set_position(self.position + offset);
    }

    /// Viewport size
    pub const fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Restrict the camera to world bounds
    pub fn set_limit_bounds(&mut self, bounds: Option<Rect>) {
        self.limit_bounds = bounds;
        self.clamp_position();
    }

    /// Object the camera follows
    pub const fn target(&self) -> Option<ObjectId> {
        self.target
    }

    /// Follow an object, or stop following with `None`
    pub fn set_target(&mut self, target: Option<ObjectId>) {
        self.target = target;
    }

    /// Smoothing factor per second; zero snaps
    pub fn set_smooth_speed(&mut self, speed: f32) {
        self.smooth_speed = speed.max(0.0);
    }

    /// Center the camera on a target world position, smoothly if configured
    pub fn update(&mut self, delta_time: f32, target_position: Option<Vec2>) {
        let Some(focus) = target_position else {
            return;
        };

        let desired = focus - self.viewport * 0.5;
        let next = if self.smooth_speed > 0.0 {
            let t = (self.smooth_speed * delta_time).clamp(0.0, 1.0);
            let blended = self.position.lerp(&desired, t);
            if (desired - blended).norm() < SNAP_DISTANCE {
                desired
            } else {
                blended
            }
        } else {
            desired
        };
        self.set_position(next);
    }

    /// Convert a world position to screen space
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.position
    }

    /// Convert a world position to screen space for a layer that scrolls at
    /// `factor` times the camera speed
    pub fn world_to_screen_with_parallax(&self, world: Vec2, factor: Vec2) -> Vec2 {
        world - self.position.component_mul(&factor)
    }

    /// Convert a screen position to world space
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen + self.position
    }

    /// World-space rectangle currently in view
    pub fn view_rect(&self) -> Rect {
        Rect::new(self.position, self.viewport)
    }

    fn clamp_position(&mut self) {
        let Some(bounds) = self.limit_bounds else {
            return;
        };
        let min = bounds.position;
        let max = Vec2::new(
            (bounds.right() - self.viewport.x).max(min.x),
            (bounds.bottom() - self.viewport.y).max(min.y),
        );
        self.position = Vec2::new(
            self.position.x.clamp(min.x, max.x),
            self.position.y.clamp(min.y, max.y),
        );
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec2::new(640.0, 360.0))
    }
}
