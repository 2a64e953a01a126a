//! Math utilities and types
//!
//! Screen-space conventions: the y axis grows downward, so "up" is negative y
//! and gravity is a positive y acceleration.

use serde::{Deserialize, Serialize};

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Axis-aligned rectangle described by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub position: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    /// Create a rectangle from its corner and size
    pub const fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    /// Left edge
    pub fn left(&self) -> f32 {
        self.position.x
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.position.x + self.size.x
    }

    /// Top edge
    pub fn top(&self) -> f32 {
        self.position.y
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.y
    }

    /// Check if two rectangles overlap (touching edges do not count)
    pub fn intersects(&self, other: &Self) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Check if a point lies inside the rectangle
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }
}

/// Anchor used to place a sprite or collider relative to the owner's position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Alignment {
    /// Position is the top-left corner
    #[default]
    TopLeft,
    /// Position is the middle of the top edge
    TopCenter,
    /// Position is the top-right corner
    TopRight,
    /// Position is the middle of the left edge
    CenterLeft,
    /// Position is the center
    Center,
    /// Position is the middle of the right edge
    CenterRight,
    /// Position is the bottom-left corner
    BottomLeft,
    /// Position is the middle of the bottom edge (feet of a character)
    BottomCenter,
    /// Position is the bottom-right corner
    BottomRight,
}

impl Alignment {
    /// Offset from the owner's position to the top-left corner of a box of
    /// the given (already scaled) size.
    pub fn offset(self, size: Vec2) -> Vec2 {
        let (fx, fy) = match self {
            Self::TopLeft => (0.0, 0.0),
            Self::TopCenter => (0.5, 0.0),
            Self::TopRight => (1.0, 0.0),
            Self::CenterLeft => (0.0, 0.5),
            Self::Center => (0.5, 0.5),
            Self::CenterRight => (1.0, 0.5),
            Self::BottomLeft => (0.0, 1.0),
            Self::BottomCenter => (0.5, 1.0),
            Self::BottomRight => (1.0, 1.0),
        };
        Vec2::new(-size.x * fx, -size.y * fy)
    }
}

/// Common math utilities
pub mod utils {
    /// Linear interpolation between two values
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Clamp a value symmetrically to `[-limit, limit]`
    pub fn clamp_abs(value: f32, limit: f32) -> f32 {
        value.clamp(-limit, limit)
    }

    /// True for finite values above zero; NaN and infinities are rejected
    pub fn is_positive_finite(value: f32) -> bool {
        value.is_finite() && value > 0.0
    }
}
