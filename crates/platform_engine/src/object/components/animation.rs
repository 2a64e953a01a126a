//! Animation component
//!
//! Named frame animations. The current frame is pushed to the sibling
//! sprite every update. Playing the animation that is already running is a
//! no-op, so states may call [`AnimationComponent::play`] on every entry
//! without restarting it.

use std::collections::HashMap;

use crate::core::context::FrameContext;
use crate::foundation::math::utils;
use crate::object::{Component, GameObject};

use super::SpriteComponent;

/// Frame length used when a clip is given an unusable one
pub const DEFAULT_FRAME_DURATION: f32 = 0.1;

/// A strip of frames on the owner's sprite texture.
///
/// Built only through [`Animation::looping`] and [`Animation::once`], which
/// guarantee at least one frame and a finite positive frame duration.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    first_frame: u32,
    frame_count: u32,
    frame_duration: f32,
    looping: bool,
}

impl Animation {
    /// Looping animation
    pub fn looping(first_frame: u32, frame_count: u32, frame_duration: f32) -> Self {
        if frame_count == 0 {
            log::warn!("Animation at frame {first_frame} has no frames, using 1");
        }
        let frame_duration = if utils::is_positive_finite(frame_duration) {
            frame_duration
        } else {
            log::warn!("Invalid frame duration {frame_duration}, using {DEFAULT_FRAME_DURATION}");
            DEFAULT_FRAME_DURATION
        };
        Self {
            first_frame,
            frame_count: frame_count.max(1),
            frame_duration,
            looping: true,
        }
    }

    /// Animation that stops on its last frame
    pub fn once(first_frame: u32, frame_count: u32, frame_duration: f32) -> Self {
        Self {
            looping: false,
            ..Self::looping(first_frame, frame_count, frame_duration)
        }
    }

    /// First frame index
    pub const fn first_frame(&self) -> u32 {
        self.first_frame
    }

    /// Number of frames, at least 1
    pub const fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Seconds per frame
    pub const fn frame_duration(&self) -> f32 {
        self.frame_duration
    }

    /// Restarts after the last frame
    pub const fn is_looping(&self) -> bool {
        self.looping
    }

    /// Total length in seconds
    #[allow(clippy::cast_precision_loss)]
    pub fn duration(&self) -> f32 {
        self.frame_count as f32 * self.frame_duration
    }
}

/// Plays named animations on the owner's sprite
#[derive(Debug, Clone, Default)]
pub struct AnimationComponent {
    animations: HashMap<String, Animation>,
    current: Option<String>,
    elapsed: f32,
    finished: bool,
    remove_on_finish: bool,
}

impl AnimationComponent {
    /// Create an empty animation set
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an animation (builder style)
    #[must_use]
    pub fn with_animation(mut self, name: impl Into<String>, animation: Animation) -> Self {
        self.add_animation(name, animation);
        self
    }

    /// Flag the owner for removal when a non-looping animation ends
    /// (explosions, pickups)
    #[must_use]
    pub const fn remove_on_finish(mut self) -> Self {
        self.remove_on_finish = true;
        self
    }

    /// Register or replace an animation
    pub fn add_animation(&mut self, name: impl Into<String>, animation: Animation) {
        self.animations.insert(name.into(), animation);
    }

    /// Start an animation. Returns false for unknown names.
    pub fn play(&mut self, name: &str) -> bool {
        if self.current.as_deref() == Some(name) {
            return true;
        }
        if !self.animations.contains_key(name) {
            log::warn!("Unknown animation '{name}'");
            return false;
        }
        self.current = Some(name.to_string());
        self.elapsed = 0.0;
        self.finished = false;
        true
    }

    /// Name of the running animation
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// True once a non-looping animation has shown its last frame
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Frame index for the running animation
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn current_frame(&self) -> Option<u32> {
        let animation = self.animations.get(self.current.as_deref()?)?;
        let step = (self.elapsed / animation.frame_duration) as u32;
        let index = if animation.looping {
            step % animation.frame_count
        } else {
            step.min(animation.frame_count - 1)
        };
        Some(animation.first_frame + index)
    }

    fn advance(&mut self, delta_time: f32) {
        let Some(animation) = self.current.as_deref().and_then(|name| self.animations.get(name)) else {
            return;
        };
        if self.finished {
            return;
        }

        self.elapsed += delta_time;
        if animation.looping {
            self.elapsed %= animation.duration();
        } else if self.elapsed >= animation.duration() {
            self.finished = true;
        }
    }
}

impl Component for AnimationComponent {
    fn init(&mut self, owner: &mut GameObject, _ctx: &mut FrameContext<'_>) {
        if !owner.has::<SpriteComponent>() {
            log::warn!("Animation on '{}' has no sprite to drive", owner.name());
        }
    }

    fn update(&mut self, delta_time: f32, owner: &mut GameObject, _ctx: &mut FrameContext<'_>) {
        self.advance(delta_time);

        if let (Some(frame), Some(sprite)) = (self.current_frame(), owner.get_mut::<SpriteComponent>()) {
            sprite.set_frame(frame);
        }
        if self.finished && self.remove_on_finish {
            owner.mark_for_removal();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animations() -> AnimationComponent {
        AnimationComponent::new()
            .with_animation("idle", Animation::looping(0, 4, 0.1))
            .with_animation("hurt", Animation::once(10, 2, 0.1))
    }

    #[test]
    fn test_play_same_name_keeps_progress() {
        let mut anim = animations();
        assert!(anim.play("idle"));
        anim.advance(0.25);
        assert_eq!(anim.current_frame(), Some(2));
        assert!(anim.play("idle"));
        assert_eq!(anim.current_frame(), Some(2));
    }

    #[test]
    fn test_degenerate_clips_are_corrected() {
        let empty = Animation::looping(3, 0, 0.0);
        assert_eq!(empty.frame_count(), 1);
        assert!((empty.frame_duration() - DEFAULT_FRAME_DURATION).abs() < f32::EPSILON);
        let nan = Animation::once(0, 2, f32::NAN);
        assert!((nan.frame_duration() - DEFAULT_FRAME_DURATION).abs() < f32::EPSILON);
        assert!(!nan.is_looping());

        let mut anim = AnimationComponent::new()
            .with_animation("still", empty)
            .with_animation("blink", Animation::once(5, 0, -1.0));
        anim.play("still");
        anim.advance(1.0);
        assert_eq!(anim.current_frame(), Some(3));
        anim.play("blink");
        anim.advance(1.0);
        assert_eq!(anim.current_frame(), Some(5));
        assert!(anim.is_finished());
    }

    #[test]
    fn test_unknown_animation() {
        let mut anim = animations();
        assert!(!anim.play("swim"));
        assert_eq!(anim.current(), None);
        assert_eq!(anim.current_frame(), None);
    }

    #[test]
    fn test_looping_wraps() {
        let mut anim = animations();
        anim.play("idle");
        anim.advance(0.45);
        assert_eq!(anim.current_frame(), Some(0));
        assert!(!anim.is_finished());
    }

    #[test]
    fn test_once_finishes_on_last_frame() {
        let mut anim = animations();
        anim.play("hurt");
        anim.advance(0.15);
        assert_eq!(anim.current_frame(), Some(11));
        assert!(!anim.is_finished());
        anim.advance(0.1);
        assert!(anim.is_finished());
        assert_eq!(anim.current_frame(), Some(11));
    }
}
