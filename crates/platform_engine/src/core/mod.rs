//! # Core Engine Module
//!
//! Shared abstractions that every per-frame call depends on.
//!
//! ## Organization
//!
//! - **Config**: Engine configuration (window, timing, physics, camera, input)
//! - **Context**: The bundle of collaborators handed to every capability

pub mod config;
pub mod context;

pub use config::{
    CameraConfig, Config, ConfigError, EngineConfig, PerformanceConfig, PhysicsConfig,
    WindowConfig,
};
pub use context::{Context, FrameContext};
