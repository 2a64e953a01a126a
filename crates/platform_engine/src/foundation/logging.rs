//! Logging utilities
//!
//! The engine logs through the `log` facade. Binaries install `env_logger`
//! once at startup; `RUST_LOG` always wins over the configured fallback level.

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system using `RUST_LOG` only
pub fn init() {
    init_with_level("info");
}

/// Initialize the logging system, falling back to `default_level` when
/// `RUST_LOG` is not set.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_with_level(default_level: &str) {
    let env = env_logger::Env::default().default_filter_or(default_level);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}
