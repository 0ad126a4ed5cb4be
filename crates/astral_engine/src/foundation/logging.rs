//! Logging utilities
//!
//! The library only talks to the `log` facade; binaries and tests pick the
//! backend through these helpers.

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system (panics if a logger is already installed)
pub fn init() {
    env_logger::Builder::from_env(default_env()).init();
}

/// Initialize the logging system, ignoring an already installed logger
///
/// Returns `true` if this call installed the logger.
pub fn try_init() -> bool {
    env_logger::Builder::from_env(default_env())
        .try_init()
        .is_ok()
}

fn default_env() -> env_logger::Env<'static> {
    env_logger::Env::default().default_filter_or("info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_init_is_idempotent() {
        let _ = try_init();
        assert!(!try_init());
        info!("logger installed");
    }
}
