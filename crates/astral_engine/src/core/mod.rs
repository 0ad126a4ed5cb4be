//! # Core Engine Module
//!
//! Shared configuration used by the collision core and the level.
//!
//! ## Organization
//!
//! - **Config**: collision tuning and per-level collision settings

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;

// Re-export commonly used config types
pub use config::{
    CollisionConfig,
    LevelSettings,
    Config,
    ConfigError,
};
