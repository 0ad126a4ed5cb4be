//! # Astral Engine
//!
//! Swept-ellipsoid collision detection and sliding response against static
//! triangle geometry.
//!
//! ## Features
//!
//! - **Ellipsoid Sweeps**: Continuous collision of a moving ellipsoid, no tunnelling
//! - **Sliding Response**: Multi-surface sliding within a single tick
//! - **Level Geometry**: Triangle arena with tombstones, grouping and splitting
//! - **Configuration**: TOML and RON level settings
//! - **Parallel Aggregation**: Optional `rayon` per-triangle sweep (`parallel` feature)
//!
//! ## Quick Start
//!
//! ```rust
//! use astral_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut level = Level::new(LevelSettings::default())?;
//!     level.add_triangle(
//!         Triangle::new(
//!             Vec3::new(-10.0, 0.0, -10.0),
//!             Vec3::new(0.0, 0.0, 10.0),
//!             Vec3::new(10.0, 0.0, -10.0),
//!         ),
//!         0,
//!     )?;
//!
//!     let position = level.resolve_move(Vec3::new(0.0, 3.0, 0.0), Vec3::new(0.0, -5.0, 0.0))?;
//!     assert!(position.y >= 1.0);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;
pub mod foundation;
pub mod physics;
pub mod level;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::config::{CollisionConfig, LevelSettings},
        config::{Config, ConfigError},
        foundation::math::{Plane, Vec3, Vec3Ext},
        level::{CollisionWorld, Level, LevelError, TriangleArena, TriangleId},
        physics::{
            resolve_gravity, resolve_gravity_delta, resolve_move, resolve_move_delta, BoundingSphere,
            CollisionError, CollisionResolver, MoveOutcome, Triangle,
        },
    };
}
