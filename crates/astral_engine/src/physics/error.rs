//! Collision query errors

use crate::foundation::math::Vec3;

/// Errors rejected at collision query entry, before any sweeping happens
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CollisionError {
    /// An ellipsoid semi-axis is zero, negative, or not finite
    #[error("ellipsoid radii must all be positive and finite, got {radii:?}")]
    InvalidEllipsoid {
        /// The rejected radii
        radii: Vec3,
    },

    /// A query vector contains NaN or infinity
    #[error("{what} is not finite")]
    NonFiniteInput {
        /// Which input was rejected
        what: &'static str,
    },

    /// Broad-phase culling sphere has a negative or non-finite radius
    #[error("culling sphere radius must be non-negative and finite, got {radius}")]
    InvalidCullingSphere {
        /// The rejected radius
        radius: f64,
    },

    /// Solver configuration out of range
    #[error("invalid collision configuration: {0}")]
    InvalidConfig(String),
}
