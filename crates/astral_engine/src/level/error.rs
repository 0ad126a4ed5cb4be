//! Level editing errors

use crate::config::ConfigError;
use crate::physics::CollisionError;
use super::mesh::TriangleId;

/// Errors raised while building or editing a level
#[derive(thiserror::Error, Debug)]
pub enum LevelError {
    /// No triangle was ever stored under this id
    #[error("unknown triangle {0}")]
    UnknownTriangle(TriangleId),

    /// The triangle has already been tombstoned
    #[error("triangle {0} was already removed")]
    AlreadyRemoved(TriangleId),

    /// A vertex or the normal is not finite
    #[error("triangle has non-finite vertices or normal")]
    InvalidTriangle,

    /// Vertices are collinear or coincident
    #[error("triangle is degenerate")]
    DegenerateTriangle,

    /// Split threshold must be a positive area
    #[error("split area must be positive and finite, got {0}")]
    InvalidSplitArea(f64),

    /// Level settings failed to load or validate
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Collision parameters rejected
    #[error(transparent)]
    Collision(#[from] CollisionError),
}
