//! Swept ellipsoid collision detection
//!
//! The moving body is an ellipsoid. Every query is carried into ellipsoid
//! space, where the body becomes a unit sphere, swept against each obstacle
//! triangle, and carried back.
//!
//! # Module Organization
//!
//! - [`primitives`] - Obstacle triangles and bounding spheres (world space)
//! - [`ellipsoid`] - World to ellipsoid space transform
//! - [`context`] - Per-query working state
//! - [`sweep`] - Swept unit sphere vs triangle, quadratic root solver
//! - [`response`] - Slide along the contact plane
//!
//! # Key Types
//!
//! - [`Triangle`], [`BoundingSphere`] - Geometry supplied by the caller
//! - [`EllipsoidSpace`] - Validated radii and the scale they imply
//! - [`CollisionContext`] - State threaded through one query

pub mod primitives;
pub mod ellipsoid;
pub mod context;
pub mod sweep;
pub mod response;

// Re-export commonly used types
pub use primitives::{BoundingSphere, Triangle};
pub use ellipsoid::{EllipsoidSpace, EllipsoidTriangle};
pub use context::CollisionContext;
pub use sweep::{check_triangle, lowest_root, ContactKind, SweepHit};
pub use response::{slide, SlideOutcome};
