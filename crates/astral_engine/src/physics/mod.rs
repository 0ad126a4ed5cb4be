//! Physics module for collision detection and response
//!
//! Swept ellipsoid vs static triangle mesh collision with sliding response.
//! The entry points are [`CollisionResolver`] and the `resolve_*` free
//! functions; the building blocks live in [`collision`].

pub mod collision;
pub mod collision_system;
pub mod error;

#[cfg(test)]
mod tests;

pub use collision::{
    BoundingSphere,
    CollisionContext,
    ContactKind,
    EllipsoidSpace,
    Triangle,
};
pub use collision_system::{
    find_nearest_contact,
    resolve_gravity,
    resolve_gravity_delta,
    resolve_move,
    resolve_move_delta,
    CollisionResolver,
    MoveOutcome,
};
pub use error::CollisionError;
