//! Scenario tests for the collision core
//!
//! Whole queries against small hand-built meshes, checked against the
//! positions the sliding response is expected to settle at.

mod properties;

use crate::foundation::math::Vec3;
use crate::physics::Triangle;

/// Large floor in the plane y = 0, facing up
pub(super) fn floor() -> Triangle {
    Triangle::new(
        Vec3::new(-100.0, 0.0, -100.0),
        Vec3::new(0.0, 0.0, 100.0),
        Vec3::new(100.0, 0.0, -100.0),
    )
}

/// Large wall in the plane x = 0, facing +x
pub(super) fn wall() -> Triangle {
    Triangle::new(
        Vec3::new(0.0, -100.0, -100.0),
        Vec3::new(0.0, 100.0, 0.0),
        Vec3::new(0.0, -100.0, 100.0),
    )
}

/// Ramp in the plane x + y = 0, facing (1, 1, 0)
pub(super) fn ramp() -> Triangle {
    Triangle::new(
        Vec3::new(-50.0, 50.0, -50.0),
        Vec3::new(0.0, 0.0, 50.0),
        Vec3::new(50.0, -50.0, -50.0),
    )
}

pub(super) fn unit_radii() -> Vec3 {
    Vec3::new(1.0, 1.0, 1.0)
}
