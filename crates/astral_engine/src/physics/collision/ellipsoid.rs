//! Ellipsoid space transform
//!
//! Dividing every coordinate by the ellipsoid's radii turns the moving
//! ellipsoid into a unit sphere. All sweep math runs in that space; the
//! radii are the only bridge back to world coordinates.

use crate::foundation::math::{Vec3, Vec3Ext};
use crate::physics::error::CollisionError;
use super::primitives::Triangle;

/// Componentwise scale between world space and ellipsoid (unit sphere) space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipsoidSpace {
    radii: Vec3,
}

impl EllipsoidSpace {
    /// Create the transform for an ellipsoid with the given semi-axes
    pub fn new(radii: Vec3) -> Result<Self, CollisionError> {
        if !radii.iter().all(|r| r.is_finite() && *r > 0.0) {
            return Err(CollisionError::InvalidEllipsoid { radii });
        }
        Ok(Self { radii })
    }

    /// The ellipsoid semi-axes
    pub fn radii(&self) -> Vec3 {
        self.radii
    }

    /// World point or vector into ellipsoid space
    pub fn to_ellipsoid(&self, v: &Vec3) -> Vec3 {
        v.scale_down(&self.radii)
    }

    /// Ellipsoid-space point or vector back into world space
    pub fn to_world(&self, v: &Vec3) -> Vec3 {
        v.scale_up(&self.radii)
    }

    /// Carry a world-space triangle into ellipsoid space
    ///
    /// The normal goes through the inverse transpose of the scale so the
    /// plane stays exact for non-uniform radii.
    pub fn transform_triangle(&self, triangle: &Triangle) -> EllipsoidTriangle {
        EllipsoidTriangle {
            p1: self.to_ellipsoid(&triangle.a),
            p2: self.to_ellipsoid(&triangle.b),
            p3: self.to_ellipsoid(&triangle.c),
            normal: triangle.normal.scale_up(&self.radii).normalized_or_self(),
        }
    }
}

/// A triangle already scaled into ellipsoid space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipsoidTriangle {
    /// First vertex
    pub p1: Vec3,
    /// Second vertex
    pub p2: Vec3,
    /// Third vertex
    pub p3: Vec3,
    /// Unit plane normal in ellipsoid space
    pub normal: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rejects_bad_radii() {
        for radii in [
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, 1.0, f64::NAN),
            Vec3::new(1.0, f64::INFINITY, 1.0),
        ] {
            assert!(matches!(
                EllipsoidSpace::new(radii),
                Err(CollisionError::InvalidEllipsoid { .. })
            ));
        }
    }

    #[test]
    fn test_roundtrip() {
        let space = EllipsoidSpace::new(Vec3::new(0.5, 1.0, 2.0)).expect("valid radii");
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_relative_eq!(space.to_ellipsoid(&p), Vec3::new(2.0, 2.0, 1.5), epsilon = 1e-12);
        assert_relative_eq!(space.to_world(&space.to_ellipsoid(&p)), p, epsilon = 1e-12);
    }

    #[test]
    fn test_triangle_normal_stays_on_plane() {
        // Tilted plane x + y = 1
        let tri = Triangle::new(
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 1.0),
        );
        let space = EllipsoidSpace::new(Vec3::new(0.5, 2.0, 1.0)).expect("valid radii");
        let scaled = space.transform_triangle(&tri);

        // The scaled normal must be perpendicular to the scaled edges
        assert_relative_eq!(scaled.normal.dot(&(scaled.p2 - scaled.p1)), 0.0, epsilon = 1e-12);
        assert_relative_eq!(scaled.normal.dot(&(scaled.p3 - scaled.p1)), 0.0, epsilon = 1e-12);
        assert_relative_eq!(scaled.normal.magnitude(), 1.0, epsilon = 1e-12);
        // And keep the same orientation as the geometric normal of the scaled vertices
        let geometric = (scaled.p2 - scaled.p1).cross(&(scaled.p3 - scaled.p1));
        assert!(geometric.dot(&scaled.normal) > 0.0);
    }
}
