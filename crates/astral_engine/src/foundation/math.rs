//! Math utilities and types
//!
//! Provides the double-precision vector type used by the collision core and a
//! plane representation with the signed-distance and facing tests the sweep
//! code relies on.

pub use nalgebra::Vector3;

/// 3D vector type (double precision, value semantics)
pub type Vec3 = Vector3<f64>;

/// Extension trait for `Vec3` with the conventions the collision code expects
pub trait Vec3Ext {
    /// Normalize, leaving a zero-length vector untouched instead of producing NaN
    fn normalized_or_self(&self) -> Vec3;

    /// Rescale to the given length (zero-length vectors stay zero)
    fn with_length(&self, length: f64) -> Vec3;

    /// Divide componentwise by `divisor`
    fn scale_down(&self, divisor: &Vec3) -> Vec3;

    /// Multiply componentwise by `factor`
    fn scale_up(&self, factor: &Vec3) -> Vec3;

    /// True when every component is finite
    fn all_finite(&self) -> bool;
}

impl Vec3Ext for Vec3 {
    fn normalized_or_self(&self) -> Vec3 {
        let mut length = self.magnitude();
        if length == 0.0 {
            length = 1.0;
        }
        self / length
    }

    fn with_length(&self, length: f64) -> Vec3 {
        let current = self.magnitude();
        if current == 0.0 {
            return *self;
        }
        self * (length / current)
    }

    fn scale_down(&self, divisor: &Vec3) -> Vec3 {
        self.component_div(divisor)
    }

    fn scale_up(&self, factor: &Vec3) -> Vec3 {
        self.component_mul(factor)
    }

    fn all_finite(&self) -> bool {
        self.iter().all(|c| c.is_finite())
    }
}

/// A plane in 3D space
///
/// Stores both the point/normal form and the implicit equation
/// `ax + by + cz + d = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// A point lying on the plane
    pub origin: Vec3,
    /// Unit normal of the plane
    pub normal: Vec3,
    /// Implicit equation coefficients `[a, b, c, d]`
    pub equation: [f64; 4],
}

impl Plane {
    /// Create a plane from a point on it and its normal
    pub fn from_origin_normal(origin: Vec3, normal: Vec3) -> Self {
        let d = -normal.dot(&origin);
        Self {
            origin,
            normal,
            equation: [normal.x, normal.y, normal.z, d],
        }
    }

    /// Create a plane from three non-collinear points (counter-clockwise winding)
    pub fn from_points(p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        let normal = (p2 - p1).cross(&(p3 - p1)).normalized_or_self();
        Self::from_origin_normal(p1, normal)
    }

    /// True if the front face of the plane points against `direction`
    pub fn is_front_facing_to(&self, direction: &Vec3) -> bool {
        self.normal.dot(direction) <= 0.0
    }

    /// Signed distance from the plane to `point` (positive on the normal side)
    pub fn signed_distance_to(&self, point: &Vec3) -> f64 {
        point.dot(&self.normal) + self.equation[3]
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f64 = std::f64::consts::PI;

    /// 2 * Pi
    pub const TAU: f64 = 2.0 * PI;
}
