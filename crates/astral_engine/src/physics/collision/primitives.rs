//! Primitive collision shapes
//!
//! Triangles are the obstacle geometry consumed by the sweep test; bounding
//! spheres are used as the optional broad-phase cull.

use serde::{Serialize, Deserialize};

use crate::foundation::math::{Vec3, Vec3Ext};

/// Squared cross-product length below which a triangle counts as degenerate
const DEGENERATE_EPSILON: f64 = 1e-12;

/// A bounding sphere for broad-phase culling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f64,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// True if the center is finite and the radius finite and non-negative
    pub fn is_valid(&self) -> bool {
        self.center.all_finite() && self.radius.is_finite() && self.radius >= 0.0
    }

    /// True if `point` lies strictly inside the sphere
    pub fn contains_point(&self, point: &Vec3) -> bool {
        (self.center - point).magnitude_squared() < self.radius * self.radius
    }

    /// True if all three vertices of `triangle` lie strictly inside the sphere
    pub fn contains_triangle(&self, triangle: &Triangle) -> bool {
        self.contains_point(&triangle.a)
            && self.contains_point(&triangle.b)
            && self.contains_point(&triangle.c)
    }

    /// Sphere enclosing all `points`, centred on their axis-aligned bounds
    ///
    /// Not the minimal sphere, but always contains every point.
    pub fn enclosing<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let (mut min, mut max) = (first, first);
        let mut all = vec![first];
        for p in iter {
            min = min.inf(p);
            max = max.sup(p);
            all.push(*p);
        }

        let center = (min + max) * 0.5;
        let radius = all
            .iter()
            .map(|p| (p - center).magnitude())
            .fold(0.0_f64, f64::max);
        Some(Self { center, radius })
    }
}

/// A triangle for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex in world space
    pub a: Vec3,
    /// Second vertex
    pub b: Vec3,
    /// Third vertex
    pub c: Vec3,
    /// Unit face normal (counter-clockwise winding)
    pub normal: Vec3,
    /// Tombstone flag: only valid triangles take part in collision
    pub valid: bool,
}

impl Triangle {
    /// Creates a new triangle, computing its normal from the winding
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        let normal = (b - a).cross(&(c - a)).normalized_or_self();
        Self::with_normal(a, b, c, normal)
    }

    /// Creates a triangle with a caller-supplied normal
    pub fn with_normal(a: Vec3, b: Vec3, c: Vec3, normal: Vec3) -> Self {
        Self {
            a,
            b,
            c,
            normal,
            valid: true,
        }
    }

    /// Recompute the normal from the vertices
    pub fn compute_normal(&mut self) {
        self.normal = (self.b - self.a).cross(&(self.c - self.a)).normalized_or_self();
    }

    /// Surface area
    pub fn area(&self) -> f64 {
        (self.b - self.a).cross(&(self.c - self.a)).magnitude() * 0.5
    }

    /// True for collinear or coincident vertices
    pub fn is_degenerate(&self) -> bool {
        (self.b - self.a).cross(&(self.c - self.a)).magnitude_squared() < DEGENERATE_EPSILON
    }

    /// The three vertices in winding order
    pub fn vertices(&self) -> [Vec3; 3] {
        [self.a, self.b, self.c]
    }

    /// Calculates the centroid (center point) of the triangle
    pub fn centroid(&self) -> Vec3 {
        (self.a + self.b + self.c) / 3.0
    }
}
