//! Swept unit sphere vs triangle
//!
//! The narrow phase of the collision core. A unit sphere centred at
//! `base_point` moves along `sweep_velocity`; [`check_triangle`] reports the
//! earliest parameter `t` in `[0, 1]` at which it touches a triangle, first
//! against the face interior and then against the three vertices and the
//! three edges.

use crate::foundation::math::{constants::TAU, Plane, Vec3, Vec3Ext};
use super::context::CollisionContext;
use super::ellipsoid::EllipsoidTriangle;

/// Tolerance on the angle sum used by [`point_in_triangle`]
const ANGLE_SUM_TOLERANCE: f64 = 0.005;

/// Leading coefficients this small relative to `|b| + |c|` are treated as zero
const LEADING_COEFFICIENT_EPSILON: f64 = f64::EPSILON;

/// Which feature of the triangle the sphere touched first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactKind {
    /// Interior of the face
    Face,
    /// One of the three corners
    Vertex,
    /// One of the three edges
    Edge,
}

/// First contact of a sweep against one triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    /// Sweep parameter of first contact, in `[0, 1]`
    pub time: f64,
    /// Contact point on the triangle (ellipsoid space)
    pub point: Vec3,
    /// Feature that was touched
    pub kind: ContactKind,
}

/// Smallest root of `a·x² + b·x + c = 0` in the open interval `(0, max)`
///
/// Returns `None` for a negative discriminant, a near-zero `a`, or when
/// neither root falls in range. `a` is compared against the other two
/// coefficients, so the result does not depend on the scale of the inputs.
pub fn lowest_root(a: f64, b: f64, c: f64, max: f64) -> Option<f64> {
    if a.abs() <= LEADING_COEFFICIENT_EPSILON * (b.abs() + c.abs()) {
        return None;
    }

    let determinant = b * b - 4.0 * a * c;
    if determinant < 0.0 {
        return None;
    }

    let sqrt_d = determinant.sqrt();
    let mut r1 = (-b - sqrt_d) / (2.0 * a);
    let mut r2 = (-b + sqrt_d) / (2.0 * a);
    if r1 > r2 {
        std::mem::swap(&mut r1, &mut r2);
    }

    if r1 > 0.0 && r1 < max {
        return Some(r1);
    }
    if r2 > 0.0 && r2 < max {
        return Some(r2);
    }
    None
}

/// Angle-sum test for a point assumed to lie in the triangle's plane
pub fn point_in_triangle(point: &Vec3, p1: &Vec3, p2: &Vec3, p3: &Vec3) -> bool {
    let to1 = (p1 - point).normalized_or_self();
    let to2 = (p2 - point).normalized_or_self();
    let to3 = (p3 - point).normalized_or_self();

    let angle = |u: &Vec3, v: &Vec3| u.dot(v).clamp(-1.0, 1.0).acos();
    let total = angle(&to1, &to2) + angle(&to2, &to3) + angle(&to3, &to1);

    (total - TAU).abs() < ANGLE_SUM_TOLERANCE
}

/// Sweep the context's unit sphere against `triangle`
///
/// Returns the earliest contact or `None` if the sphere misses, moves away
/// from the front face, or travels parallel to the plane more than one
/// radius away from it.
pub fn check_triangle(context: &CollisionContext, triangle: &EllipsoidTriangle) -> Option<SweepHit> {
    let plane = Plane::from_origin_normal(triangle.p1, triangle.normal);
    if !plane.is_front_facing_to(&context.normalized_sweep_direction) {
        return None;
    }

    let base = context.base_point;
    let velocity = context.sweep_velocity;

    let signed_distance = plane.signed_distance_to(&base);
    let normal_dot_velocity = plane.normal.dot(&velocity);

    let embedded_in_plane = normal_dot_velocity == 0.0;
    let t0 = if embedded_in_plane {
        if signed_distance.abs() >= 1.0 {
            return None;
        }
        // Sphere overlaps the plane for the whole sweep
        0.0
    } else {
        let mut t0 = (-1.0 - signed_distance) / normal_dot_velocity;
        let mut t1 = (1.0 - signed_distance) / normal_dot_velocity;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        if t0 > 1.0 || t1 < 0.0 {
            return None;
        }
        t0.clamp(0.0, 1.0)
    };

    if !embedded_in_plane {
        let plane_intersection = base - plane.normal + velocity * t0;
        if point_in_triangle(&plane_intersection, &triangle.p1, &triangle.p2, &triangle.p3) {
            return Some(SweepHit {
                time: t0,
                point: plane_intersection,
                kind: ContactKind::Face,
            });
        }
    }

    let mut hit: Option<SweepHit> = None;
    let mut t = 1.0;
    let velocity_sq = velocity.magnitude_squared();

    for vertex in [triangle.p1, triangle.p2, triangle.p3] {
        let b = 2.0 * velocity.dot(&(base - vertex));
        let c = (vertex - base).magnitude_squared() - 1.0;
        if let Some(root) = lowest_root(velocity_sq, b, c, t) {
            t = root;
            hit = Some(SweepHit {
                time: root,
                point: vertex,
                kind: ContactKind::Vertex,
            });
        }
    }

    for (start, end) in [
        (triangle.p1, triangle.p2),
        (triangle.p2, triangle.p3),
        (triangle.p3, triangle.p1),
    ] {
        let edge = end - start;
        let base_to_vertex = start - base;
        let edge_sq = edge.magnitude_squared();
        let edge_dot_velocity = edge.dot(&velocity);
        let edge_dot_base_to_vertex = edge.dot(&base_to_vertex);

        let a = edge_sq * -velocity_sq + edge_dot_velocity * edge_dot_velocity;
        let b = edge_sq * (2.0 * velocity.dot(&base_to_vertex))
            - 2.0 * edge_dot_velocity * edge_dot_base_to_vertex;
        let c = edge_sq * (1.0 - base_to_vertex.magnitude_squared())
            + edge_dot_base_to_vertex * edge_dot_base_to_vertex;

        if let Some(root) = lowest_root(a, b, c, t) {
            // Position of the contact along the segment
            let f = (edge_dot_velocity * root - edge_dot_base_to_vertex) / edge_sq;
            if (0.0..=1.0).contains(&f) {
                t = root;
                hit = Some(SweepHit {
                    time: root,
                    point: start + edge * f,
                    kind: ContactKind::Edge,
                });
            }
        }
    }

    hit
}
