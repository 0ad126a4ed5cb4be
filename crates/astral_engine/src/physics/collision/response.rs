//! Sliding response
//!
//! After the aggregator has found the nearest contact, the sphere is moved up
//! to just short of it and the remaining motion is projected onto the plane
//! tangent to the sphere at the contact point.

use crate::foundation::math::{Plane, Vec3, Vec3Ext};
use super::context::CollisionContext;

/// Result of one slide step (ellipsoid space)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideOutcome {
    /// Where the sphere ends this pass
    pub new_base_point: Vec3,
    /// Remaining motion along the sliding plane
    pub new_velocity: Vec3,
    /// Whether another pass is worth running
    pub recurse: bool,
}

/// Move up to the nearest contact and slide the rest of the way
///
/// `very_close_distance` is the gap kept between the sphere and the contact
/// surface. The context's `contact_point` is pulled back by that gap so the
/// sliding plane stays consistent with the stopped sphere.
pub fn slide(context: &mut CollisionContext, very_close_distance: f64) -> SlideOutcome {
    let destination = context.destination();

    if !context.found_collision {
        return SlideOutcome {
            new_base_point: destination,
            new_velocity: Vec3::zeros(),
            recurse: false,
        };
    }

    let mut new_base_point = context.base_point;
    if context.nearest_distance >= very_close_distance {
        let advance = context
            .sweep_velocity
            .with_length(context.nearest_distance - very_close_distance);
        new_base_point += advance;
        context.contact_point -= context.normalized_sweep_direction * very_close_distance;
    }

    let slide_plane_normal = (new_base_point - context.contact_point).normalized_or_self();
    let slide_plane = Plane::from_origin_normal(context.contact_point, slide_plane_normal);

    let new_destination = destination - slide_plane_normal * slide_plane.signed_distance_to(&destination);
    let new_velocity = new_destination - context.contact_point;

    SlideOutcome {
        new_base_point,
        new_velocity,
        recurse: new_velocity.magnitude() >= very_close_distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::collision::EllipsoidSpace;
    use approx::assert_relative_eq;

    const VERY_CLOSE: f64 = 0.005;
    const EPSILON: f64 = 1e-9;

    fn context(base: Vec3, velocity: Vec3) -> CollisionContext {
        let space = EllipsoidSpace::new(Vec3::new(1.0, 1.0, 1.0)).expect("unit radii");
        CollisionContext::new(&space, base, velocity)
    }

    #[test]
    fn test_no_collision_moves_full_distance() {
        let mut ctx = context(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.5, 0.0, 0.0));
        let outcome = slide(&mut ctx, VERY_CLOSE);
        assert_eq!(outcome.new_base_point, Vec3::new(1.5, 2.0, 3.0));
        assert!(!outcome.recurse);
    }

    #[test]
    fn test_head_on_stops_short() {
        // Floor at y = 0, sphere falling straight down from y = 3
        let mut ctx = context(Vec3::new(0.0, 3.0, 0.0), Vec3::new(0.0, -4.0, 0.0));
        ctx.record_contact(2.0, Vec3::zeros());

        let outcome = slide(&mut ctx, VERY_CLOSE);
        assert_relative_eq!(outcome.new_base_point, Vec3::new(0.0, 1.0 + VERY_CLOSE, 0.0), epsilon = EPSILON);
        // Remaining motion is absorbed by the floor
        assert!(outcome.new_velocity.magnitude() < VERY_CLOSE);
        assert!(!outcome.recurse);
    }

    #[test]
    fn test_oblique_keeps_tangential_motion() {
        // Wall at x = 0, sphere at x = 2 moving diagonally into it
        let mut ctx = context(Vec3::new(2.0, 0.0, 0.0), Vec3::new(-2.0, 0.0, 2.0));
        // Touches after one unit along x, i.e. half the sweep
        let travelled = Vec3::new(-2.0, 0.0, 2.0).magnitude() * 0.5;
        ctx.record_contact(travelled, Vec3::new(0.0, 0.0, 1.0));

        let outcome = slide(&mut ctx, VERY_CLOSE);
        assert!(outcome.recurse);
        assert_relative_eq!(outcome.new_velocity.x, 0.0, epsilon = 1e-2);
        assert!(outcome.new_velocity.z > 0.9);
        assert!(outcome.new_base_point.x >= 1.0);
    }

    #[test]
    fn test_touching_contact_does_not_advance() {
        let mut ctx = context(Vec3::new(0.0, 1.001, 0.0), Vec3::new(0.0, -1.0, 0.0));
        ctx.record_contact(0.001, Vec3::zeros());

        let outcome = slide(&mut ctx, VERY_CLOSE);
        assert_eq!(outcome.new_base_point, Vec3::new(0.0, 1.001, 0.0));
        assert_eq!(ctx.contact_point, Vec3::zeros());
    }
}
