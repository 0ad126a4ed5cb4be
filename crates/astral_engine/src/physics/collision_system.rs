//! Collision query driver
//!
//! Ties the collision core together: the aggregator sweeps the ellipsoid
//! against every triangle and keeps the nearest contact, and the resolver
//! repeats aggregate-then-slide passes until the remaining motion becomes
//! negligible or the pass budget runs out.
//!
//! Queries are pure with respect to the triangle slice. Independent queries
//! may run concurrently against the same geometry.

use crate::core::config::CollisionConfig;
use crate::foundation::math::{Vec3, Vec3Ext};
use crate::physics::collision::{
    check_triangle, slide, BoundingSphere, CollisionContext, ContactKind, EllipsoidSpace, SweepHit,
    Triangle,
};
use crate::physics::error::CollisionError;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Sweep the context against `triangles` and record the nearest contact
///
/// Tombstoned triangles are skipped. With a culling sphere only triangles
/// whose three world-space vertices lie strictly inside it are tested.
/// Equal distances keep the earliest triangle in slice order. Returns the
/// kind of the recorded contact.
pub fn find_nearest_contact(
    context: &mut CollisionContext,
    space: &EllipsoidSpace,
    triangles: &[Triangle],
    culling_sphere: Option<&BoundingSphere>,
) -> Option<ContactKind> {
    let hit = nearest_hit(context, space, triangles, culling_sphere)?;
    let speed = context.sweep_velocity.magnitude();
    context.record_contact(hit.time * speed, hit.point);
    Some(hit.kind)
}

fn is_candidate(triangle: &Triangle, culling_sphere: Option<&BoundingSphere>) -> bool {
    triangle.valid && culling_sphere.map_or(true, |sphere| sphere.contains_triangle(triangle))
}

/// Meshes smaller than this are swept on the calling thread
#[cfg(feature = "parallel")]
const PARALLEL_MIN_TRIANGLES: usize = 256;

#[cfg(not(feature = "parallel"))]
fn nearest_hit(
    context: &CollisionContext,
    space: &EllipsoidSpace,
    triangles: &[Triangle],
    culling_sphere: Option<&BoundingSphere>,
) -> Option<SweepHit> {
    nearest_hit_sequential(context, space, triangles, culling_sphere)
}

#[cfg(feature = "parallel")]
fn nearest_hit(
    context: &CollisionContext,
    space: &EllipsoidSpace,
    triangles: &[Triangle],
    culling_sphere: Option<&BoundingSphere>,
) -> Option<SweepHit> {
    if triangles.len() < PARALLEL_MIN_TRIANGLES {
        return nearest_hit_sequential(context, space, triangles, culling_sphere);
    }
    nearest_hit_parallel(context, space, triangles, culling_sphere)
}

fn nearest_hit_sequential(
    context: &CollisionContext,
    space: &EllipsoidSpace,
    triangles: &[Triangle],
    culling_sphere: Option<&BoundingSphere>,
) -> Option<SweepHit> {
    triangles
        .iter()
        .filter(|triangle| is_candidate(triangle, culling_sphere))
        .filter_map(|triangle| check_triangle(context, &space.transform_triangle(triangle)))
        .fold(None, |nearest: Option<SweepHit>, hit| match nearest {
            Some(best) if best.time <= hit.time => Some(best),
            _ => Some(hit),
        })
}

#[cfg(feature = "parallel")]
fn nearest_hit_parallel(
    context: &CollisionContext,
    space: &EllipsoidSpace,
    triangles: &[Triangle],
    culling_sphere: Option<&BoundingSphere>,
) -> Option<SweepHit> {
    triangles
        .par_iter()
        .enumerate()
        .filter(|(_, triangle)| is_candidate(triangle, culling_sphere))
        .filter_map(|(index, triangle)| {
            check_triangle(context, &space.transform_triangle(triangle)).map(|hit| (index, hit))
        })
        .reduce_with(|a, b| {
            // Order by time, then by slice position, so the result matches the sequential scan
            if b.1.time < a.1.time || (b.1.time == a.1.time && b.0 < a.0) {
                b
            } else {
                a
            }
        })
        .map(|(_, hit)| hit)
}

/// Result of a resolved movement query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    /// Final world-space position
    pub position: Vec3,
    /// Aggregation passes run (0 for a zero request)
    pub passes: u32,
    /// Whether any pass touched geometry
    pub collided: bool,
    /// Whether the pass budget ran out while motion remained
    pub depth_exhausted: bool,
}

impl MoveOutcome {
    /// Displacement actually applied, given the query's start position
    pub fn delta_from(&self, start: &Vec3) -> Vec3 {
        self.position - start
    }
}

/// Resolves ellipsoid movement against a borrowed triangle slice
///
/// ```
/// use astral_engine::physics::{CollisionResolver, Triangle};
/// use astral_engine::foundation::math::Vec3;
///
/// let floor = [Triangle::new(
///     Vec3::new(-10.0, 0.0, -10.0),
///     Vec3::new(0.0, 0.0, 10.0),
///     Vec3::new(10.0, 0.0, -10.0),
/// )];
/// let resolver = CollisionResolver::new(&floor);
/// let end = resolver
///     .resolve_move(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, -5.0, 0.0), Vec3::new(1.0, 1.0, 1.0))
///     .unwrap();
/// assert!(end.y >= 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct CollisionResolver<'a> {
    triangles: &'a [Triangle],
    config: CollisionConfig,
    culling_sphere: Option<BoundingSphere>,
}

impl<'a> CollisionResolver<'a> {
    /// Create a resolver with the default configuration and no culling
    pub fn new(triangles: &'a [Triangle]) -> Self {
        Self {
            triangles,
            config: CollisionConfig::default(),
            culling_sphere: None,
        }
    }

    /// Replace the solver configuration
    pub fn with_config(mut self, config: CollisionConfig) -> Self {
        self.config = config;
        self
    }

    /// Bound the number of additional slide passes
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.config.max_recursion_depth = max_depth;
        self
    }

    /// Only test triangles fully inside `sphere`
    pub fn with_culling_sphere(mut self, sphere: BoundingSphere) -> Self {
        self.culling_sphere = Some(sphere);
        self
    }

    /// The active configuration
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// The triangles queries run against
    pub fn triangles(&self) -> &'a [Triangle] {
        self.triangles
    }

    fn validate(&self, position: &Vec3, delta: &Vec3) -> Result<(), CollisionError> {
        if !position.all_finite() {
            return Err(CollisionError::NonFiniteInput { what: "position" });
        }
        if !delta.all_finite() {
            return Err(CollisionError::NonFiniteInput { what: "displacement" });
        }
        if let Some(sphere) = &self.culling_sphere {
            if !sphere.is_valid() {
                return Err(CollisionError::InvalidCullingSphere { radius: sphere.radius });
            }
        }
        let units = self.config.units_per_meter;
        if !(units.is_finite() && units > 0.0) {
            return Err(CollisionError::InvalidConfig(format!(
                "units_per_meter must be positive, got {units}"
            )));
        }
        Ok(())
    }

    /// Move an ellipsoid with semi-axes `radii` from `position` by `delta`
    ///
    /// Runs at most `max_recursion_depth + 1` aggregation passes. Running out
    /// of passes is not an error: the position reached so far is returned
    /// and `depth_exhausted` is set.
    pub fn resolve(&self, position: Vec3, delta: Vec3, radii: Vec3) -> Result<MoveOutcome, CollisionError> {
        let space = EllipsoidSpace::new(radii)?;
        self.validate(&position, &delta)?;

        if delta == Vec3::zeros() {
            return Ok(MoveOutcome {
                position,
                passes: 0,
                collided: false,
                depth_exhausted: false,
            });
        }

        let very_close = self.config.very_close_distance();
        let max_depth = self.config.max_recursion_depth;
        let culling_sphere = self.culling_sphere.as_ref();

        let mut context = CollisionContext::new(&space, position, delta);
        let mut depth = 0;
        let mut collided = false;
        let mut depth_exhausted = false;

        let final_base_point = loop {
            let kind = find_nearest_contact(&mut context, &space, self.triangles, culling_sphere);
            log::trace!(
                "collision pass {}: base {:?} velocity {:?} contact {:?} at {}",
                depth,
                context.base_point,
                context.sweep_velocity,
                kind,
                context.nearest_distance
            );

            if !context.found_collision && depth == 0 {
                // Untouched request: hand back the exact target
                return Ok(MoveOutcome {
                    position: position + delta,
                    passes: 1,
                    collided: false,
                    depth_exhausted: false,
                });
            }
            collided |= context.found_collision;

            let outcome = slide(&mut context, very_close);
            if !outcome.recurse {
                break outcome.new_base_point;
            }
            if depth >= max_depth {
                log::debug!(
                    "collision pass budget of {} exhausted with {:?} motion left",
                    max_depth + 1,
                    outcome.new_velocity
                );
                depth_exhausted = true;
                break outcome.new_base_point;
            }

            depth += 1;
            context.begin_pass(outcome.new_base_point, outcome.new_velocity);
        };

        Ok(MoveOutcome {
            position: space.to_world(&final_base_point),
            passes: depth + 1,
            collided,
            depth_exhausted,
        })
    }

    /// Final position after moving from `position` by `delta`
    pub fn resolve_move(&self, position: Vec3, delta: Vec3, radii: Vec3) -> Result<Vec3, CollisionError> {
        Ok(self.resolve(position, delta, radii)?.position)
    }

    /// Displacement actually applied when moving from `position` by `delta`
    pub fn resolve_move_delta(&self, position: Vec3, delta: Vec3, radii: Vec3) -> Result<Vec3, CollisionError> {
        Ok(self.resolve_move(position, delta, radii)? - position)
    }

    /// Final position after applying `gravity` as a displacement
    pub fn resolve_gravity(&self, position: Vec3, gravity: Vec3, radii: Vec3) -> Result<Vec3, CollisionError> {
        self.resolve_move(position, gravity, radii)
    }

    /// Displacement actually applied by `gravity`
    pub fn resolve_gravity_delta(&self, position: Vec3, gravity: Vec3, radii: Vec3) -> Result<Vec3, CollisionError> {
        self.resolve_move_delta(position, gravity, radii)
    }
}

/// Final position of an ellipsoid moved from `position` by `desired_delta`
pub fn resolve_move(
    position: Vec3,
    desired_delta: Vec3,
    radii: Vec3,
    triangles: &[Triangle],
    max_depth: u32,
) -> Result<Vec3, CollisionError> {
    CollisionResolver::new(triangles)
        .with_max_depth(max_depth)
        .resolve_move(position, desired_delta, radii)
}

/// Displacement actually applied; `resolve_move(..) - position`
pub fn resolve_move_delta(
    position: Vec3,
    desired_delta: Vec3,
    radii: Vec3,
    triangles: &[Triangle],
    max_depth: u32,
) -> Result<Vec3, CollisionError> {
    CollisionResolver::new(triangles)
        .with_max_depth(max_depth)
        .resolve_move_delta(position, desired_delta, radii)
}

/// Same as [`resolve_move`] with the gravity vector as the displacement
pub fn resolve_gravity(
    position: Vec3,
    gravity: Vec3,
    radii: Vec3,
    triangles: &[Triangle],
    max_depth: u32,
) -> Result<Vec3, CollisionError> {
    resolve_move(position, gravity, radii, triangles, max_depth)
}

/// Same as [`resolve_move_delta`] with the gravity vector as the displacement
pub fn resolve_gravity_delta(
    position: Vec3,
    gravity: Vec3,
    radii: Vec3,
    triangles: &[Triangle],
    max_depth: u32,
) -> Result<Vec3, CollisionError> {
    resolve_move_delta(position, gravity, radii, triangles, max_depth)
}
