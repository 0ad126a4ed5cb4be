//! Per-query collision working state

use crate::foundation::math::{Vec3, Vec3Ext};
use super::ellipsoid::EllipsoidSpace;

/// Mutable working state of one movement query
///
/// Created fresh by the driver for every top-level query and dropped when
/// the query returns. Everything except the `world_*` fields and
/// `ellipsoid_radii` is expressed in ellipsoid space.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionContext {
    /// Semi-axes of the colliding ellipsoid
    pub ellipsoid_radii: Vec3,
    /// Query start position in world space
    pub world_position: Vec3,
    /// Requested displacement in world space
    pub world_velocity: Vec3,
    /// Current sweep displacement (ellipsoid space)
    pub sweep_velocity: Vec3,
    /// Unit direction of `sweep_velocity`, zero for a zero sweep
    pub normalized_sweep_direction: Vec3,
    /// Current sweep origin (ellipsoid space)
    pub base_point: Vec3,
    /// Set by aggregation when any triangle was touched this pass
    pub found_collision: bool,
    /// Distance travelled along the sweep before the nearest contact
    pub nearest_distance: f64,
    /// Nearest contact point (ellipsoid space)
    pub contact_point: Vec3,
}

impl CollisionContext {
    /// Build the context for a query, converting inputs into ellipsoid space
    pub fn new(space: &EllipsoidSpace, world_position: Vec3, world_velocity: Vec3) -> Self {
        let mut context = Self {
            ellipsoid_radii: space.radii(),
            world_position,
            world_velocity,
            sweep_velocity: Vec3::zeros(),
            normalized_sweep_direction: Vec3::zeros(),
            base_point: Vec3::zeros(),
            found_collision: false,
            nearest_distance: 0.0,
            contact_point: Vec3::zeros(),
        };
        context.begin_pass(space.to_ellipsoid(&world_position), space.to_ellipsoid(&world_velocity));
        context
    }

    /// Start a new aggregation pass from `base_point` along `velocity`
    pub fn begin_pass(&mut self, base_point: Vec3, velocity: Vec3) {
        self.base_point = base_point;
        self.sweep_velocity = velocity;
        self.normalized_sweep_direction = velocity.normalized_or_self();
        self.found_collision = false;
        self.nearest_distance = 0.0;
        self.contact_point = Vec3::zeros();
    }

    /// Keep `point` as the contact if it is nearer than the current one
    ///
    /// Returns `true` when the contact was taken.
    pub fn record_contact(&mut self, distance: f64, point: Vec3) -> bool {
        if !self.found_collision || distance < self.nearest_distance {
            self.found_collision = true;
            self.nearest_distance = distance;
            self.contact_point = point;
            return true;
        }
        false
    }

    /// Where the current pass would end without obstacles
    pub fn destination(&self) -> Vec3 {
        self.base_point + self.sweep_velocity
    }
}
