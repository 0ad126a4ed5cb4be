//! # Level
//!
//! A level owns the static collision geometry and the parameters of the
//! ellipsoid that moves through it. Callers move entities through the
//! [`CollisionWorld`] trait and never touch the collision core directly.
//!
//! ## Organization
//!
//! - **Mesh**: [`TriangleArena`] with stable ids, tombstones, splitting
//! - **Error**: [`LevelError`]

pub mod error;
pub mod mesh;

use std::path::Path;

use crate::config::Config;
use crate::core::config::LevelSettings;
use crate::foundation::math::{Vec3, Vec3Ext};
use crate::physics::{BoundingSphere, CollisionError, CollisionResolver, EllipsoidSpace, Triangle};

pub use error::LevelError;
pub use mesh::{TriangleArena, TriangleId};

/// Something an ellipsoid can be moved through
///
/// Implementors supply the geometry and ellipsoid; positions and
/// displacements are in world space.
pub trait CollisionWorld {
    /// Final position after moving from `position` by `delta`
    fn resolve_move(&self, position: Vec3, delta: Vec3) -> Result<Vec3, CollisionError>;

    /// Final position after one gravity step from `position`
    fn resolve_gravity_move(&self, position: Vec3) -> Result<Vec3, CollisionError>;

    /// Displacement actually applied when moving by `delta`
    fn resolve_move_delta(&self, position: Vec3, delta: Vec3) -> Result<Vec3, CollisionError> {
        Ok(self.resolve_move(position, delta)? - position)
    }

    /// Displacement actually applied by one gravity step
    fn resolve_gravity_delta(&self, position: Vec3) -> Result<Vec3, CollisionError> {
        Ok(self.resolve_gravity_move(position)? - position)
    }
}

/// Static level geometry plus its collision settings
#[derive(Debug, Clone, Default)]
pub struct Level {
    arena: TriangleArena,
    settings: LevelSettings,
}

impl Level {
    /// Create an empty level with validated settings
    pub fn new(settings: LevelSettings) -> Result<Self, LevelError> {
        settings.validate()?;
        Ok(Self {
            arena: TriangleArena::new(),
            settings,
        })
    }

    /// Create an empty level with settings read from a `.toml` or `.ron` file
    pub fn from_settings_file(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let settings = LevelSettings::load_from_file(path)?;
        Self::new(settings)
    }

    /// The level's collision settings
    pub fn settings(&self) -> &LevelSettings {
        &self.settings
    }

    /// Read access to the geometry
    pub fn arena(&self) -> &TriangleArena {
        &self.arena
    }

    /// Add an obstacle triangle under `group`
    pub fn add_triangle(&mut self, triangle: Triangle, group: u32) -> Result<TriangleId, LevelError> {
        self.arena.insert(triangle, group)
    }

    /// Remove an obstacle triangle
    pub fn remove_triangle(&mut self, id: TriangleId) -> Result<(), LevelError> {
        self.arena.remove(id)
    }

    /// Split triangles larger than `max_area`, see [`TriangleArena::split_triangles`]
    pub fn split_triangles(&mut self, max_area: f64, recursive: bool) -> Result<usize, LevelError> {
        self.arena.split_triangles(max_area, recursive)
    }

    /// Semi-axes of the moving ellipsoid
    pub fn ellipsoid(&self) -> Vec3 {
        self.settings.ellipsoid_radii
    }

    /// Replace the ellipsoid; radii must be positive and finite
    pub fn set_ellipsoid(&mut self, radii: Vec3) -> Result<(), LevelError> {
        EllipsoidSpace::new(radii)?;
        self.settings.ellipsoid_radii = radii;
        Ok(())
    }

    /// Convenience for a sphere of the given radius
    pub fn set_sphere(&mut self, radius: f64) -> Result<(), LevelError> {
        self.set_ellipsoid(Vec3::new(radius, radius, radius))
    }

    /// Displacement of one gravity step
    pub fn gravity(&self) -> Vec3 {
        self.settings.gravity
    }

    /// Replace the gravity vector
    pub fn set_gravity(&mut self, gravity: Vec3) -> Result<(), LevelError> {
        if !gravity.all_finite() {
            return Err(CollisionError::NonFiniteInput { what: "gravity" }.into());
        }
        self.settings.gravity = gravity;
        Ok(())
    }

    /// Whether gravity steps move at all
    pub fn gravity_enabled(&self) -> bool {
        self.settings.gravity_enabled
    }

    /// Turn gravity on or off
    pub fn set_gravity_enabled(&mut self, enabled: bool) {
        self.settings.gravity_enabled = enabled;
    }

    /// Restrict collision to triangles inside `sphere`, or lift the restriction
    pub fn set_culling_sphere(&mut self, sphere: Option<BoundingSphere>) -> Result<(), LevelError> {
        if let Some(sphere) = &sphere {
            if !sphere.is_valid() {
                return Err(CollisionError::InvalidCullingSphere { radius: sphere.radius }.into());
            }
        }
        self.settings.culling_sphere = sphere;
        Ok(())
    }

    /// Resolver over the current geometry and settings
    pub fn resolver(&self) -> CollisionResolver<'_> {
        let resolver = CollisionResolver::new(self.arena.triangles()).with_config(self.settings.collision);
        match self.settings.culling_sphere {
            Some(sphere) => resolver.with_culling_sphere(sphere),
            None => resolver,
        }
    }
}

impl CollisionWorld for Level {
    fn resolve_move(&self, position: Vec3, delta: Vec3) -> Result<Vec3, CollisionError> {
        self.resolver().resolve_move(position, delta, self.settings.ellipsoid_radii)
    }

    fn resolve_gravity_move(&self, position: Vec3) -> Result<Vec3, CollisionError> {
        if !self.settings.gravity_enabled {
            return Ok(position);
        }
        self.resolver()
            .resolve_gravity(position, self.settings.gravity, self.settings.ellipsoid_radii)
    }
}
