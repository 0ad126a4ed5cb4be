//! # Collision Configuration
//!
//! Settings structures for the collision core and for levels that own
//! collision geometry. Both are serializable (TOML, RON) through the
//! [`Config`] trait and carry defaults matching the engine's historical
//! behaviour.

use serde::{Serialize, Deserialize};

use crate::foundation::math::Vec3;
use crate::physics::collision::BoundingSphere;

pub use crate::config::{Config, ConfigError};

/// Default number of slide passes after the first one
pub const DEFAULT_MAX_RECURSION_DEPTH: u32 = 5;

/// Default world units per meter
pub const DEFAULT_UNITS_PER_METER: f64 = 100.0;

/// # Collision Configuration
///
/// Tuning for the swept-ellipsoid solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// World units per meter; scales the contact tolerance
    pub units_per_meter: f64,
    /// Maximum number of additional slide passes per query
    pub max_recursion_depth: u32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            units_per_meter: DEFAULT_UNITS_PER_METER,
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
        }
    }
}

impl CollisionConfig {
    /// Create a config with the given recursion bound and default scale
    pub fn with_max_depth(max_recursion_depth: u32) -> Self {
        Self {
            max_recursion_depth,
            ..Self::default()
        }
    }

    /// Distance (in ellipsoid space) under which the sphere counts as touching
    pub fn very_close_distance(&self) -> f64 {
        let unit_scale = self.units_per_meter / 100.0;
        0.005 * unit_scale
    }
}

impl Config for CollisionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.units_per_meter.is_finite() && self.units_per_meter > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "units_per_meter must be positive, got {}",
                self.units_per_meter
            )));
        }
        Ok(())
    }
}

/// # Level Settings
///
/// Collision parameters owned by a level: the ellipsoid that moves through
/// it, gravity, and the optional broad-phase culling sphere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelSettings {
    /// Semi-axes of the colliding ellipsoid (x, y, z)
    pub ellipsoid_radii: Vec3,
    /// Displacement applied per gravity query
    pub gravity: Vec3,
    /// Whether gravity queries move at all
    pub gravity_enabled: bool,
    /// Only triangles fully inside this sphere are tested when set
    pub culling_sphere: Option<BoundingSphere>,
    /// Solver tuning
    pub collision: CollisionConfig,
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            ellipsoid_radii: Vec3::new(1.0, 1.0, 1.0),
            gravity: Vec3::zeros(),
            gravity_enabled: false,
            culling_sphere: None,
            collision: CollisionConfig::default(),
        }
    }
}

impl Config for LevelSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        self.collision.validate()?;

        if !self.ellipsoid_radii.iter().all(|r| r.is_finite() && *r > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "ellipsoid radii must be positive, got {:?}",
                self.ellipsoid_radii
            )));
        }
        if let Some(sphere) = &self.culling_sphere {
            if !sphere.is_valid() {
                return Err(ConfigError::Invalid(format!(
                    "culling sphere needs a finite center and a non-negative radius, got {:?}",
                    sphere
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_tolerance() {
        let config = CollisionConfig::default();
        assert_eq!(config.max_recursion_depth, 5);
        assert_relative_eq!(config.very_close_distance(), 0.005, epsilon = 1e-15);

        let config = CollisionConfig { units_per_meter: 1.0, ..CollisionConfig::default() };
        assert_relative_eq!(config.very_close_distance(), 0.00005, epsilon = 1e-15);
    }

    #[test]
    fn test_level_settings_from_toml() {
        let settings = LevelSettings::from_toml_str(
            r#"
            ellipsoid_radii = [0.5, 1.0, 0.5]
            gravity = [0.0, -0.2, 0.0]
            gravity_enabled = true

            [collision]
            max_recursion_depth = 3
            "#,
        )
        .expect("valid settings");

        assert_eq!(settings.ellipsoid_radii, Vec3::new(0.5, 1.0, 0.5));
        assert_eq!(settings.gravity, Vec3::new(0.0, -0.2, 0.0));
        assert!(settings.gravity_enabled);
        assert!(settings.culling_sphere.is_none());
        assert_eq!(settings.collision.max_recursion_depth, 3);
        assert_relative_eq!(settings.collision.units_per_meter, 100.0);
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        let result = LevelSettings::from_toml_str("ellipsoid_radii = [0.5, 0.0, 0.5]");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_bad_culling_sphere() {
        let mut settings = LevelSettings {
            culling_sphere: Some(BoundingSphere::new(Vec3::new(0.0, f64::INFINITY, 0.0), 10.0)),
            ..LevelSettings::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid(_))));

        settings.culling_sphere = Some(BoundingSphere::new(Vec3::zeros(), -1.0));
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid(_))));

        settings.culling_sphere = Some(BoundingSphere::new(Vec3::zeros(), 10.0));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_units() {
        let result = CollisionConfig::from_toml_str("units_per_meter = -1.0");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_file_roundtrip_toml_and_ron() {
        let dir = tempfile::tempdir().expect("temp dir");
        let settings = LevelSettings {
            ellipsoid_radii: Vec3::new(0.4, 0.9, 0.4),
            gravity: Vec3::new(0.0, -1.0, 0.0),
            gravity_enabled: true,
            culling_sphere: Some(BoundingSphere::new(Vec3::new(1.0, 2.0, 3.0), 25.0)),
            collision: CollisionConfig::with_max_depth(4),
        };

        for name in ["level.toml", "level.ron"] {
            let path = dir.path().join(name);
            settings.save_to_file(&path).expect("save");
            let loaded = LevelSettings::load_from_file(&path).expect("load");
            assert_eq!(loaded, settings);
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("level.json");
        let result = LevelSettings::default().save_to_file(&path);
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
