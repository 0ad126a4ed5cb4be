//! Headless walkthrough demo
//!
//! Builds a small procedural level (floor, ramp, and a concave corner made of
//! two walls) and walks an ellipsoid through it for a fixed number of ticks,
//! applying gravity after every step. Positions are logged each tick.
//!
//! Usage: `walkthrough [settings.toml|settings.ron]`

use astral_engine::foundation::logging;
use astral_engine::prelude::*;

const TICKS: usize = 120;
const WALK_SPEED: f64 = 0.25;
const MAX_TRIANGLE_AREA: f64 = 50.0;

#[derive(thiserror::Error, Debug)]
enum WalkthroughError {
    #[error("level setup failed: {0}")]
    Level(#[from] LevelError),

    #[error("collision query failed: {0}")]
    Collision(#[from] CollisionError),
}

struct WalkthroughApp {
    level: Level,
    position: Vec3,
    heading: Vec3,
}

impl WalkthroughApp {
    fn new(settings_path: Option<String>) -> Result<Self, WalkthroughError> {
        let mut level = match settings_path {
            Some(path) => {
                log::info!("Loading level settings from {}", path);
                Level::from_settings_file(path)?
            }
            None => {
                let settings = LevelSettings {
                    ellipsoid_radii: Vec3::new(0.5, 1.0, 0.5),
                    gravity: Vec3::new(0.0, -0.2, 0.0),
                    gravity_enabled: true,
                    ..LevelSettings::default()
                };
                Level::new(settings)?
            }
        };

        build_level(&mut level)?;
        let added = level.split_triangles(MAX_TRIANGLE_AREA, true)?;
        log::info!(
            "Level ready: {} live triangles ({} from splitting) in {} groups",
            level.arena().live_count(),
            added,
            level.arena().group_index().len()
        );
        if let Some(bounds) = level.arena().bounds() {
            log::info!("Level bounds: center {:?}, radius {:.2}", bounds.center, bounds.radius);
        }

        Ok(Self {
            level,
            position: Vec3::new(-8.0, 3.0, -8.0),
            heading: Vec3::new(1.0, 0.0, 1.0).normalized_or_self(),
        })
    }

    fn tick(&mut self, tick: usize) -> Result<(), WalkthroughError> {
        let desired = self.heading * WALK_SPEED;
        let moved = self.level.resolve_move_delta(self.position, desired)?;
        self.position += moved;
        self.position = self.level.resolve_gravity_move(self.position)?;

        // Blocked: turn a quarter to the left and keep walking
        if moved.magnitude() < WALK_SPEED * 0.1 {
            self.heading = Vec3::new(self.heading.z, 0.0, -self.heading.x);
            log::info!("Tick {}: blocked, turning to {:?}", tick, self.heading);
        }

        log::info!(
            "Tick {}: position ({:.3}, {:.3}, {:.3})",
            tick,
            self.position.x,
            self.position.y,
            self.position.z
        );
        Ok(())
    }

    fn run(&mut self) -> Result<(), WalkthroughError> {
        for tick in 0..TICKS {
            self.tick(tick)?;
        }
        Ok(())
    }
}

/// Floor, a ramp rising towards +x, and two walls meeting in a corner
fn build_level(level: &mut Level) -> Result<(), LevelError> {
    const FLOOR: u32 = 0;
    const RAMP: u32 = 1;
    const WALLS: u32 = 2;

    let size = 20.0;

    quad(
        level,
        Vec3::new(-size, 0.0, -size),
        Vec3::new(-size, 0.0, size),
        Vec3::new(size, 0.0, size),
        Vec3::new(size, 0.0, -size),
        FLOOR,
    )?;

    // Ramp from x = 0 (floor height) up to x = 6 at height 3
    quad(
        level,
        Vec3::new(0.0, 0.0, -4.0),
        Vec3::new(0.0, 0.0, 4.0),
        Vec3::new(6.0, 3.0, 4.0),
        Vec3::new(6.0, 3.0, -4.0),
        RAMP,
    )?;

    // Wall at x = 12 facing -x
    quad(
        level,
        Vec3::new(12.0, 0.0, -size),
        Vec3::new(12.0, 0.0, size),
        Vec3::new(12.0, 6.0, size),
        Vec3::new(12.0, 6.0, -size),
        WALLS,
    )?;

    // Wall at z = 12 facing -z, closing the corner
    quad(
        level,
        Vec3::new(-size, 0.0, 12.0),
        Vec3::new(-size, 6.0, 12.0),
        Vec3::new(size, 6.0, 12.0),
        Vec3::new(size, 0.0, 12.0),
        WALLS,
    )?;

    Ok(())
}

/// Two triangles `abc` and `acd` sharing the winding of the quad
fn quad(level: &mut Level, a: Vec3, b: Vec3, c: Vec3, d: Vec3, group: u32) -> Result<(), LevelError> {
    level.add_triangle(Triangle::new(a, b, c), group)?;
    level.add_triangle(Triangle::new(a, c, d), group)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    log::info!("Starting Astral walkthrough");

    let settings_path = std::env::args().nth(1);
    let mut app = WalkthroughApp::new(settings_path)?;

    match app.run() {
        Ok(()) => {
            log::info!("Walkthrough finished at {:?}", app.position);
            Ok(())
        }
        Err(e) => {
            log::error!("Walkthrough failed: {:?}", e);
            Err(e.into())
        }
    }
}
