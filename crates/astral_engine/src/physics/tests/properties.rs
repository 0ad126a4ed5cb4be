//! Properties every query must satisfy regardless of geometry

use super::{floor, unit_radii, wall};
use crate::foundation::math::Vec3;
use crate::physics::{resolve_gravity_delta, resolve_move, CollisionResolver, Triangle};
use approx::assert_relative_eq;

#[test]
fn test_no_obstacles_moves_exactly() {
    let start = Vec3::new(0.25, -3.0, 7.5);
    let delta = Vec3::new(1.0, 2.0, -0.125);

    let end = resolve_move(start, delta, unit_radii(), &[], 5).expect("valid query");
    assert_eq!(end, start + delta);

    // Geometry far from the path does not change the result either
    let far_floor = {
        let mut tri = floor();
        for v in [&mut tri.a, &mut tri.b, &mut tri.c] {
            v.y -= 50.0;
        }
        tri
    };
    let end = resolve_move(start, delta, unit_radii(), &[far_floor], 5).expect("valid query");
    assert_eq!(end, start + delta);
}

#[test]
fn test_never_penetrates_floor() {
    let triangles = [floor()];
    let start = Vec3::new(0.0, 1.5, 0.0);

    for delta in [
        Vec3::new(5.0, -3.0, 0.0),
        Vec3::new(0.0, -10.0, 2.0),
        Vec3::new(-1.0, -0.2, 7.0),
        Vec3::new(0.3, -0.6, -0.1),
        Vec3::new(0.0, -0.5, 0.0),
    ] {
        let end = resolve_move(start, delta, unit_radii(), &triangles, 5).expect("valid query");
        assert!(end.y >= 1.0 - 1e-9, "delta {delta:?} ended at {end:?}");
    }
}

#[test]
fn test_parallel_motion_is_untouched() {
    let triangles = [floor()];
    let start = Vec3::new(0.0, 1.5, 0.0);
    let delta = Vec3::new(4.0, 0.0, -3.0);

    let end = resolve_move(start, delta, unit_radii(), &triangles, 5).expect("valid query");
    assert_eq!(end, start + delta);
}

#[test]
fn test_zero_request_returns_start() {
    let triangles = [floor(), wall()];
    let start = Vec3::new(1.2, 1.1, 0.0);

    let outcome = CollisionResolver::new(&triangles)
        .resolve(start, Vec3::zeros(), Vec3::new(0.5, 1.0, 0.5))
        .expect("valid query");
    assert_eq!(outcome.position, start);
    assert_eq!(outcome.passes, 0);
}

#[test]
fn test_resting_on_floor_is_stable() {
    let triangles = [floor()];
    let gravity = Vec3::new(0.0, -0.5, 0.0);
    let mut position = Vec3::new(0.0, 3.0, 0.0);

    for _ in 0..20 {
        position += resolve_gravity_delta(position, gravity, unit_radii(), &triangles, 5).expect("valid query");
    }
    assert!(position.y >= 1.0);

    let settled = resolve_gravity_delta(position, gravity, unit_radii(), &triangles, 5).expect("valid query");
    assert!(settled.magnitude() < 0.01);
    assert_relative_eq!(position.x, 0.0, epsilon = 1e-9);
}

#[test]
fn test_back_facing_geometry_is_ignored() {
    // Floor seen from below: moving up through it is unobstructed
    let triangles = [floor()];
    let start = Vec3::new(0.0, -3.0, 0.0);
    let delta = Vec3::new(0.0, 6.0, 0.0);

    let end = resolve_move(start, delta, unit_radii(), &triangles, 5).expect("valid query");
    assert_eq!(end, start + delta);
}

#[test]
fn test_removed_triangles_do_not_collide() {
    let mut tri: Triangle = wall();
    tri.valid = false;
    let start = Vec3::new(5.0, 0.0, 0.0);
    let delta = Vec3::new(-10.0, 0.0, 0.0);

    let end = resolve_move(start, delta, unit_radii(), &[tri], 5).expect("valid query");
    assert_eq!(end, start + delta);
}
