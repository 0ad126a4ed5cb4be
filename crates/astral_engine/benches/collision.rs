//! Collision query benchmarks
use astral_engine::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Flat floor of `cells × cells` quads, two triangles each
fn tessellated_floor(cells: usize, cell_size: f64) -> Vec<Triangle> {
    let half = cells as f64 * cell_size * 0.5;
    let mut triangles = Vec::with_capacity(cells * cells * 2);
    for i in 0..cells {
        for j in 0..cells {
            let x0 = i as f64 * cell_size - half;
            let z0 = j as f64 * cell_size - half;
            let (a, b, c, d) = (
                Vec3::new(x0, 0.0, z0),
                Vec3::new(x0, 0.0, z0 + cell_size),
                Vec3::new(x0 + cell_size, 0.0, z0 + cell_size),
                Vec3::new(x0 + cell_size, 0.0, z0),
            );
            triangles.push(Triangle::new(a, b, c));
            triangles.push(Triangle::new(a, c, d));
        }
    }
    triangles
}

fn bench_resolve_move(c: &mut Criterion) {
    let triangles = tessellated_floor(32, 2.0);
    let radii = Vec3::new(0.5, 1.0, 0.5);

    c.bench_function("resolve_move_floor_2048", |b| {
        b.iter(|| {
            resolve_move(
                black_box(Vec3::new(0.3, 1.5, -0.7)),
                black_box(Vec3::new(2.0, -1.0, 1.0)),
                radii,
                &triangles,
                5,
            )
        });
    });

    let culled = CollisionResolver::new(&triangles)
        .with_culling_sphere(BoundingSphere::new(Vec3::zeros(), 8.0));
    c.bench_function("resolve_move_floor_culled", |b| {
        b.iter(|| culled.resolve_move(black_box(Vec3::new(0.3, 1.5, -0.7)), black_box(Vec3::new(2.0, -1.0, 1.0)), radii));
    });
}

criterion_group!(benches, bench_resolve_move);
criterion_main!(benches);
