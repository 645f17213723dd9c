//! Contact layer benchmarks.
//!
//! Run all:    cargo bench --bench contact_bench
//! Filter:     cargo bench --bench contact_bench -- collide

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use phys_contact::collision::{collide_polygons, Manifold};
use phys_contact::math::{Transform, Vector2};
use phys_contact::shapes::{CircleShape, PolygonShape};
use phys_contact::{Body, BodyType, ContactWorld, FixtureDef};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

fn setup_pyramid(rows: usize) -> ContactWorld {
    let mut world = ContactWorld::new();

    let ground = world.create_body(Body::new(Transform::from_position(Vector2::zero()), BodyType::Static));
    world
        .create_fixture(ground, FixtureDef::new(PolygonShape::new_box(rows as f32 + 5.0, 0.5)))
        .unwrap();

    for row in 0..rows {
        let y = 0.99 + row as f32 * 0.99;
        let start = -((rows - row) as f32) * 0.5;
        for column in 0..(rows - row) {
            let x = start + column as f32 * 1.01;
            let body = world.create_body(Body::new(Transform::from_position(Vector2::new(x, y)), BodyType::Dynamic));
            world
                .create_fixture(body, FixtureDef::new(PolygonShape::new_box(0.5, 0.5)))
                .unwrap();
        }
    }

    world
}

fn setup_circle_pile(n: usize) -> ContactWorld {
    let mut world = ContactWorld::new();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..n {
        let position = Vector2::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
        let body = world.create_body(Body::new(Transform::from_position(position), BodyType::Dynamic));
        world
            .create_fixture(body, FixtureDef::new(CircleShape::new(rng.gen_range(0.3..0.8))))
            .unwrap();
    }

    world
}

fn bench_find_new_contacts(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_new_contacts/circle_pile");
    for &n in &[50, 100, 200] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || setup_circle_pile(n),
                |mut world| world.find_new_contacts().unwrap(),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_collide(c: &mut Criterion) {
    let mut group = c.benchmark_group("collide/pyramid");
    for &rows in &[5, 10, 20] {
        let mut world = setup_pyramid(rows);
        world.find_new_contacts().unwrap();
        world.config_mut().allow_sleeping = false;

        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, _| {
            b.iter(|| world.collide(None).unwrap());
        });
    }
    group.finish();
}

fn bench_islands(c: &mut Criterion) {
    let mut world = setup_pyramid(10);
    world.find_new_contacts().unwrap();
    world.collide(None).unwrap();

    c.bench_function("build_islands/pyramid_10", |b| {
        b.iter(|| world.build_islands().unwrap());
    });
}

fn bench_polygon_manifold(c: &mut Criterion) {
    let block = PolygonShape::new_box(0.5, 0.5);
    let xf_a = Transform::from_position(Vector2::zero());
    let xf_b = Transform::from_position_angle(Vector2::new(0.1, 0.95), 0.05);
    let mut manifold = Manifold::new();

    c.bench_function("narrowphase/polygon_polygon", |b| {
        b.iter(|| collide_polygons(&mut manifold, black_box(&block), &xf_a, black_box(&block), &xf_b));
    });
}

criterion_group!(
    benches,
    bench_find_new_contacts,
    bench_collide,
    bench_islands,
    bench_polygon_manifold
);
criterion_main!(benches);
