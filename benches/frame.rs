//! Benchmarks for the per-frame CPU work.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;

use liqmesh::input::InputSnapshot;
use liqmesh::{Engine, LiquidMesh, ParticleField};

fn snapshot() -> InputSnapshot {
    InputSnapshot {
        pointer: Vec2::new(0.3, -0.2),
        scroll: 0.5,
    }
}

fn bench_mesh_deform(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh_deform");

    for subdivisions in [2u32, 3, 4] {
        let mut mesh = LiquidMesh::icosphere(1.0, subdivisions);
        group.bench_with_input(
            BenchmarkId::from_parameter(mesh.vertex_count()),
            &subdivisions,
            |b, _| {
                let mut t = 0.0f32;
                b.iter(|| {
                    t += 1.0 / 60.0;
                    mesh.deform(black_box(t), snapshot());
                })
            },
        );
    }

    group.finish();
}

fn bench_particle_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("particle_step");

    for count in [150usize, 1_000, 10_000] {
        let mut field = ParticleField::with_seed(count, 7);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            let mut t = 0.0f32;
            b.iter(|| {
                t += 1.0 / 60.0;
                field.step(black_box(t), snapshot());
            })
        });
    }

    group.finish();
}

fn bench_full_frame(c: &mut Criterion) {
    let mut engine = Engine::new().with_seed(7);

    c.bench_function("full_frame_default", |b| {
        let mut t = 0.0f32;
        b.iter(|| {
            t += 1.0 / 60.0;
            engine.frame(black_box(t), 1.0 / 60.0);
        })
    });
}

criterion_group!(
    benches,
    bench_mesh_deform,
    bench_particle_step,
    bench_full_frame
);
criterion_main!(benches);
