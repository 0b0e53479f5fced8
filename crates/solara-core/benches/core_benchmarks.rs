//! Core benchmarks for Solara

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use solara_core::math::{Mat4, Transform, Vec3};

fn mat4_inverse_benchmark(c: &mut Criterion) {
    let m = Transform::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.3, 0.7, -0.2)).matrix();

    c.bench_function("mat4_inverse", |b| {
        b.iter(|| {
            black_box(black_box(&m).inverse());
        });
    });
}

fn transform_matrix_benchmark(c: &mut Criterion) {
    let t = Transform::new(Vec3::new(5.0, 0.0, -1.0), Vec3::new(0.1, 1.2, 0.4));

    c.bench_function("transform_matrix", |b| {
        b.iter(|| {
            black_box(black_box(&t).matrix());
        });
    });
}

fn mat4_transform_point_batch(c: &mut Criterion) {
    let m = Mat4::translation(Vec3::new(1.0, 0.0, 0.0)) * Mat4::rotation_y(0.5);
    let points: Vec<Vec3> = (0..1000)
        .map(|i| {
            let f = i as f32;
            Vec3::new(f * 0.1, f * 0.2, f * 0.3)
        })
        .collect();

    c.bench_function("mat4_transform_point_1000", |b| {
        b.iter(|| {
            for p in &points {
                black_box(m.transform_point(*p));
            }
        });
    });
}

criterion_group!(
    benches,
    mat4_inverse_benchmark,
    transform_matrix_benchmark,
    mat4_transform_point_batch
);

criterion_main!(benches);
