//! Criterion benchmarks for floor picking and geometry.
//!
//! Benchmarks:
//!   - hover pick over a demo table and over empty floor
//!   - building the part list for one table
//!
//! Run with: cargo bench -p rendering --bench pick_bench

use bevy::math::bounding::Aabb3d;
use bevy::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rendering::camera::FloorCamera;
use rendering::geometry::{build_table_model, top_bounds, TABLE_TOP_HEIGHT};
use rendering::picking::TablePicker;
use reservations::FloorLayout;

// ---------------------------------------------------------------------------
// Benchmark: hover picking
// ---------------------------------------------------------------------------

fn bench_hover_pick(c: &mut Criterion) {
    let mut group = c.benchmark_group("hover_pick");

    let (tables, _) = FloorLayout::demo().into_resources();
    let bounds: Vec<(String, Aabb3d)> = tables
        .0
        .iter()
        .map(|t| (t.id.clone(), top_bounds(t)))
        .collect();
    let camera = FloorCamera::new(Vec2::new(1280.0, 720.0));
    let over_table = tables
        .get("13")
        .and_then(|t| camera.pixel_of(Vec3::new(t.x, TABLE_TOP_HEIGHT, t.y)))
        .unwrap_or(Vec2::new(640.0, 360.0));

    group.bench_function("over_table", |b| {
        let mut picker = TablePicker::default();
        b.iter(|| {
            let targets = bounds.iter().map(|(id, aabb)| (id.as_str(), aabb));
            black_box(picker.pointer_moved(&camera, black_box(over_table), targets))
        });
    });

    group.bench_function("empty_floor", |b| {
        let mut picker = TablePicker::default();
        b.iter(|| {
            let targets = bounds.iter().map(|(id, aabb)| (id.as_str(), aabb));
            black_box(picker.pointer_moved(&camera, black_box(Vec2::new(4.0, 4.0)), targets))
        });
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: table geometry
// ---------------------------------------------------------------------------

fn bench_table_model(c: &mut Criterion) {
    let (tables, _) = FloorLayout::demo().into_resources();
    c.bench_function("build_table_model", |b| {
        b.iter(|| black_box(build_table_model(black_box(&tables.0[11]))));
    });
}

criterion_group!(benches, bench_hover_pick, bench_table_model);
criterion_main!(benches);
