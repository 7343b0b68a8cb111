use criterion::{black_box, criterion_group, criterion_main, Criterion};
use docket_core::{cell_text, line_intersection, safe_float, Point};
use serde_json::json;

fn bench_geometry(c: &mut Criterion) {
    c.bench_function("line_intersection", |b| {
        b.iter(|| {
            line_intersection(
                black_box(Point::new(0.0, 0.0)),
                black_box(Point::new(100.0, 100.0)),
                black_box(Point::new(0.0, 100.0)),
                black_box(Point::new(100.0, 0.0)),
            )
        })
    });
    c.bench_function("safe_float", |b| b.iter(|| safe_float(black_box("1234.5678元"), 0.0)));
}

fn bench_cells(c: &mut Criterion) {
    let options = json!([{"text": "红"}, {"text": "蓝"}, {"name": "绿"}]);
    c.bench_function("cell_text_array", |b| b.iter(|| cell_text(black_box(&options))));
}

criterion_group!(benches, bench_geometry, bench_cells);
criterion_main!(benches);
