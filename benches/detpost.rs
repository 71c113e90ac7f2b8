use detpost::{Detection, Rect, SuppressConfig, Suppressor};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn make_candidates(count: usize, num_classes: usize) -> Vec<Detection> {
    // Deterministic clustered boxes: every class gets a few dense clusters.
    (0..count)
        .map(|i| {
            let cluster = (i / 8) as f32;
            let jitter = (i % 8) as f32;
            let left = (cluster * 37.0) % 600.0 + jitter;
            let top = (cluster * 53.0) % 400.0 + jitter * 0.5;
            let score = 1.0 - ((i * 7919) % 1000) as f32 / 1000.0;
            Detection::new(
                Rect::new(left, top, left + 40.0, top + 30.0),
                score,
                i % num_classes,
            )
        })
        .collect()
}

fn bench_suppress(c: &mut Criterion) {
    let num_classes = 80;
    let candidates = make_candidates(4_000, num_classes);

    let seq = Suppressor::new(SuppressConfig {
        iou_threshold: 0.45,
        num_classes,
        min_score: None,
        parallel: false,
    })
    .unwrap();
    c.bench_function("suppress_all_classes_sequential", |b| {
        b.iter(|| black_box(seq.run(black_box(&candidates)).unwrap()));
    });

    let filtered = Suppressor::new(SuppressConfig {
        iou_threshold: 0.45,
        num_classes,
        min_score: Some(0.5),
        parallel: false,
    })
    .unwrap();
    c.bench_function("suppress_all_classes_min_score", |b| {
        b.iter(|| black_box(filtered.run(black_box(&candidates)).unwrap()));
    });

    if cfg!(feature = "rayon") {
        let par = Suppressor::new(SuppressConfig {
            iou_threshold: 0.45,
            num_classes,
            min_score: None,
            parallel: true,
        })
        .unwrap();
        c.bench_function("suppress_all_classes_parallel", |b| {
            b.iter(|| black_box(par.run(black_box(&candidates)).unwrap()));
        });
    }
}

criterion_group!(benches, bench_suppress);
criterion_main!(benches);
