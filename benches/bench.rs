// Criterion benchmarks for Animinder

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use animinder::core::{decide, filter_candidates, visual_signals, GestureConfig, SwipeInterpreter};
use animinder::core::gesture::Vector;
use animinder::models::{Pet, PLACEHOLDER_PHOTO};
use std::collections::HashSet;

fn create_pet(id: usize) -> Pet {
    Pet {
        id: format!("pet-{}", id % 900),
        name: format!("Pet {}", id),
        species: if id % 2 == 0 { "Dog" } else { "Cat" }.to_string(),
        age: 1 + (id % 15) as u8,
        breed: "Mixed".to_string(),
        photo: PLACEHOLDER_PHOTO.to_string(),
        bio: String::new(),
        owner_id: format!("owner-{}", id % 50),
    }
}

fn bench_decide(c: &mut Criterion) {
    let config = GestureConfig::with_viewport_width(390.0);

    c.bench_function("decide", |b| {
        b.iter(|| decide(black_box(&config), black_box(72.0), black_box(0.64)));
    });
}

fn bench_visual_signals(c: &mut Criterion) {
    let config = GestureConfig::with_viewport_width(390.0);

    c.bench_function("visual_signals", |b| {
        b.iter(|| visual_signals(black_box(&config), black_box(Vector::new(-84.0, 31.0)), black_box(1.0)));
    });
}

fn bench_drag_stream(c: &mut Criterion) {
    let config = GestureConfig::with_viewport_width(390.0);

    // One gesture at 60 samples per second for half a second
    c.bench_function("drag_stream_30_samples", |b| {
        b.iter(|| {
            let mut interpreter = SwipeInterpreter::new(config);
            for step in 0..30 {
                let dx = step as f64 * 5.0;
                black_box(interpreter.on_drag_update(dx, dx * 0.1));
            }
            black_box(interpreter.on_drag_release(150.0, 15.0, 0.8, 0.0))
        });
    });
}

fn bench_filter_candidates(c: &mut Criterion) {
    let liked: HashSet<String> = (0..100).map(|i| format!("pet-{}", i * 3)).collect();

    let mut group = c.benchmark_group("filter_candidates");

    for candidate_count in [10, 100, 1000, 5000].iter() {
        let candidates: Vec<Pet> = (0..*candidate_count).map(create_pet).collect();

        group.bench_with_input(
            BenchmarkId::new("filter_candidates", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    filter_candidates(
                        black_box(candidates.clone()),
                        black_box("owner-7"),
                        black_box(&liked),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_decide,
    bench_visual_signals,
    bench_drag_stream,
    bench_filter_candidates
);

criterion_main!(benches);
