//! Benchmarks for the per-tick hot path.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use plexfield::prelude::*;

fn system_with(count: usize) -> ParticleSystem {
    let mut settings = Settings::default();
    settings.system.initial_particles = count;
    settings.system.population.min_particles = count;
    settings.system.population.max_particles = count * 2;
    let mut system =
        ParticleSystem::new_seeded(settings, Arena::new(1920.0, 1080.0), 42).expect("valid settings");
    // Warm up so the connection graph is populated.
    for _ in 0..30 {
        system.tick(1.0 / 60.0);
    }
    system
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for count in [50, 100, 200, 400] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut system = system_with(count);
            b.iter(|| {
                system.tick(black_box(1.0 / 60.0));
            })
        });
    }

    group.finish();
}

fn bench_tick_with_collisions(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick_collisions");

    for count in [100, 200] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut settings = Settings::default();
            settings.system.initial_particles = count;
            settings.system.population.min_particles = count;
            settings.system.population.max_particles = count * 2;
            settings.particle.behaviour.bounce_off_particles = true;
            let mut system = ParticleSystem::new_seeded(settings, Arena::new(1920.0, 1080.0), 42)
                .expect("valid settings");
            b.iter(|| {
                system.tick(black_box(1.0 / 60.0));
            })
        });
    }

    group.finish();
}

fn bench_draw(c: &mut Criterion) {
    let system = system_with(200);
    let mut sink = NullSink;

    c.bench_function("draw_200", |b| {
        b.iter(|| {
            system.draw(black_box(&mut sink));
        })
    });
}

criterion_group!(benches, bench_tick, bench_tick_with_collisions, bench_draw);
criterion_main!(benches);
