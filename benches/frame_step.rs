//! Frame Step Benchmarks
//!
//! Measures the per-frame cost of the follower interpolation and of one
//! section evaluation pass, the two pieces of work done on every frame.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use portfolio_motion::cursor::{FollowerConfig, PointerFollower, PointerSample};
use portfolio_motion::replay::{replay, TimedEvent, Trace, TraceEvent};
use portfolio_motion::sections::{DocumentLayout, SectionId, SectionTracker, TrackerConfig};
use portfolio_motion::Config;

/// Typical portfolio page geometry
fn page_layout(viewport_height: f64) -> DocumentLayout {
    DocumentLayout::stacked(
        viewport_height,
        &[
            (SectionId::Home, 900.0),
            (SectionId::About, 1200.0),
            (SectionId::Projects, 2400.0),
            (SectionId::Achievements, 1600.0),
            (SectionId::Connect, 1000.0),
        ],
    )
}

/// Benchmark one interpolation step with a fresh target each frame
fn bench_frame_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("follower_frame_tick");
    group.throughput(Throughput::Elements(1));

    group.bench_function("moving_target", |b| {
        let mut follower = PointerFollower::new(FollowerConfig::default());
        let mut t = 0u64;
        b.iter(|| {
            t += 16;
            let x = (t % 1920) as f64;
            follower.on_pointer_move(PointerSample::new(x, 540.0, t));
            black_box(follower.on_frame_tick())
        });
    });

    group.bench_function("settled", |b| {
        let mut follower = PointerFollower::new(FollowerConfig::default());
        follower.on_pointer_move(PointerSample::new(400.0, 300.0, 0));
        for _ in 0..64 {
            follower.on_frame_tick();
        }
        b.iter(|| black_box(follower.on_frame_tick()));
    });

    group.finish();
}

/// Benchmark a full evaluation at several scroll offsets
fn bench_section_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("section_evaluate");

    for (scroll, label) in [(0.0, "home"), (3000.0, "projects"), (6500.0, "connect")] {
        let mut layout = page_layout(1000.0);
        layout.scroll_to(scroll);
        group.bench_with_input(BenchmarkId::from_parameter(label), &layout, |b, layout| {
            let mut tracker = SectionTracker::new(TrackerConfig::default());
            b.iter(|| black_box(tracker.evaluate(layout)));
        });
    }

    group.finish();
}

/// Benchmark replaying a ten-second trace
fn bench_replay(c: &mut Criterion) {
    let events = (0..600u64)
        .map(|i| TimedEvent {
            at_ms: i * 16,
            event: if i % 30 == 0 {
                TraceEvent::Scroll {
                    y: (i * 10) as f64,
                }
            } else {
                TraceEvent::Move {
                    x: (i % 1920) as f64,
                    y: 400.0,
                }
            },
        })
        .collect();

    let trace = Trace {
        viewport_height: 1000.0,
        frame_interval_ms: Some(16),
        duration_ms: Some(10_000),
        sections: page_layout(1000.0).bounds(),
        events,
    };
    let config = Config::default();

    c.bench_function("replay_10s_trace", |b| {
        b.iter(|| black_box(replay(&trace, &config)))
    });
}

criterion_group!(benches, bench_frame_tick, bench_section_evaluate, bench_replay);
criterion_main!(benches);
