//! Benchmarks for one frame of the sequencer.
//!
//! A full pattern (eight rings of 64 slots, all on) is ticked at 60 fps with
//! a silent sink, so only clock, hit detection and pop bookkeeping are timed.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use zen_rhythm::{
    engine::Silent,
    runtime::RhythmPlayer,
    sequencing::{Layer, Pattern, Tempo},
    EngineConfig,
};

pub fn bench_hits(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/hits");

    for layers in [1usize, 8] {
        let mut pattern = Pattern::empty("bench", Tempo::default());
        for i in 0..layers {
            if let Ok(layer) = Layer::from_elements(vec![true; 64], i, "#ffffff") {
                pattern.push_layer(layer);
            }
        }
        let mut player = RhythmPlayer::new(pattern, Silent, &EngineConfig::default());

        group.bench_with_input(BenchmarkId::new("tick_60fps", layers), &layers, |b, _| {
            b.iter(|| {
                black_box(player.tick(black_box(1.0 / 60.0)));
            })
        });

        group.bench_with_input(BenchmarkId::new("frame_view", layers), &layers, |b, _| {
            b.iter(|| {
                black_box(player.frame_view());
            })
        });
    }

    group.finish();
}
