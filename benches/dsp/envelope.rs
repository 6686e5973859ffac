//! Benchmarks for parameter timeline evaluation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use zen_rhythm::dsp::envelope::{shape, ParamTimeline, Stages, GAIN_SHAPE, PITCH_SHAPE};

use crate::BLOCK_SIZES;

fn gain_timeline() -> ParamTimeline {
    let mut timeline = ParamTimeline::new(0.0);
    let stages = Stages {
        origin: 0.0,
        attack_from: 0.0,
        peak: 0.8,
        decay_to: Some(0.4),
        attack_delay: 0.0,
        attack_time: 0.005,
        decay_time: 0.15,
        sustain_time: 0.1,
        release_time: 0.1,
    };
    shape(&mut timeline, 0.0, &stages, &GAIN_SHAPE);
    timeline
}

fn pitch_timeline() -> ParamTimeline {
    let mut timeline = ParamTimeline::new(150.0);
    let stages = Stages {
        origin: 150.0,
        attack_from: 150.0,
        peak: 150.0,
        decay_to: Some(40.0),
        attack_delay: 0.0,
        attack_time: 0.001,
        decay_time: 0.05,
        sustain_time: 0.0,
        release_time: 0.0,
    };
    shape(&mut timeline, 0.0, &stages, &PITCH_SHAPE);
    timeline
}

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Linear attack into exponential decay
        let gain = gain_timeline();
        group.bench_with_input(BenchmarkId::new("gain_attack", size), &size, |b, _| {
            b.iter(|| {
                gain.render(black_box(&mut buffer), black_box(0.0), 48_000.0);
            })
        });

        // Exponential release tail
        group.bench_with_input(BenchmarkId::new("gain_release", size), &size, |b, _| {
            b.iter(|| {
                gain.render(black_box(&mut buffer), black_box(0.3), 48_000.0);
            })
        });

        // Pitch drop (exponential between positive frequencies)
        let pitch = pitch_timeline();
        group.bench_with_input(BenchmarkId::new("pitch_drop", size), &size, |b, _| {
            b.iter(|| {
                pitch.render(black_box(&mut buffer), black_box(0.0), 48_000.0);
            })
        });
    }

    group.finish();
}
