//! Benchmarks for state-variable filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use zen_rhythm::dsp::filter::{FilterKind, SVFilter};

use crate::BLOCK_SIZES;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // Generate a test signal (sawtooth-like ramp)
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();
        let steady = vec![1_000.0f32; size];
        // Falling cutoff, as in a swept cymbal
        let sweep: Vec<f32> = (0..size)
            .map(|i| 7_000.0 - 5_000.0 * i as f32 / size as f32)
            .collect();

        for (name, kind) in [
            ("lowpass", FilterKind::Lowpass),
            ("highpass", FilterKind::Highpass),
            ("bandpass", FilterKind::Bandpass),
            ("notch", FilterKind::Notch),
        ] {
            let mut filter = SVFilter::new(kind, 0.7);
            let mut buffer = input.clone();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    filter.render(black_box(&mut buffer), black_box(&steady), 48_000.0);
                })
            });
        }

        // Cutoff changing every sample forces the coefficient to be recomputed
        let mut filter = SVFilter::new(FilterKind::Bandpass, 0.5);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("bandpass_swept", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer), black_box(&sweep), 48_000.0);
            })
        });
    }

    group.finish();
}
