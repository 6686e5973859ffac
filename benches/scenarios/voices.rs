//! Benchmarks for complete profile mixes.
//!
//! Each iteration renders one block of every voice a profile produces,
//! summed through the mixer with its master gain.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use zen_rhythm::{
    engine::{Activation, AudioEngine},
    synth::library,
    EngineConfig,
};

use crate::BLOCK_SIZES;

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for name in ["Kick Deep", "Snare Crisp", "Cymbal Ride Ping (Sim.)", "Cymbal Crash (Sim.)"] {
            let index = library::library()
                .iter()
                .position(|p| p.name == name)
                .unwrap_or(0);

            // A fresh session per case so voices never run out mid-measurement.
            let engine = AudioEngine::new(EngineConfig {
                stop_padding: 1.0e6,
                ..EngineConfig::default()
            });
            let Activation::Started(mut mixer) =
                engine.activate_with_rng(48_000.0, &mut StdRng::seed_from_u64(9))
            else {
                continue;
            };
            engine.trigger(library::profile(index));

            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    mixer.render(black_box(&mut buffer));
                })
            });
        }

        // Eight overlapping hits of the busiest profile
        let engine = AudioEngine::new(EngineConfig {
            stop_padding: 1.0e6,
            ..EngineConfig::default()
        });
        if let Activation::Started(mut mixer) =
            engine.activate_with_rng(48_000.0, &mut StdRng::seed_from_u64(9))
        {
            for _ in 0..8 {
                engine.trigger(library::profile(9));
            }
            group.bench_with_input(BenchmarkId::new("ride_x8", size), &size, |b, _| {
                b.iter(|| {
                    mixer.render(black_box(&mut buffer));
                })
            });
        }
    }

    group.finish();
}
