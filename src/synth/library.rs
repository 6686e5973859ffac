//! The built-in percussion catalog.
//!
//! Layers refer to profiles by index. Indices past the end wrap around, so a
//! pattern saved against a larger catalog still plays something.
//!
//! The cymbals are rough approximations: real cymbals have far denser
//! spectra than a few oscillators and filtered noise can give.

use std::sync::OnceLock;

use crate::{
    dsp::{filter::FilterKind, oscillator::Waveform},
    synth::profile::{FilterSpec, GainEnvelope, SoundComponent, SoundProfile, SweepEnvelope},
};

static LIBRARY: OnceLock<Vec<SoundProfile>> = OnceLock::new();

/// All profiles, built on first use.
pub fn library() -> &'static [SoundProfile] {
    LIBRARY.get_or_init(build)
}

/// Profile for a layer's sound index, wrapping past the end.
pub fn profile(index: usize) -> &'static SoundProfile {
    let profiles = library();
    &profiles[index % profiles.len()]
}

/// Map a possibly stale index into the catalog.
pub fn wrap_index(index: usize) -> usize {
    index % library().len()
}

fn build() -> Vec<SoundProfile> {
    use FilterKind::{Bandpass, Highpass, Lowpass};
    use Waveform::{Sawtooth, Sine, Square, Triangle};

    vec![
        // Kicks
        SoundProfile::new(
            "Kick Deep",
            0.3,
            vec![
                SoundComponent::osc(Sine, 150.0)
                    .pitch(SweepEnvelope::drop_to(0.001, 0.05, 40.0))
                    .gain(GainEnvelope::adsr(0.005, 0.15, 0.0, 0.1).peak(0.8)),
                // click
                SoundComponent::osc(Triangle, 600.0)
                    .gain(GainEnvelope::adsr(0.001, 0.01, 0.0, 0.01).peak(0.2)),
            ],
        ),
        SoundProfile::new(
            "Kick Punchy",
            0.2,
            vec![
                SoundComponent::osc(Sine, 160.0)
                    .pitch(SweepEnvelope::drop_to(0.001, 0.03, 60.0))
                    .gain(GainEnvelope::adsr(0.002, 0.1, 0.0, 0.05).peak(0.75)),
                SoundComponent::noise()
                    .filter(FilterSpec::new(Lowpass, 1_000.0, 1.0))
                    .gain(GainEnvelope::adsr(0.001, 0.005, 0.0, 0.005).peak(0.15)),
            ],
        ),
        // Snares
        SoundProfile::new(
            "Snare Crisp",
            0.25,
            vec![
                SoundComponent::osc(Triangle, 200.0)
                    .gain(GainEnvelope::adsr(0.001, 0.08, 0.0, 0.05).peak(0.5)),
                SoundComponent::noise()
                    .filter(FilterSpec::new(Bandpass, 2_500.0, 0.8))
                    .gain(GainEnvelope::adsr(0.001, 0.12, 0.0, 0.05).peak(0.45)),
            ],
        ),
        SoundProfile::new(
            "Snare Brush",
            0.3,
            vec![SoundComponent::noise()
                .filter(FilterSpec::new(Highpass, 1_500.0, 0.7))
                .gain(GainEnvelope::adsr(0.01, 0.15, 0.1, 0.1).peak(0.3))],
        ),
        SoundProfile::new(
            "Snare Rimshot",
            0.1,
            vec![
                SoundComponent::osc(Sawtooth, 400.0)
                    .pitch(SweepEnvelope::drop_to(0.0, 0.01, 350.0))
                    .gain(GainEnvelope::adsr(0.001, 0.03, 0.0, 0.02).peak(0.6)),
                SoundComponent::osc(Square, 1_200.0)
                    .gain(GainEnvelope::adsr(0.001, 0.01, 0.0, 0.01).peak(0.3)),
            ],
        ),
        // Hi-hats
        SoundProfile::new(
            "HiHat Closed",
            0.05,
            vec![SoundComponent::noise()
                .filter(FilterSpec::new(Highpass, 7_000.0, 0.5))
                .gain(GainEnvelope::adsr(0.001, 0.025, 0.0, 0.02).peak(0.2))],
        ),
        SoundProfile::new(
            "HiHat Open",
            0.4,
            vec![SoundComponent::noise()
                .filter(FilterSpec::new(Highpass, 6_000.0, 0.6))
                .gain(GainEnvelope::adsr(0.002, 0.2, 0.05, 0.15).peak(0.18))],
        ),
        SoundProfile::new(
            "HiHat Pedal",
            0.08,
            vec![SoundComponent::noise()
                .filter(FilterSpec::new(Bandpass, 4_000.0, 1.0))
                .gain(GainEnvelope::adsr(0.005, 0.04, 0.0, 0.03).peak(0.15))],
        ),
        // Cymbals
        SoundProfile::new(
            "Cymbal Crash (Sim.)",
            1.5,
            vec![SoundComponent::noise()
                .filter(
                    FilterSpec::new(Bandpass, 7_000.0, 0.5)
                        .sweep(SweepEnvelope::drop_to(0.01, 0.6, 2_000.0).starting_at(7_000.0)),
                )
                .gain(GainEnvelope::adsr(0.01, 0.8, 0.1, 0.5).peak(0.25))],
        ),
        SoundProfile::new(
            "Cymbal Ride Ping (Sim.)",
            0.8,
            vec![
                SoundComponent::osc(Square, 1_200.0)
                    .gain(GainEnvelope::adsr(0.002, 0.3, 0.1, 0.2).peak(0.15)),
                // a fifth above
                SoundComponent::osc(Square, 1_200.0 * 1.5)
                    .gain(GainEnvelope::adsr(0.002, 0.25, 0.05, 0.15).peak(0.1)),
                SoundComponent::noise()
                    .filter(FilterSpec::new(Highpass, 4_000.0, 0.8))
                    .gain(GainEnvelope::adsr(0.005, 0.4, 0.0, 0.3).peak(0.08)),
            ],
        ),
        SoundProfile::new(
            "Cymbal Bell",
            1.0,
            vec![
                SoundComponent::osc(Triangle, 880.0)
                    .gain(GainEnvelope::adsr(0.005, 0.5, 0.2, 0.3).peak(0.2)),
                // slightly detuned fifth
                SoundComponent::osc(Sine, 880.0 * 1.505)
                    .gain(GainEnvelope::adsr(0.005, 0.45, 0.15, 0.25).peak(0.15)),
            ],
        ),
        // Toms
        SoundProfile::new(
            "Tom Low",
            0.4,
            vec![SoundComponent::osc(Sine, 120.0)
                .pitch(SweepEnvelope::drop_to(0.001, 0.1, 70.0))
                .gain(GainEnvelope::adsr(0.005, 0.25, 0.0, 0.1).peak(0.6))],
        ),
        SoundProfile::new(
            "Tom Mid",
            0.35,
            vec![SoundComponent::osc(Sine, 180.0)
                .pitch(SweepEnvelope::drop_to(0.001, 0.08, 100.0))
                .gain(GainEnvelope::adsr(0.005, 0.2, 0.0, 0.1).peak(0.55))],
        ),
        // Misc
        SoundProfile::new(
            "Click Sharp",
            0.03,
            vec![SoundComponent::osc(Triangle, 1_500.0)
                .gain(GainEnvelope::adsr(0.001, 0.01, 0.0, 0.01).peak(0.3))],
        ),
        SoundProfile::new(
            "Wood Block",
            0.1,
            vec![SoundComponent::osc(Sine, 900.0)
                .pitch(SweepEnvelope::drop_to(0.0, 0.005, 850.0))
                .gain(GainEnvelope::adsr(0.002, 0.05, 0.0, 0.03).peak(0.4))],
        ),
    ]
}
