use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

/*
Phase-Accumulator Oscillator
============================

The oscillator keeps a phase in [0, 1) and advances it by `frequency /
sample_rate` every sample. The waveform is a pure function of the phase:

  sine      sin(2π·phase)
  square    +1 for the first half cycle, -1 for the second
  sawtooth  rises linearly from -1 to +1, then snaps back
  triangle  -1 → +1 → -1 over one cycle

Frequency is supplied per sample, so pitch envelopes are honoured without
the oscillator knowing anything about them. Phase starts at 0 when the
oscillator is created, which matches an oscillator started at its first
rendered sample.

These are naive (non band-limited) waveforms. Percussive hits are short and
mostly below a few kHz, so aliasing is not a concern here.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    #[inline]
    pub fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (TAU * phase).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * phase - 1.0,
            Waveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
        }
    }
}

pub struct Oscillator {
    waveform: Waveform,
    phase: f32,
}

impl Oscillator {
    pub fn new(waveform: Waveform) -> Self {
        Self { waveform, phase: 0.0 }
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Render one sample per entry of `frequencies` (Hz) into `out`.
    pub fn render(&mut self, out: &mut [f32], frequencies: &[f32], sample_rate: f32) {
        for (sample, &freq) in out.iter_mut().zip(frequencies) {
            *sample = self.waveform.sample(self.phase);
            self.phase = (self.phase + freq / sample_rate).fract();
        }
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
