use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/*
| type              | passes          | rejects      |
| ----------------- | --------------- | ------------ |
| low-pass          | below cutoff    | above cutoff |
| high-pass         | above cutoff    | below cutoff |
| band-pass         | around cutoff   | both sides   |
| notch / band-stop | outside         | around       |

Topology-preserving (trapezoidal) state-variable filter. All four responses
fall out of the same two integrators; `kind` picks which one is emitted.
Damping is k = 1/Q, so Q = 0.7 is roughly Butterworth and larger Q rings
at the cutoff.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Lowpass,
    Highpass,
    Bandpass,
    Notch,
}

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
    pub notch: f32,
}

pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    kind: FilterKind,
    q: f32,

    // Coefficient cache, recomputed only when the cutoff moves.
    cached_cutoff: f32,
    g: f32,
}

impl SVFilter {
    pub fn new(kind: FilterKind, q: f32) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            kind,
            q: q.max(0.01),
            cached_cutoff: f32::NAN,
            g: 0.0,
        }
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn q(&self) -> f32 {
        self.q
    }

    #[inline]
    fn update_g(&mut self, cutoff_hz: f32, sample_rate: f32) {
        if cutoff_hz != self.cached_cutoff {
            let cutoff = cutoff_hz.clamp(1.0, sample_rate * 0.49);
            self.g = (PI * cutoff / sample_rate).tan();
            self.cached_cutoff = cutoff_hz;
        }
    }

    pub fn next_sample(&mut self, sample: f32, k: f32) -> FilterOutputs {
        let g = self.g;
        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        FilterOutputs {
            lowpass: v2,
            bandpass: v1,
            highpass: sample - k * v1 - v2,
            notch: sample - k * v1,
        }
    }

    /// Filter `buffer` in place, reading one cutoff (Hz) per sample.
    pub fn render(&mut self, buffer: &mut [f32], cutoffs: &[f32], sample_rate: f32) {
        let k = 1.0 / self.q;

        for (sample, &cutoff) in buffer.iter_mut().zip(cutoffs) {
            self.update_g(cutoff, sample_rate);
            let outputs = self.next_sample(*sample, k);

            *sample = match self.kind {
                FilterKind::Lowpass => outputs.lowpass,
                FilterKind::Highpass => outputs.highpass,
                FilterKind::Bandpass => outputs.bandpass,
                FilterKind::Notch => outputs.notch,
            }
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }
}
