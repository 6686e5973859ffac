//! Shared white-noise buffer.
//!
//! One buffer of uniform samples in [-1, 1] is built per audio session and
//! shared by every noise component of every hit. It is never written after
//! creation, so readers on any thread only need a cheap `Arc` clone.

use std::sync::Arc;

use rand::Rng;

#[derive(Clone)]
pub struct NoiseBuffer {
    samples: Arc<[f32]>,
}

impl NoiseBuffer {
    /// Build `seconds` worth of noise at `sample_rate`, drawing from `rng`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, sample_rate: f32, seconds: f32) -> Self {
        let len = ((sample_rate * seconds).round() as usize).max(1);
        let samples: Arc<[f32]> = (0..len).map(|_| rng.gen_range(-1.0f32..=1.0)).collect();
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// A looping reader starting at the first sample.
    pub fn reader(&self) -> NoiseReader {
        NoiseReader {
            buffer: self.clone(),
            position: 0,
        }
    }
}

/// Loops over a shared `NoiseBuffer`; each voice owns its own read position.
pub struct NoiseReader {
    buffer: NoiseBuffer,
    position: usize,
}

impl NoiseReader {
    pub fn render(&mut self, out: &mut [f32]) {
        let samples = self.buffer.samples();
        for sample in out.iter_mut() {
            *sample = samples[self.position];
            self.position += 1;
            if self.position == samples.len() {
                self.position = 0;
            }
        }
    }
}
