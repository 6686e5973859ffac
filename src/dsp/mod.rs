//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! Rendering paths here are allocation-free and realtime-safe. Timelines are
//! written on the control thread when a hit is scheduled and only read while
//! rendering.

/// Breakpoint timelines and the shared envelope shaping routine.
pub mod envelope;
/// State-variable filter with low/high/band-pass and notch responses.
pub mod filter;
/// Shared white-noise buffer and looping readers.
pub mod noise;
/// Oscillator waveforms.
pub mod oscillator;

pub use envelope::{ParamTimeline, Ramp};
