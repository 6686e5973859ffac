//! Audio session lifecycle and the real-time mix.
//!
//! The control side (`AudioEngine`) schedules voices and pushes them through
//! a lock-free queue; the audio side (`Mixer`) pops, renders and retires them.

pub mod audio;
pub mod mixer;

pub use audio::{Activation, AudioEngine};
pub use mixer::Mixer;

use crate::synth::profile::SoundProfile;

/// Anything that can be asked to sound a profile right now.
///
/// The frame loop talks to this rather than to `AudioEngine` directly, so it
/// runs the same with real output, with no output, or under test.
pub trait VoiceSink {
    fn trigger(&mut self, profile: &SoundProfile);
}

/// A sink that discards everything.
pub struct Silent;

impl VoiceSink for Silent {
    fn trigger(&mut self, _profile: &SoundProfile) {}
}
