//! Sound profile data model.
//!
//! A profile is a fixed recipe: a list of components, each a source with an
//! optional filter and a required gain envelope. Components are built with
//! fluent constructors so the library reads like a patch sheet:
//!
//! ```ignore
//! SoundComponent::osc(Waveform::Sine, 150.0)
//!     .pitch(SweepEnvelope::drop_to(0.001, 0.05, 40.0))
//!     .gain(GainEnvelope::adsr(0.005, 0.15, 0.0, 0.1).peak(0.8))
//! ```

use crate::dsp::{envelope::Stages, filter::FilterKind, oscillator::Waveform};

/// Attack/decay sweep for a frequency parameter (pitch or filter cutoff).
///
/// The parameter holds `start_value` (or the component's initial value) once
/// `attack_delay` has elapsed, rises linearly back to the initial value, then
/// falls exponentially to `target` and stays there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepEnvelope {
    pub attack_delay: f64,
    pub attack_time: f64,
    pub decay_time: f64,
    pub start_value: Option<f32>,
    /// Without a target the decay is skipped.
    pub target: Option<f32>,
}

impl SweepEnvelope {
    /// Quick attack, then an exponential fall to `target`.
    pub fn drop_to(attack_time: f64, decay_time: f64, target: f32) -> Self {
        Self {
            attack_delay: 0.0,
            attack_time,
            decay_time,
            start_value: None,
            target: Some(target),
        }
    }

    pub fn starting_at(mut self, value: f32) -> Self {
        self.start_value = Some(value);
        self
    }

    pub fn delayed(mut self, seconds: f64) -> Self {
        self.attack_delay = seconds;
        self
    }

    /// Resolve against the parameter's initial value.
    pub fn stages(&self, initial: f32) -> Stages {
        Stages {
            origin: initial,
            attack_from: self.start_value.unwrap_or(initial),
            peak: initial,
            decay_to: self.target,
            attack_delay: self.attack_delay,
            attack_time: self.attack_time,
            decay_time: self.decay_time,
            sustain_time: 0.0,
            release_time: 0.0,
        }
    }
}

/// Amplitude envelope every component carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainEnvelope {
    pub attack_delay: f64,
    pub attack_time: f64,
    pub decay_time: f64,
    /// Fraction of `peak_gain` held after the decay.
    pub sustain_level: f32,
    pub sustain_time: f64,
    pub release_time: f64,
    pub peak_gain: f32,
}

impl Default for GainEnvelope {
    fn default() -> Self {
        Self {
            attack_delay: 0.0,
            attack_time: 0.001,
            decay_time: 0.01,
            sustain_level: 0.0,
            sustain_time: 0.0,
            release_time: 0.01,
            peak_gain: Self::DEFAULT_PEAK,
        }
    }
}

impl GainEnvelope {
    pub const DEFAULT_PEAK: f32 = 0.5;

    pub fn adsr(attack: f64, decay: f64, sustain: f32, release: f64) -> Self {
        Self {
            attack_time: attack,
            decay_time: decay,
            sustain_level: sustain,
            release_time: release,
            ..Self::default()
        }
    }

    pub fn peak(mut self, gain: f32) -> Self {
        self.peak_gain = gain;
        self
    }

    pub fn hold(mut self, seconds: f64) -> Self {
        self.sustain_time = seconds;
        self
    }

    pub fn delayed(mut self, seconds: f64) -> Self {
        self.attack_delay = seconds;
        self
    }

    /// Level the decay settles on, never below the exponential floor.
    pub fn sustain_target(&self) -> f32 {
        (self.sustain_level * self.peak_gain).max(crate::dsp::envelope::GAIN_SHAPE.floor)
    }

    pub fn stages(&self) -> Stages {
        Stages {
            origin: 0.0,
            attack_from: 0.0,
            peak: self.peak_gain,
            decay_to: Some(self.sustain_level * self.peak_gain),
            attack_delay: self.attack_delay,
            attack_time: self.attack_time,
            decay_time: self.decay_time,
            sustain_time: self.sustain_time,
            release_time: self.release_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Oscillator {
        waveform: Waveform,
        initial_frequency: f32,
        pitch: Option<SweepEnvelope>,
    },
    /// Loops the shared white-noise buffer.
    Noise,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    pub kind: FilterKind,
    pub initial_frequency: f32,
    pub q: f32,
    pub envelope: Option<SweepEnvelope>,
}

impl FilterSpec {
    pub fn new(kind: FilterKind, initial_frequency: f32, q: f32) -> Self {
        Self {
            kind,
            initial_frequency,
            q,
            envelope: None,
        }
    }

    pub fn sweep(mut self, envelope: SweepEnvelope) -> Self {
        self.envelope = Some(envelope);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SoundComponent {
    pub source: Source,
    pub filter: Option<FilterSpec>,
    pub gain: GainEnvelope,
}

impl SoundComponent {
    pub fn osc(waveform: Waveform, initial_frequency: f32) -> Self {
        Self {
            source: Source::Oscillator {
                waveform,
                initial_frequency,
                pitch: None,
            },
            filter: None,
            gain: GainEnvelope::default(),
        }
    }

    pub fn noise() -> Self {
        Self {
            source: Source::Noise,
            filter: None,
            gain: GainEnvelope::default(),
        }
    }

    /// Attach a pitch sweep. Noise sources have no pitch, so this is ignored for them.
    pub fn pitch(mut self, envelope: SweepEnvelope) -> Self {
        if let Source::Oscillator { pitch, .. } = &mut self.source {
            *pitch = Some(envelope);
        }
        self
    }

    pub fn filter(mut self, filter: FilterSpec) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn gain(mut self, gain: GainEnvelope) -> Self {
        self.gain = gain;
        self
    }

    /// Delay between the hit and the moment the source starts.
    pub fn start_delay(&self) -> f64 {
        self.gain.attack_delay.max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SoundProfile {
    pub name: &'static str,
    pub components: Vec<SoundComponent>,
    /// Informational only; voices stop when their own gain envelope ends.
    pub overall_duration: f64,
}

impl SoundProfile {
    pub fn new(name: &'static str, overall_duration: f64, components: Vec<SoundComponent>) -> Self {
        Self {
            name,
            components,
            overall_duration,
        }
    }
}
