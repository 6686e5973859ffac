/*
Parameter Timelines and Envelope Shaping
========================================

Every percussive sound in this crate is a handful of parameters (oscillator
pitch, filter cutoff, gain) that move over time after a hit. Rather than a
gated state machine, each parameter owns a timeline of breakpoints that is
written once when the hit is scheduled and then only read by the audio thread.

Vocabulary
----------

  breakpoint  A (time, value, ramp) triple. Times are absolute seconds on the
              audio clock, not offsets from the hit.

  ramp        How the curve travels from the previous breakpoint to this one:
                Step         hold the previous value, jump at `time`
                Linear       straight line
                Exponential  constant ratio per second (geometric)

  floor       Smallest value an exponential ramp may target. Exponential
              interpolation towards 0 is undefined, so every shape has one:
              0.01 Hz for pitch, 20 Hz for cutoff, 0.0001 for gain.


The Shape
---------

  value
    peak ┐        ╱╲
         │       ╱  ╲
   decay │      ╱    ╲_________
  target │     ╱               ╲
   floor └────╱─────────────────╲──→ time
         start│attack│ decay │hold│release
              delay

  1. `origin` is set at the hit time.
  2. `attack_from` is set when the attack delay elapses.
  3. Linear ramp to `peak` over the attack.
  4. Exponential ramp to `max(floor, decay_to)` over the decay.
  5. (gain only) hold for the sustain time, then exponential ramp to `floor`.

Pitch and cutoff sweeps stop after step 4 and stay at their target. Gain
always runs the release. Which phases run, and how a zero-length phase is
treated, is carried by `ShapeRules` so the three parameters share one
scheduling routine.


Evaluating a Timeline
---------------------

For a time t, find the last breakpoint at or before t (P) and the next one
after it (N):

    N.ramp = Step        → P.value
    N.ramp = Linear      → P.value + (N.value - P.value) * (t - P.time) / (N.time - P.time)
    N.ramp = Exponential → P.value * (N.value / P.value) ^ ((t - P.time) / (N.time - P.time))

Before the first breakpoint the timeline reports its default value. An
exponential ramp between values of different sign (or from zero) holds P.value
until N.time.
*/

/// How a breakpoint is approached from the breakpoint before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ramp {
    Step,
    Linear,
    Exponential,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    pub time: f64,
    pub value: f32,
    pub ramp: Ramp,
}

/// An ordered list of breakpoints for one audio parameter.
#[derive(Debug, Clone, Default)]
pub struct ParamTimeline {
    default_value: f32,
    points: Vec<Breakpoint>,
}

impl ParamTimeline {
    pub fn new(default_value: f32) -> Self {
        Self {
            default_value,
            points: Vec::with_capacity(8),
        }
    }

    /// Jump to `value` at `time`.
    pub fn set_value_at(&mut self, value: f32, time: f64) {
        self.insert(Breakpoint {
            time,
            value,
            ramp: Ramp::Step,
        });
    }

    /// Ramp linearly from the previous breakpoint, arriving at `value` at `end_time`.
    pub fn linear_ramp_to(&mut self, value: f32, end_time: f64) {
        self.insert(Breakpoint {
            time: end_time,
            value,
            ramp: Ramp::Linear,
        });
    }

    /// Ramp geometrically from the previous breakpoint, arriving at `value` at `end_time`.
    pub fn exponential_ramp_to(&mut self, value: f32, end_time: f64) {
        self.insert(Breakpoint {
            time: end_time,
            value,
            ramp: Ramp::Exponential,
        });
    }

    // Stable insert: breakpoints sharing a time keep the order they were written in.
    fn insert(&mut self, point: Breakpoint) {
        let index = self.points.partition_point(|p| p.time <= point.time);
        self.points.insert(index, point);
    }

    pub fn points(&self) -> &[Breakpoint] {
        &self.points
    }

    /// Time of the last breakpoint, or 0 for an empty timeline.
    pub fn end_time(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.time)
    }

    pub fn value_at(&self, time: f64) -> f32 {
        let next = self.points.partition_point(|p| p.time <= time);
        if next == 0 {
            return self.default_value;
        }

        let prev = self.points[next - 1];
        let Some(upcoming) = self.points.get(next) else {
            return prev.value;
        };

        let progress = ((time - prev.time) / (upcoming.time - prev.time)) as f32;
        match upcoming.ramp {
            Ramp::Step => prev.value,
            Ramp::Linear => prev.value + (upcoming.value - prev.value) * progress,
            Ramp::Exponential => {
                if prev.value == 0.0 || prev.value.signum() != upcoming.value.signum() {
                    prev.value
                } else {
                    prev.value * (upcoming.value / prev.value).powf(progress)
                }
            }
        }
    }

    /// Fill `out` with the parameter sampled at `start + i / sample_rate`.
    pub fn render(&self, out: &mut [f32], start: f64, sample_rate: f32) {
        let step = 1.0 / sample_rate as f64;
        for (i, sample) in out.iter_mut().enumerate() {
            *sample = self.value_at(start + i as f64 * step);
        }
    }
}

/// How a phase with a requested duration is turned into a ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhaseSpan {
    /// A zero (or negative) duration drops the phase entirely.
    SkipWhenZero,
    /// The phase always runs, lasting at least this many seconds.
    AtLeast(f64),
}

impl PhaseSpan {
    fn resolve(self, seconds: f64) -> Option<f64> {
        match self {
            PhaseSpan::SkipWhenZero => (seconds > 0.0).then_some(seconds),
            PhaseSpan::AtLeast(min) => Some(seconds.max(min)),
        }
    }
}

/// Per-parameter rules for `shape`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeRules {
    pub floor: f32,
    pub attack: PhaseSpan,
    pub decay: PhaseSpan,
    /// `None` for sweeps that settle on their decay target.
    pub release: Option<PhaseSpan>,
}

pub const PITCH_SHAPE: ShapeRules = ShapeRules {
    floor: 0.01,
    attack: PhaseSpan::SkipWhenZero,
    decay: PhaseSpan::SkipWhenZero,
    release: None,
};

pub const CUTOFF_SHAPE: ShapeRules = ShapeRules {
    floor: 20.0,
    attack: PhaseSpan::SkipWhenZero,
    decay: PhaseSpan::SkipWhenZero,
    release: None,
};

pub const GAIN_SHAPE: ShapeRules = ShapeRules {
    floor: 0.0001,
    attack: PhaseSpan::AtLeast(0.001),
    decay: PhaseSpan::AtLeast(0.01),
    release: Some(PhaseSpan::AtLeast(0.01)),
};

/// Values and durations one envelope firing moves through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stages {
    /// Value at the hit time.
    pub origin: f32,
    /// Value held when the attack delay has elapsed.
    pub attack_from: f32,
    /// Value reached at the end of the attack.
    pub peak: f32,
    /// Decay target before the floor is applied. `None` skips the decay.
    pub decay_to: Option<f32>,
    pub attack_delay: f64,
    pub attack_time: f64,
    pub decay_time: f64,
    pub sustain_time: f64,
    pub release_time: f64,
}

/// Write `stages` into `timeline` for a hit at `start`.
///
/// Returns the time at which the last scheduled ramp finishes.
pub fn shape(timeline: &mut ParamTimeline, start: f64, stages: &Stages, rules: &ShapeRules) -> f64 {
    let attack_start = start + stages.attack_delay.max(0.0);
    timeline.set_value_at(stages.origin, start);
    timeline.set_value_at(stages.attack_from, attack_start);

    let mut cursor = attack_start;
    let mut level = stages.attack_from;

    if let Some(attack) = rules.attack.resolve(stages.attack_time) {
        cursor += attack;
        level = stages.peak;
        timeline.linear_ramp_to(level, cursor);
    }

    if let (Some(target), Some(decay)) = (stages.decay_to, rules.decay.resolve(stages.decay_time)) {
        cursor += decay;
        level = target.max(rules.floor);
        timeline.exponential_ramp_to(level, cursor);
    }

    if let Some(release) = rules.release {
        let release_start = cursor + stages.sustain_time.max(0.0);
        timeline.set_value_at(level, release_start);
        cursor = release_start + release.resolve(stages.release_time).unwrap_or(0.0);
        timeline.exponential_ramp_to(rules.floor, cursor);
    }

    cursor
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn gain_stages(peak: f32, sustain: f32) -> Stages {
        Stages {
            origin: 0.0,
            attack_from: 0.0,
            peak,
            decay_to: Some(sustain * peak),
            attack_delay: 0.0,
            attack_time: 0.01,
            decay_time: 0.1,
            sustain_time: 0.0,
            release_time: 0.05,
        }
    }

    #[test]
    fn holds_default_before_first_breakpoint() {
        let mut timeline = ParamTimeline::new(3.0);
        timeline.set_value_at(1.0, 1.0);

        assert_eq!(timeline.value_at(0.5), 3.0);
        assert_eq!(timeline.value_at(1.0), 1.0);
        assert_eq!(timeline.value_at(10.0), 1.0);
    }

    #[test]
    fn linear_ramp_interpolates() {
        let mut timeline = ParamTimeline::new(0.0);
        timeline.set_value_at(0.0, 0.0);
        timeline.linear_ramp_to(1.0, 2.0);

        assert_relative_eq!(timeline.value_at(0.5), 0.25);
        assert_relative_eq!(timeline.value_at(1.0), 0.5);
        assert_relative_eq!(timeline.value_at(2.0), 1.0);
    }

    #[test]
    fn exponential_ramp_is_geometric() {
        let mut timeline = ParamTimeline::new(0.0);
        timeline.set_value_at(100.0, 0.0);
        timeline.exponential_ramp_to(1.0, 1.0);

        // Halfway in time is the geometric mean of the endpoints.
        assert_relative_eq!(timeline.value_at(0.5), 10.0, max_relative = 1e-4);
    }

    #[test]
    fn exponential_ramp_from_zero_holds() {
        let mut timeline = ParamTimeline::new(0.0);
        timeline.set_value_at(0.0, 0.0);
        timeline.exponential_ramp_to(1.0, 1.0);

        assert_eq!(timeline.value_at(0.99), 0.0);
        assert_eq!(timeline.value_at(1.0), 1.0);
    }

    #[test]
    fn same_time_breakpoints_keep_write_order() {
        let mut timeline = ParamTimeline::new(0.0);
        timeline.set_value_at(1.0, 0.5);
        timeline.set_value_at(2.0, 0.5);

        assert_eq!(timeline.value_at(0.5), 2.0);
    }

    #[test]
    fn gain_shape_reaches_peak_then_sustain_then_floor() {
        let mut timeline = ParamTimeline::new(0.0);
        let end = shape(&mut timeline, 1.0, &gain_stages(0.8, 0.5), &GAIN_SHAPE);

        assert_relative_eq!(end, 1.0 + 0.01 + 0.1 + 0.05, epsilon = 1e-9);
        assert_eq!(timeline.value_at(1.0), 0.0);
        assert_relative_eq!(timeline.value_at(1.01), 0.8, epsilon = 1e-5);
        assert_relative_eq!(timeline.value_at(1.11), 0.4, epsilon = 1e-5);
        assert_relative_eq!(timeline.value_at(end), 0.0001, epsilon = 1e-7);
    }

    #[test]
    fn gain_shape_stretches_zero_length_phases() {
        let stages = Stages {
            attack_time: 0.0,
            decay_time: 0.0,
            release_time: 0.0,
            ..gain_stages(0.5, 0.0)
        };
        let mut timeline = ParamTimeline::new(0.0);
        let end = shape(&mut timeline, 0.0, &stages, &GAIN_SHAPE);

        assert_relative_eq!(end, 0.001 + 0.01 + 0.01, epsilon = 1e-9);
        // Zero sustain level is lifted to the floor so the decay stays defined.
        assert_relative_eq!(timeline.value_at(0.011), 0.0001, epsilon = 1e-7);
    }

    #[test]
    fn sustain_hold_delays_release() {
        let stages = Stages {
            sustain_time: 0.2,
            ..gain_stages(1.0, 0.5)
        };
        let mut timeline = ParamTimeline::new(0.0);
        let end = shape(&mut timeline, 0.0, &stages, &GAIN_SHAPE);

        assert_relative_eq!(timeline.value_at(0.2), 0.5, epsilon = 1e-5);
        assert_relative_eq!(end, 0.01 + 0.1 + 0.2 + 0.05, epsilon = 1e-9);
    }

    #[test]
    fn pitch_sweep_skips_zero_attack_and_settles() {
        let stages = Stages {
            origin: 400.0,
            attack_from: 400.0,
            peak: 400.0,
            decay_to: Some(350.0),
            attack_delay: 0.0,
            attack_time: 0.0,
            decay_time: 0.01,
            sustain_time: 0.0,
            release_time: 0.0,
        };
        let mut timeline = ParamTimeline::new(400.0);
        let end = shape(&mut timeline, 0.0, &stages, &PITCH_SHAPE);

        assert!(timeline.points().iter().all(|p| p.ramp != Ramp::Linear));
        assert_relative_eq!(end, 0.01, epsilon = 1e-12);
        assert_relative_eq!(timeline.value_at(5.0), 350.0);
    }

    #[test]
    fn sweep_without_target_only_holds() {
        let stages = Stages {
            origin: 150.0,
            attack_from: 150.0,
            peak: 150.0,
            decay_to: None,
            attack_delay: 0.0,
            attack_time: 0.0,
            decay_time: 0.05,
            sustain_time: 0.0,
            release_time: 0.0,
        };
        let mut timeline = ParamTimeline::new(150.0);
        shape(&mut timeline, 0.0, &stages, &PITCH_SHAPE);

        assert_eq!(timeline.points().len(), 2);
        assert_eq!(timeline.value_at(1.0), 150.0);
    }

    #[test]
    fn cutoff_sweep_is_floored() {
        let stages = Stages {
            origin: 7000.0,
            attack_from: 7000.0,
            peak: 7000.0,
            decay_to: Some(5.0),
            attack_delay: 0.0,
            attack_time: 0.01,
            decay_time: 0.6,
            sustain_time: 0.0,
            release_time: 0.0,
        };
        let mut timeline = ParamTimeline::new(7000.0);
        shape(&mut timeline, 0.0, &stages, &CUTOFF_SHAPE);

        assert_relative_eq!(timeline.value_at(1.0), 20.0);
    }

    #[test]
    fn attack_delay_holds_attack_from_value() {
        let stages = Stages {
            origin: 1000.0,
            attack_from: 2000.0,
            peak: 1000.0,
            decay_to: None,
            attack_delay: 0.1,
            attack_time: 0.1,
            decay_time: 0.0,
            sustain_time: 0.0,
            release_time: 0.0,
        };
        let mut timeline = ParamTimeline::new(1000.0);
        shape(&mut timeline, 0.0, &stages, &CUTOFF_SHAPE);

        assert_eq!(timeline.value_at(0.05), 1000.0);
        assert_eq!(timeline.value_at(0.1), 2000.0);
        assert_relative_eq!(timeline.value_at(0.15), 1500.0, epsilon = 1e-2);
    }

    #[test]
    fn render_samples_at_block_times() {
        let mut timeline = ParamTimeline::new(0.0);
        timeline.set_value_at(0.0, 0.0);
        timeline.linear_ramp_to(1.0, 1.0);

        let mut out = [0.0f32; 4];
        timeline.render(&mut out, 0.0, 4.0);

        assert_eq!(out, [0.0, 0.25, 0.5, 0.75]);
    }
}
