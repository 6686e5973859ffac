/*
Cycle Clock
===========

The whole sequencer runs off one number: how far the hand has travelled into
the current cycle, in seconds.

    cycle duration = (60 / bpm) × beats per cycle

    100 BPM, 8 beats  →  4.8 s per revolution

Every frame the clock is advanced by the frame's elapsed time and wrapped:

    new = (previous + dt) mod cycle

The pair (previous, new) is what the hit detector sweeps. Tempo changes made
through the setters reset the position to 0 so the hand never jumps to an
unrelated angle; the duration is otherwise recomputed on every advance.
*/

use std::f64::consts::TAU;

use crate::error::ConfigError;

pub const MIN_BPM: u32 = 20;
pub const MAX_BPM: u32 = 300;
pub const MIN_BEATS_PER_CYCLE: u32 = 1;
pub const MAX_BEATS_PER_CYCLE: u32 = 64;

/// Validated tempo settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tempo {
    bpm: u32,
    beats_per_cycle: u32,
}

impl Default for Tempo {
    fn default() -> Self {
        Self {
            bpm: 100,
            beats_per_cycle: 8,
        }
    }
}

impl Tempo {
    pub fn new(bpm: u32, beats_per_cycle: u32) -> Result<Self, ConfigError> {
        check_bpm(bpm)?;
        check_beats(beats_per_cycle)?;
        Ok(Self { bpm, beats_per_cycle })
    }

    /// Clamp arbitrary values into the allowed ranges.
    pub fn clamped(bpm: u32, beats_per_cycle: u32) -> Self {
        Self {
            bpm: bpm.clamp(MIN_BPM, MAX_BPM),
            beats_per_cycle: beats_per_cycle.clamp(MIN_BEATS_PER_CYCLE, MAX_BEATS_PER_CYCLE),
        }
    }

    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    pub fn beats_per_cycle(&self) -> u32 {
        self.beats_per_cycle
    }

    pub fn with_bpm(self, bpm: u32) -> Result<Self, ConfigError> {
        check_bpm(bpm)?;
        Ok(Self { bpm, ..self })
    }

    pub fn with_beats_per_cycle(self, beats_per_cycle: u32) -> Result<Self, ConfigError> {
        check_beats(beats_per_cycle)?;
        Ok(Self {
            beats_per_cycle,
            ..self
        })
    }

    /// Seconds per revolution.
    pub fn cycle_duration(&self) -> f64 {
        60.0 / self.bpm as f64 * self.beats_per_cycle as f64
    }
}

fn check_bpm(bpm: u32) -> Result<(), ConfigError> {
    if (MIN_BPM..=MAX_BPM).contains(&bpm) {
        Ok(())
    } else {
        Err(ConfigError::BpmOutOfRange(bpm))
    }
}

fn check_beats(beats: u32) -> Result<(), ConfigError> {
    if (MIN_BEATS_PER_CYCLE..=MAX_BEATS_PER_CYCLE).contains(&beats) {
        Ok(())
    } else {
        Err(ConfigError::BeatsPerCycleOutOfRange(beats))
    }
}

#[derive(Debug, Clone)]
pub struct CycleClock {
    tempo: Tempo,
    beat_time: f64,
    running: bool,
}

impl Default for CycleClock {
    fn default() -> Self {
        Self::new(Tempo::default())
    }
}

impl CycleClock {
    /// A running clock at the start of the cycle.
    pub fn new(tempo: Tempo) -> Self {
        Self {
            tempo,
            beat_time: 0.0,
            running: true,
        }
    }

    pub fn tempo(&self) -> Tempo {
        self.tempo
    }

    pub fn cycle_duration(&self) -> f64 {
        self.tempo.cycle_duration()
    }

    /// Position within the cycle, in `[0, cycle_duration)`.
    pub fn beat_time(&self) -> f64 {
        self.beat_time
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn set_bpm(&mut self, bpm: u32) -> Result<(), ConfigError> {
        self.set_tempo(self.tempo.with_bpm(bpm)?);
        Ok(())
    }

    pub fn set_beats_per_cycle(&mut self, beats: u32) -> Result<(), ConfigError> {
        self.set_tempo(self.tempo.with_beats_per_cycle(beats)?);
        Ok(())
    }

    /// Replace the tempo and rewind to the top of the cycle.
    pub fn set_tempo(&mut self, tempo: Tempo) {
        self.tempo = tempo;
        self.beat_time = 0.0;
    }

    pub fn reset(&mut self) {
        self.beat_time = 0.0;
    }

    /// Move the hand forward by `dt` seconds, returning `(previous, new)`.
    ///
    /// A stopped clock returns the same position twice.
    pub fn advance(&mut self, dt: f64) -> (f64, f64) {
        let previous = self.beat_time;
        if self.running && dt > 0.0 {
            self.beat_time = (previous + dt).rem_euclid(self.cycle_duration());
        }
        (previous, self.beat_time)
    }

    /// Hand angle in radians, 0 at the top of the cycle.
    pub fn angle(&self) -> f64 {
        self.beat_time / self.cycle_duration() * TAU
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cycle_duration_from_tempo() {
        assert_relative_eq!(Tempo::default().cycle_duration(), 4.8);
        assert_relative_eq!(Tempo::new(120, 4).unwrap().cycle_duration(), 2.0);
    }

    #[test]
    fn tempo_rejects_out_of_range() {
        assert_eq!(Tempo::new(19, 4), Err(ConfigError::BpmOutOfRange(19)));
        assert_eq!(Tempo::new(301, 4), Err(ConfigError::BpmOutOfRange(301)));
        assert_eq!(Tempo::new(120, 0), Err(ConfigError::BeatsPerCycleOutOfRange(0)));
        assert_eq!(Tempo::new(120, 65), Err(ConfigError::BeatsPerCycleOutOfRange(65)));
    }

    #[test]
    fn clamped_tempo_stays_in_range() {
        let tempo = Tempo::clamped(1_000, 0);
        assert_eq!(tempo.bpm(), 300);
        assert_eq!(tempo.beats_per_cycle(), 1);
    }

    #[test]
    fn advance_wraps() {
        let mut clock = CycleClock::new(Tempo::new(120, 4).unwrap());

        assert_eq!(clock.advance(1.5), (0.0, 1.5));
        assert_eq!(clock.advance(1.0), (1.5, 0.5));
    }

    #[test]
    fn stopped_clock_does_not_move() {
        let mut clock = CycleClock::new(Tempo::new(120, 4).unwrap());
        clock.advance(0.25);
        clock.stop();

        assert_eq!(clock.advance(1.0), (0.25, 0.25));

        clock.start();
        assert_eq!(clock.advance(0.25), (0.25, 0.5));
    }

    #[test]
    fn tempo_changes_rewind() {
        let mut clock = CycleClock::default();
        clock.advance(1.0);
        clock.set_bpm(140).unwrap();
        assert_eq!(clock.beat_time(), 0.0);

        clock.advance(1.0);
        clock.set_beats_per_cycle(3).unwrap();
        assert_eq!(clock.beat_time(), 0.0);
        assert_eq!(clock.tempo(), Tempo::new(140, 3).unwrap());
    }

    #[test]
    fn rejected_tempo_keeps_position() {
        let mut clock = CycleClock::default();
        clock.advance(1.0);

        assert!(clock.set_bpm(0).is_err());
        assert_eq!(clock.beat_time(), 1.0);
    }

    #[test]
    fn angle_is_fraction_of_turn() {
        let mut clock = CycleClock::new(Tempo::new(120, 4).unwrap());
        clock.advance(0.5);

        assert_relative_eq!(clock.angle(), TAU / 4.0);
    }
}
