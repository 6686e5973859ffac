use std::f64::consts::TAU;

use tracing::debug;

use crate::{
    config::EngineConfig,
    engine::VoiceSink,
    error::ConfigError,
    sequencing::{
        clock::{CycleClock, Tempo},
        hit::{element_time, Sweep},
        layer::Layer,
        pattern::Pattern,
        pop::{dot_scale, PopState},
    },
    synth::library,
};

/// One element the hand passed this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub layer: usize,
    pub element: usize,
    /// Whether the hit was sent to the voice sink.
    pub audible: bool,
}

/// Draw state for one active dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotView {
    pub layer: usize,
    pub element: usize,
    /// Radians clockwise from the top of the ring.
    pub angle: f64,
    /// Pop emphasis in `[0, 1]`.
    pub intensity: f64,
    /// Size multiplier from the pattern's pop magnitude.
    pub scale: f64,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub hand_angle: f64,
    pub beat_time: f64,
    pub cycle_duration: f64,
    pub running: bool,
    pub dots: Vec<DotView>,
}

/// The frame scheduler.
///
/// An external loop calls `tick` with each frame's elapsed time. Within one
/// tick the clock advances, pop timers decay, the hit detector sweeps every
/// layer, hit dots are re-armed and audible hits go to the voice sink, in
/// that order and nothing else runs in between.
pub struct RhythmPlayer<S: VoiceSink> {
    pattern: Pattern,
    clock: CycleClock,
    pops: PopState,
    sink: S,
    max_frame_delta: f64,
}

impl<S: VoiceSink> RhythmPlayer<S> {
    pub fn new(pattern: Pattern, sink: S, config: &EngineConfig) -> Self {
        Self {
            clock: CycleClock::new(pattern.tempo()),
            pattern,
            pops: PopState::new(config.max_pop_duration),
            sink,
            max_frame_delta: config.max_frame_delta,
        }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Direct access for layer edits. Tempo changes made here take effect
    /// (and rewind the clock) on the next tick.
    pub fn pattern_mut(&mut self) -> &mut Pattern {
        &mut self.pattern
    }

    pub fn clock(&self) -> &CycleClock {
        &self.clock
    }

    pub fn pops(&self) -> &PopState {
        &self.pops
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Swap in another pattern and start it from the top.
    pub fn load_pattern(&mut self, pattern: Pattern) {
        self.clock.set_tempo(pattern.tempo());
        self.pops.clear();
        self.pattern = pattern;
    }

    pub fn start(&mut self) {
        self.clock.start();
    }

    pub fn stop(&mut self) {
        self.clock.stop();
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn toggle_running(&mut self) -> bool {
        if self.clock.is_running() {
            self.clock.stop();
        } else {
            self.clock.start();
        }
        self.clock.is_running()
    }

    pub fn set_bpm(&mut self, bpm: u32) -> Result<(), ConfigError> {
        self.set_tempo(self.pattern.tempo().with_bpm(bpm)?);
        Ok(())
    }

    pub fn set_beats_per_cycle(&mut self, beats: u32) -> Result<(), ConfigError> {
        self.set_tempo(self.pattern.tempo().with_beats_per_cycle(beats)?);
        Ok(())
    }

    fn set_tempo(&mut self, tempo: Tempo) {
        self.pattern.set_tempo(tempo);
        self.clock.set_tempo(tempo);
    }

    /// Remove a layer along with its pop timers.
    pub fn remove_layer(&mut self, index: usize) -> Result<Layer, ConfigError> {
        let layer = self.pattern.remove_layer(index)?;
        self.pops.forget_layer(index);
        Ok(layer)
    }

    /// Advance one frame of `dt` seconds and return what was hit.
    pub fn tick(&mut self, dt: f64) -> Vec<Hit> {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.max_frame_delta)
        } else {
            0.0
        };

        if self.clock.tempo() != self.pattern.tempo() {
            self.clock.set_tempo(self.pattern.tempo());
        }

        let (from, to) = self.clock.advance(dt);
        self.pops.tick(dt);
        if !self.clock.is_running() {
            return Vec::new();
        }

        let sweep = Sweep::new(from, to, dt, self.clock.cycle_duration());
        let mut hits = Vec::new();
        for (index, layer) in self.pattern.layers().iter().enumerate() {
            let audible = self.pattern.is_audible(index);
            for element in sweep.hits(layer) {
                self.pops.arm(index, element);
                if audible {
                    self.sink.trigger(library::profile(layer.sound_index()));
                }
                debug!(layer = index, element, audible, "hit");
                hits.push(Hit {
                    layer: index,
                    element,
                    audible,
                });
            }
        }
        hits
    }

    pub fn frame_view(&self) -> FrameView {
        let magnitude = self.pattern.dot_pop_magnitude;
        let dots = self
            .pattern
            .layers()
            .iter()
            .enumerate()
            .flat_map(|(index, layer)| {
                let subdivisions = layer.subdivisions();
                layer.active_indices().map(move |element| (index, element, subdivisions))
            })
            .map(|(layer, element, subdivisions)| {
                let intensity = self.pops.intensity(layer, element);
                DotView {
                    layer,
                    element,
                    angle: element_time(element, subdivisions, TAU),
                    intensity,
                    scale: dot_scale(intensity, magnitude),
                }
            })
            .collect();

        FrameView {
            hand_angle: self.clock.angle(),
            beat_time: self.clock.beat_time(),
            cycle_duration: self.clock.cycle_duration(),
            running: self.clock.is_running(),
            dots,
        }
    }
}
