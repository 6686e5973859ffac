use std::collections::HashMap;
use std::f64::consts::PI;

pub const MAX_POP_DURATION: f64 = 0.15;

/// Decaying emphasis timers for dots that were just hit.
///
/// Keys are `(layer, element)`. A timer starts at the maximum duration, loses
/// each frame's elapsed time and is removed the moment it reaches zero, so a
/// stored value is always positive.
#[derive(Debug, Clone)]
pub struct PopState {
    timers: HashMap<(usize, usize), f64>,
    max_duration: f64,
}

impl Default for PopState {
    fn default() -> Self {
        Self::new(MAX_POP_DURATION)
    }
}

impl PopState {
    pub fn new(max_duration: f64) -> Self {
        Self {
            timers: HashMap::new(),
            max_duration,
        }
    }

    pub fn max_duration(&self) -> f64 {
        self.max_duration
    }

    /// Start (or restart) the pop for one dot.
    pub fn arm(&mut self, layer: usize, element: usize) {
        self.timers.insert((layer, element), self.max_duration);
    }

    pub fn tick(&mut self, dt: f64) {
        self.timers.retain(|_, remaining| {
            *remaining -= dt;
            *remaining > 0.0
        });
    }

    pub fn remaining(&self, layer: usize, element: usize) -> Option<f64> {
        self.timers.get(&(layer, element)).copied()
    }

    /// Eased emphasis in `[0, 1]`: `sin(remaining / max × π)`, 0 when idle.
    pub fn intensity(&self, layer: usize, element: usize) -> f64 {
        self.remaining(layer, element)
            .map_or(0.0, |remaining| (remaining / self.max_duration * PI).sin().max(0.0))
    }

    /// Drop a removed layer's timers and shift the ones above it down.
    pub fn forget_layer(&mut self, layer: usize) {
        self.timers = self
            .timers
            .drain()
            .filter(|&((l, _), _)| l != layer)
            .map(|((l, e), remaining)| (((if l > layer { l - 1 } else { l }), e), remaining))
            .collect();
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

/// Size multiplier for a dot: 1 at rest, up to `magnitude` at full intensity.
pub fn dot_scale(intensity: f64, magnitude: f64) -> f64 {
    1.0 + (magnitude - 1.0) * intensity
}
