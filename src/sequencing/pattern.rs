/*
Pattern
=======

Everything a listener edits: tempo, the list of rings, and who may sound.

Audibility follows a mixing-desk model:

    global mute on           → nothing sounds
    some layer soloed        → only soloed, unmuted layers sound
    otherwise                → every unmuted layer sounds

and the flags stay consistent through the mutators below:

    mute a layer             → its solo is cleared
    solo a layer             → every other solo is cleared, and it is unmuted

so at most one layer is ever soloed.

Audibility only gates sound. Hits on silent layers are still detected and
still pop on screen.
*/

use rand::Rng;
use tracing::debug;

use crate::{
    error::ConfigError,
    sequencing::{clock::Tempo, color::pastel, layer::Layer},
    synth::library,
};

pub const DEFAULT_NAME: &str = "MyZenRhythm";
pub const DEFAULT_DOT_BASE_SIZE_FACTOR: f64 = 0.02;
pub const DEFAULT_DOT_POP_MAGNITUDE: f64 = 1.5;

#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub name: String,
    tempo: Tempo,
    layers: Vec<Layer>,
    global_mute: bool,
    /// Dot radius as a fraction of the drawing size; carried for the renderer.
    pub dot_base_size_factor: f64,
    /// Peak dot scale during a pop; carried for the renderer.
    pub dot_pop_magnitude: f64,
}

impl Default for Pattern {
    /// One ring of eight alternating hits on the first sound.
    fn default() -> Self {
        let mut pattern = Self::empty(DEFAULT_NAME, Tempo::default());
        let elements = (0..8).map(|i| i % 2 == 0).collect();
        pattern.push_layer(Layer::from_elements_unchecked(
            elements,
            0,
            pastel(&mut rand::thread_rng()),
        ));
        pattern
    }
}

impl Pattern {
    pub fn empty(name: impl Into<String>, tempo: Tempo) -> Self {
        Self {
            name: name.into(),
            tempo,
            layers: Vec::new(),
            global_mute: false,
            dot_base_size_factor: DEFAULT_DOT_BASE_SIZE_FACTOR,
            dot_pop_magnitude: DEFAULT_DOT_POP_MAGNITUDE,
        }
    }

    pub fn tempo(&self) -> Tempo {
        self.tempo
    }

    pub fn set_tempo(&mut self, tempo: Tempo) {
        self.tempo = tempo;
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn layer_mut(&mut self, index: usize) -> Result<&mut Layer, ConfigError> {
        self.layers.get_mut(index).ok_or(ConfigError::NoSuchLayer(index))
    }

    pub fn push_layer(&mut self, layer: Layer) -> usize {
        self.layers.push(layer);
        self.layers.len() - 1
    }

    /// Append a starter ring: four slots, on-off-on-off, next sound in the catalog.
    pub fn add_layer<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let sound = library::wrap_index(self.layers.len());
        let layer = Layer::from_elements_unchecked(vec![true, false, true, false], sound, pastel(rng));
        debug!(layer = self.layers.len(), sound, "layer added");
        self.push_layer(layer)
    }

    /// Front ends go through `RhythmPlayer::remove_layer`, which also drops the
    /// layer's pop timers.
    pub(crate) fn remove_layer(&mut self, index: usize) -> Result<Layer, ConfigError> {
        if index >= self.layers.len() {
            return Err(ConfigError::NoSuchLayer(index));
        }
        Ok(self.layers.remove(index))
    }

    pub fn set_muted(&mut self, index: usize, muted: bool) -> Result<(), ConfigError> {
        let layer = self.layer_mut(index)?;
        layer.muted = muted;
        if muted {
            layer.soloed = false;
        }
        Ok(())
    }

    pub fn toggle_mute(&mut self, index: usize) -> Result<bool, ConfigError> {
        let muted = !self.layer(index).ok_or(ConfigError::NoSuchLayer(index))?.muted;
        self.set_muted(index, muted)?;
        Ok(muted)
    }

    pub fn set_soloed(&mut self, index: usize, soloed: bool) -> Result<(), ConfigError> {
        if index >= self.layers.len() {
            return Err(ConfigError::NoSuchLayer(index));
        }
        if soloed {
            for (i, layer) in self.layers.iter_mut().enumerate() {
                layer.soloed = i == index;
            }
            self.layers[index].muted = false;
        } else {
            self.layers[index].soloed = false;
        }
        Ok(())
    }

    pub fn toggle_solo(&mut self, index: usize) -> Result<bool, ConfigError> {
        let soloed = !self.layer(index).ok_or(ConfigError::NoSuchLayer(index))?.soloed;
        self.set_soloed(index, soloed)?;
        Ok(soloed)
    }

    pub fn global_mute(&self) -> bool {
        self.global_mute
    }

    pub fn set_global_mute(&mut self, muted: bool) {
        self.global_mute = muted;
    }

    pub fn toggle_global_mute(&mut self) -> bool {
        self.global_mute = !self.global_mute;
        self.global_mute
    }

    pub fn any_soloed(&self) -> bool {
        self.layers.iter().any(Layer::is_soloed)
    }

    /// Whether hits on this layer should reach the synthesizer.
    pub fn is_audible(&self, index: usize) -> bool {
        if self.global_mute {
            return false;
        }
        let Some(layer) = self.layers.get(index) else {
            return false;
        };
        if self.any_soloed() {
            layer.soloed && !layer.muted
        } else {
            !layer.muted
        }
    }

    /// Repair flag combinations the mutators would never produce:
    /// a muted layer loses its solo, and only the first solo survives.
    pub(crate) fn normalize_flags(&mut self) {
        let mut seen_solo = false;
        for layer in &mut self.layers {
            if layer.muted {
                layer.soloed = false;
            }
            if layer.soloed {
                if seen_solo {
                    layer.soloed = false;
                }
                seen_solo = true;
            }
        }
    }
}
