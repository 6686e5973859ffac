//! Pattern documents on disk.
//!
//! Patterns are stored as camelCase JSON so files move freely between this
//! crate and the browser version of the visualizer:
//!
//! ```json
//! {
//!   "patternName": "MyZenRhythm",
//!   "bpm": 100,
//!   "beatsPerCycle": 8,
//!   "layers": [
//!     { "subdivisions": 4, "activeElements": [true, false, true, false],
//!       "color": "#a3d9c9", "soundProfileIndex": 0,
//!       "isMuted": false, "isSoloed": false }
//!   ],
//!   "dotBaseSizeFactor": 0.02,
//!   "dotPopMagnitude": 1.5
//! }
//! ```
//!
//! Loading is forgiving: any field may be missing, and a zero counts as
//! missing. Values outside the allowed ranges are clamped and
//! `activeElements` is fitted to `subdivisions`. Only a document without a
//! `layers` list is rejected.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    error::{PatternError, Result},
    sequencing::{
        clock::Tempo,
        color::pastel,
        layer::{Layer, MAX_SUBDIVISIONS},
        pattern::{Pattern, DEFAULT_DOT_BASE_SIZE_FACTOR, DEFAULT_DOT_POP_MAGNITUDE},
    },
    synth::library,
};

const LOADED_NAME: &str = "LoadedPattern";
const DEFAULT_BPM: u32 = 100;
const DEFAULT_BEATS_PER_CYCLE: u32 = 8;
const DEFAULT_SUBDIVISIONS: usize = 4;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternDocument {
    #[serde(default)]
    pub pattern_name: Option<String>,
    #[serde(default)]
    pub bpm: Option<u32>,
    #[serde(default)]
    pub beats_per_cycle: Option<u32>,
    #[serde(default)]
    pub layers: Option<Vec<LayerDocument>>,
    #[serde(default)]
    pub dot_base_size_factor: Option<f64>,
    #[serde(default)]
    pub dot_pop_magnitude: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerDocument {
    #[serde(default)]
    pub subdivisions: Option<usize>,
    #[serde(default)]
    pub active_elements: Option<Vec<bool>>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub sound_profile_index: Option<usize>,
    #[serde(default)]
    pub is_muted: Option<bool>,
    #[serde(default)]
    pub is_soloed: Option<bool>,
}

impl PatternDocument {
    pub fn from_pattern(pattern: &Pattern) -> Self {
        Self {
            pattern_name: Some(pattern.name.clone()),
            bpm: Some(pattern.tempo().bpm()),
            beats_per_cycle: Some(pattern.tempo().beats_per_cycle()),
            layers: Some(
                pattern
                    .layers()
                    .iter()
                    .map(|layer| LayerDocument {
                        subdivisions: Some(layer.subdivisions()),
                        active_elements: Some(layer.elements().to_vec()),
                        color: Some(layer.color().to_owned()),
                        sound_profile_index: Some(layer.sound_index()),
                        is_muted: Some(layer.is_muted()),
                        is_soloed: Some(layer.is_soloed()),
                    })
                    .collect(),
            ),
            dot_base_size_factor: Some(pattern.dot_base_size_factor),
            dot_pop_magnitude: Some(pattern.dot_pop_magnitude),
        }
    }

    /// Build a pattern, filling gaps with defaults. Missing colours are drawn from `rng`.
    pub fn into_pattern<R: Rng + ?Sized>(self, rng: &mut R) -> Result<Pattern> {
        let layers = self.layers.ok_or(PatternError::MissingLayers)?;

        let bpm = nonzero(self.bpm).unwrap_or(DEFAULT_BPM);
        let beats = nonzero(self.beats_per_cycle).unwrap_or(DEFAULT_BEATS_PER_CYCLE);
        let tempo = Tempo::clamped(bpm, beats);
        if (tempo.bpm(), tempo.beats_per_cycle()) != (bpm, beats) {
            warn!(bpm, beats, "tempo out of range, clamped");
        }

        let name = self
            .pattern_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| LOADED_NAME.to_owned());

        let mut pattern = Pattern::empty(name, tempo);
        pattern.dot_base_size_factor = positive(self.dot_base_size_factor).unwrap_or(DEFAULT_DOT_BASE_SIZE_FACTOR);
        pattern.dot_pop_magnitude = positive(self.dot_pop_magnitude).unwrap_or(DEFAULT_DOT_POP_MAGNITUDE);

        for (index, doc) in layers.into_iter().enumerate() {
            pattern.push_layer(doc.into_layer(index, rng));
        }
        pattern.normalize_flags();
        Ok(pattern)
    }
}

impl LayerDocument {
    fn into_layer<R: Rng + ?Sized>(self, index: usize, rng: &mut R) -> Layer {
        let requested = nonzero(self.subdivisions).unwrap_or(DEFAULT_SUBDIVISIONS);
        let subdivisions = requested.min(MAX_SUBDIVISIONS);
        if subdivisions != requested {
            warn!(layer = index, requested, "subdivisions out of range, clamped");
        }

        let mut elements = self.active_elements.unwrap_or_default();
        elements.resize(subdivisions, false);

        // A stale sound index falls back to the layer's position in the catalog.
        let sound = match self.sound_profile_index {
            Some(sound) if sound < library::library().len() => sound,
            _ => library::wrap_index(index),
        };

        let color = self
            .color
            .filter(|color| !color.is_empty())
            .unwrap_or_else(|| pastel(rng));

        let mut layer = Layer::from_elements_unchecked(elements, sound, color);
        layer.muted = self.is_muted.unwrap_or(false);
        layer.soloed = self.is_soloed.unwrap_or(false);
        layer
    }
}

fn nonzero<T: Default + PartialEq>(value: Option<T>) -> Option<T> {
    value.filter(|v| *v != T::default())
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

pub fn to_json(pattern: &Pattern) -> Result<String> {
    let json = serde_json::to_string_pretty(&PatternDocument::from_pattern(pattern))
        .map_err(PatternError::from)?;
    Ok(json)
}

pub fn from_json(text: &str) -> Result<Pattern> {
    from_json_with_rng(text, &mut rand::thread_rng())
}

pub fn from_json_with_rng<R: Rng + ?Sized>(text: &str, rng: &mut R) -> Result<Pattern> {
    let document: PatternDocument = serde_json::from_str(text).map_err(PatternError::from)?;
    document.into_pattern(rng)
}

pub fn save_to_path(pattern: &Pattern, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_json(pattern)?)?;
    info!(name = %pattern.name, path = %path.display(), "pattern saved");
    Ok(())
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<Pattern> {
    let path = path.as_ref();
    let pattern = from_json(&fs::read_to_string(path)?)?;
    info!(name = %pattern.name, path = %path.display(), layers = pattern.layers().len(), "pattern loaded");
    Ok(pattern)
}

/// File name for exporting a pattern: ASCII letters and digits kept, everything else `_`.
pub fn file_name_for(pattern_name: &str) -> String {
    let stem: String = pattern_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{stem}.json")
}

/// A directory of named patterns, one file each.
pub struct PatternStore {
    dir: PathBuf,
}

impl PatternStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(file_name_for(name))
    }

    /// Save under the pattern's own name, replacing any earlier version.
    pub fn save(&self, pattern: &Pattern) -> Result<PathBuf> {
        let path = self.path_for(&pattern.name);
        save_to_path(pattern, &path)?;
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<Pattern> {
        load_from_path(self.path_for(name))
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        fs::remove_file(self.path_for(name))?;
        Ok(())
    }

    /// Stems of every stored pattern file, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_owned());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ZenError;
    use rand::{rngs::StdRng, SeedableRng};

    fn load(text: &str) -> Pattern {
        from_json_with_rng(text, &mut StdRng::seed_from_u64(5)).unwrap()
    }

    #[test]
    fn empty_layers_get_every_default() {
        let pattern = load(r#"{ "layers": [ {} ] }"#);

        assert_eq!(pattern.name, "LoadedPattern");
        assert_eq!(pattern.tempo(), Tempo::new(100, 8).unwrap());
        assert_eq!(pattern.dot_base_size_factor, 0.02);
        assert_eq!(pattern.dot_pop_magnitude, 1.5);

        let layer = &pattern.layers()[0];
        assert_eq!(layer.subdivisions(), 4);
        assert_eq!(layer.elements(), &[false; 4]);
        assert!(layer.color().starts_with('#'));
        assert!(!layer.is_muted());
        assert!(!layer.is_soloed());
    }

    #[test]
    fn zero_counts_as_missing() {
        let pattern = load(r#"{ "bpm": 0, "beatsPerCycle": 0, "layers": [ { "subdivisions": 0 } ] }"#);

        assert_eq!(pattern.tempo(), Tempo::new(100, 8).unwrap());
        assert_eq!(pattern.layers()[0].subdivisions(), 4);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let pattern = load(r#"{ "bpm": 999, "beatsPerCycle": 100, "layers": [ { "subdivisions": 200 } ] }"#);

        assert_eq!(pattern.tempo(), Tempo::new(300, 64).unwrap());
        assert_eq!(pattern.layers()[0].subdivisions(), 64);
    }

    #[test]
    fn elements_fitted_to_subdivisions() {
        let pattern = load(
            r#"{ "layers": [
                { "subdivisions": 2, "activeElements": [true, true, true] },
                { "subdivisions": 3, "activeElements": [true] }
            ] }"#,
        );

        assert_eq!(pattern.layers()[0].elements(), &[true, true]);
        assert_eq!(pattern.layers()[1].elements(), &[true, false, false]);
    }

    #[test]
    fn stale_sound_index_uses_layer_position() {
        let pattern = load(
            r#"{ "layers": [
                { "soundProfileIndex": 3 },
                { "soundProfileIndex": 99 },
                {}
            ] }"#,
        );

        let sounds: Vec<_> = pattern.layers().iter().map(Layer::sound_index).collect();
        assert_eq!(sounds, vec![3, 1, 2]);
    }

    #[test]
    fn missing_layers_is_an_error() {
        let err = from_json(r#"{ "bpm": 120 }"#).unwrap_err();
        assert!(matches!(err, ZenError::Pattern(PatternError::MissingLayers)));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let err = from_json("{ not json").unwrap_err();
        assert!(matches!(err, ZenError::Pattern(PatternError::Json(_))));
    }

    #[test]
    fn saved_document_uses_camel_case() {
        let json = to_json(&Pattern::default()).unwrap();

        assert!(json.contains("\"patternName\": \"MyZenRhythm\""));
        assert!(json.contains("\"beatsPerCycle\": 8"));
        assert!(json.contains("\"activeElements\""));
        assert!(json.contains("\"isSoloed\": false"));
    }

    #[test]
    fn sanitizes_file_names() {
        assert_eq!(file_name_for("My Zen/Rhythm #2"), "My_Zen_Rhythm__2.json");
        assert_eq!(file_name_for("plain"), "plain.json");
        assert_eq!(file_name_for("café"), "caf_.json");
    }

    #[test]
    fn store_lists_saves_loads_and_deletes() {
        let dir = tempfile::tempdir().unwrap();
        let store = PatternStore::open(dir.path().join("patterns")).unwrap();

        let mut pattern = Pattern::default();
        pattern.name = "Evening Groove".into();
        store.save(&pattern).unwrap();

        assert_eq!(store.list().unwrap(), vec!["Evening_Groove".to_owned()]);

        let loaded = store.load("Evening Groove").unwrap();
        assert_eq!(loaded.layers(), pattern.layers());

        store.delete("Evening Groove").unwrap();
        assert!(store.list().unwrap().is_empty());
    }
}
