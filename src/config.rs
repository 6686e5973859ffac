//! Engine tuning, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) gives the
//! stock behaviour. Only the values a user wants to change need to appear:
//!
//! ```toml
//! master_gain = 0.4
//! voice_capacity = 64
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Scalar applied to the summed output of every voice.
    pub master_gain: f32,
    /// Length of the shared white-noise buffer.
    pub noise_seconds: f32,
    /// Lifetime of a dot's pop animation, in seconds.
    pub max_pop_duration: f64,
    /// Longest frame delta fed to the clock; longer frames are clamped.
    pub max_frame_delta: f64,
    /// Time a voice keeps running after its last release ramp.
    pub stop_padding: f64,
    /// Voices the mixer renders at once. Oldest voices are stolen beyond this.
    pub voice_capacity: usize,
    /// Slots in the control-to-audio voice queue.
    pub queue_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            master_gain: 0.6,
            noise_seconds: 2.0,
            max_pop_duration: 0.15,
            max_frame_delta: 0.25,
            stop_padding: 0.05,
            voice_capacity: 128,
            queue_capacity: 256,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ZenError;
    use std::io::Write;

    #[test]
    fn empty_document_gives_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn partial_document_overrides_named_fields() {
        let config = EngineConfig::from_toml_str("master_gain = 0.25\nvoice_capacity = 8\n").unwrap();

        assert_eq!(config.master_gain, 0.25);
        assert_eq!(config.voice_capacity, 8);
        assert_eq!(config.queue_capacity, 256);
    }

    #[test]
    fn rejects_wrong_types() {
        let err = EngineConfig::from_toml_str("voice_capacity = \"many\"").unwrap_err();
        assert!(matches!(err, ZenError::ConfigFile(_)));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_pop_duration = 0.3").unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.max_pop_duration, 0.3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ZenError::Io(_)));
    }
}
