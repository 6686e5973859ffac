//! Error types.
//!
//! Nothing here is ever shown to a listener directly: the front end decides
//! what to say. Synthesis failures in particular are logged and swallowed
//! per component so one bad component never silences its siblings.

use thiserror::Error;

/// Result type alias for crate operations
pub type Result<T> = std::result::Result<T, ZenError>;

#[derive(Error, Debug)]
pub enum ZenError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("invalid engine config: {0}")]
    ConfigFile(#[from] toml::de::Error),

    #[error("audio output unavailable: {reason}")]
    AudioUnavailable { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Values rejected at the input boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("bpm {0} outside 20..=300")]
    BpmOutOfRange(u32),

    #[error("beats per cycle {0} outside 1..=64")]
    BeatsPerCycleOutOfRange(u32),

    #[error("subdivisions {0} outside 1..=64")]
    SubdivisionsOutOfRange(usize),

    #[error("layer {0} does not exist")]
    NoSuchLayer(usize),

    #[error("element {element} outside layer of {subdivisions} subdivisions")]
    NoSuchElement { element: usize, subdivisions: usize },
}

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("pattern is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("pattern has no layers list")]
    MissingLayers,
}

/// Why a single sound component could not be scheduled.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SynthError {
    #[error("noise buffer not ready")]
    NoiseUnavailable,

    #[error("stop at {stop:.4}s is before {now:.4}s")]
    StopInPast { stop: f64, now: f64 },
}
