pub mod config;
pub mod dsp;
pub mod engine; // Audio session, master bus, voice queue
pub mod error;
pub mod graph; // Composable audio graph nodes
pub mod runtime; // Frame-driven playback
pub mod sequencing; // Cycle timing, layers and patterns
pub mod synth; // Sound profiles and voice building

pub use config::EngineConfig;
pub use error::{Result, ZenError};

pub const MAX_BLOCK_SIZE: usize = 2048;
