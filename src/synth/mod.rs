// Purpose: percussion profiles and the voices they turn into
// This layer sits above graph nodes: it decides which chain each component gets

pub mod library;
pub mod profile;
pub mod synthesizer;
pub mod voice;

pub use library::{library, profile};
pub use profile::{FilterSpec, GainEnvelope, SoundComponent, SoundProfile, Source, SweepEnvelope};
pub use synthesizer::build_voices;
pub use voice::Voice;
