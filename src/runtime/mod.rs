//! Frame-driven playback.
//!
//! `RhythmPlayer` is the piece a front end drives: call `tick` once per
//! rendered frame, draw from `frame_view`, and hand it a `VoiceSink` to hear
//! the hits.
//!
//! # Example
//!
//! ```ignore
//! use zen_rhythm::{engine::AudioEngine, runtime::RhythmPlayer, sequencing::Pattern, EngineConfig};
//!
//! let engine = AudioEngine::shared();
//! let mut player = RhythmPlayer::new(Pattern::default(), engine, &EngineConfig::default());
//! loop {
//!     let hits = player.tick(1.0 / 60.0);
//!     let view = player.frame_view();
//!     // draw view.hand_angle and view.dots
//! }
//! ```

mod player;

pub use player::{DotView, FrameView, Hit, RhythmPlayer};
