//! Real-world scenario benchmarks.
//!
//! These model what a running visualizer actually does: mixing every voice
//! of a dense profile, and sweeping a busy pattern once per frame.

mod hits;
mod voices;

pub use hits::bench_hits;
pub use voices::bench_voices;
