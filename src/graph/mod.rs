//! Composable building blocks for one component's signal chain.
//!
//! Graph nodes wrap the low-level DSP primitives and read their parameters
//! from timelines written at scheduling time. The `extensions` module adds
//! fluent helpers so a chain reads in signal order:
//! `source.through(filter).amplify(gain)`.

/// Multiply a signal by a control signal (the gain stage).
pub mod amplify;
/// Fluent combinators (`.amplify()`, `.through()`).
pub mod extensions;
/// Filter stage with a cutoff timeline.
pub mod filter;
/// Gain timeline rendered as a control signal.
pub mod gain;
/// Core traits shared by all graph nodes.
pub mod node;
/// Oscillator and noise sources.
pub mod oscillator;
/// Serial chaining of two nodes (source → effect).
pub mod through;

pub use node::{GraphNode, RenderCtx};
