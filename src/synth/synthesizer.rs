//! Turns one profile trigger into independent voices.
//!
//! Every component gets its own fresh chain:
//!
//! ```text
//!   oscillator ─┬─────────────────────→ (× gain envelope) → voice
//!   or noise    └→ filter (cutoff env) ─┘
//! ```
//!
//! Timelines are written once, here, on the control thread. The audio thread
//! only reads them. A component that cannot be built is logged and skipped;
//! its siblings still sound.

use tracing::{debug, warn};

use crate::{
    dsp::{
        envelope::{shape, ParamTimeline, CUTOFF_SHAPE, GAIN_SHAPE, PITCH_SHAPE},
        noise::NoiseBuffer,
    },
    error::SynthError,
    graph::{
        extensions::NodeExt,
        filter::FilterNode,
        gain::GainNode,
        node::GraphNode,
        oscillator::{NoiseNode, OscNode},
    },
    synth::{
        profile::{FilterSpec, GainEnvelope, SoundComponent, SoundProfile, Source, SweepEnvelope},
        voice::Voice,
    },
};

/// Stop time used when the scheduled one has already passed.
const LATE_STOP_OFFSET: f64 = 0.01;

/// Build one voice per playable component of `profile`, hit at `start`.
///
/// `now` is the current audio-clock time, `stop_padding` how long each
/// source keeps running after its release ramp ends.
pub fn build_voices(
    profile: &SoundProfile,
    start: f64,
    now: f64,
    noise: Option<&NoiseBuffer>,
    stop_padding: f64,
) -> Vec<Voice> {
    profile
        .components
        .iter()
        .enumerate()
        .filter_map(
            |(index, component)| match build_voice(component, start, now, noise, stop_padding) {
                Ok(voice) => Some(voice),
                Err(err) => {
                    debug!(profile = profile.name, component = index, %err, "skipping component");
                    None
                }
            },
        )
        .collect()
}

pub fn build_voice(
    component: &SoundComponent,
    start: f64,
    now: f64,
    noise: Option<&NoiseBuffer>,
    stop_padding: f64,
) -> Result<Voice, SynthError> {
    let source: Box<dyn GraphNode> = match &component.source {
        Source::Oscillator {
            waveform,
            initial_frequency,
            pitch,
        } => Box::new(OscNode::new(
            *waveform,
            frequency_timeline(*initial_frequency, pitch.as_ref(), start),
        )),
        Source::Noise => Box::new(NoiseNode::new(noise.ok_or(SynthError::NoiseUnavailable)?)),
    };

    let source: Box<dyn GraphNode> = match &component.filter {
        Some(filter) => Box::new(source.through(FilterNode::new(
            filter.kind,
            filter.q,
            cutoff_timeline(filter, start),
        ))),
        None => source,
    };

    let (gain, release_end) = gain_timeline(&component.gain, start);
    let chain = source.amplify(GainNode::new(gain));

    let mut voice = Voice::new(Box::new(chain), start + component.start_delay());
    if let Err(err) = voice.stop_at(release_end + stop_padding, now) {
        warn!(%err, "stopping voice early");
        voice.stop_at(now + LATE_STOP_OFFSET, now)?;
    }
    Ok(voice)
}

/// Oscillator frequency over time, swept by the pitch envelope if any.
pub fn frequency_timeline(initial: f32, pitch: Option<&SweepEnvelope>, start: f64) -> ParamTimeline {
    let mut timeline = ParamTimeline::new(initial);
    match pitch {
        Some(pitch) => {
            shape(&mut timeline, start, &pitch.stages(initial), &PITCH_SHAPE);
        }
        None => timeline.set_value_at(initial, start),
    }
    timeline
}

pub fn cutoff_timeline(filter: &FilterSpec, start: f64) -> ParamTimeline {
    let initial = filter.initial_frequency;
    let mut timeline = ParamTimeline::new(initial);
    match &filter.envelope {
        Some(sweep) => {
            shape(&mut timeline, start, &sweep.stages(initial), &CUTOFF_SHAPE);
        }
        None => timeline.set_value_at(initial, start),
    }
    timeline
}

/// Gain over time and the moment its release ramp ends.
pub fn gain_timeline(envelope: &GainEnvelope, start: f64) -> (ParamTimeline, f64) {
    let mut timeline = ParamTimeline::new(0.0);
    let end = shape(&mut timeline, start, &envelope.stages(), &GAIN_SHAPE);
    (timeline, end)
}
