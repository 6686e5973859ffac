use crate::{
    dsp::{
        envelope::ParamTimeline,
        noise::{NoiseBuffer, NoiseReader},
        oscillator::{Oscillator, Waveform},
    },
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/*
Sound Sources
=============

Every component of a sound profile starts from one of two sources:

  OscNode    A pitched waveform. Its frequency is a timeline, so a kick's
             "drop" from 150 Hz to 40 Hz is just breakpoints written when the
             hit is scheduled.

  NoiseNode  A looping read of the session's shared white-noise buffer.
             Unpitched; colour comes from the filter that follows it.

Both are rendered from sample 0 of their voice, so an oscillator always
starts at phase 0 and a noise reader at the start of the buffer.

Example usage:
  let mut freq = ParamTimeline::new(150.0);
  freq.set_value_at(150.0, start);
  freq.exponential_ramp_to(40.0, start + 0.05);
  let body = OscNode::new(Waveform::Sine, freq);
*/

pub struct OscNode {
    osc: Oscillator,
    frequency: ParamTimeline,
    freq_buffer: Vec<f32>,
}

impl OscNode {
    pub fn new(waveform: Waveform, frequency: ParamTimeline) -> Self {
        Self {
            osc: Oscillator::new(waveform),
            frequency,
            freq_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn frequency(&self) -> &ParamTimeline {
        &self.frequency
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let freqs = &mut self.freq_buffer[..out.len()];
        self.frequency.render(freqs, ctx.time, ctx.sample_rate);
        self.osc.render(out, freqs, ctx.sample_rate);
    }
}

pub struct NoiseNode {
    reader: NoiseReader,
}

impl NoiseNode {
    pub fn new(buffer: &NoiseBuffer) -> Self {
        Self {
            reader: buffer.reader(),
        }
    }
}

impl GraphNode for NoiseNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        self.reader.render(out);
    }
}
