use crate::{
    dsp::envelope::ParamTimeline,
    graph::node::{GraphNode, RenderCtx},
};

/// Renders a gain timeline as a control signal.
///
/// Used as the modulator of an `Amplify`, this is the per-component gain
/// stage: the source signal is multiplied by the envelope sample by sample.
pub struct GainNode {
    gain: ParamTimeline,
}

impl GainNode {
    pub fn new(gain: ParamTimeline) -> Self {
        Self { gain }
    }

    pub fn gain(&self) -> &ParamTimeline {
        &self.gain
    }
}

impl GraphNode for GainNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.gain.render(out, ctx.time, ctx.sample_rate);
    }
}
