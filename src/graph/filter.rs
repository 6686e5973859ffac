use crate::{
    dsp::{
        envelope::ParamTimeline,
        filter::{FilterKind, SVFilter},
    },
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/*
Filter Stage
============

Sits between a source and its gain stage. Percussion uses it to colour
noise: a high-pass for hats, a band-pass for snare wires, a low-pass to
soften a click. The cutoff is a timeline, so a crash can open bright and
close down over half a second:

  let mut cutoff = ParamTimeline::new(7000.0);
  cutoff.set_value_at(7000.0, start);
  cutoff.exponential_ramp_to(2000.0, start + 0.6);
  let wash = NoiseNode::new(&noise).through(FilterNode::new(FilterKind::Bandpass, 0.5, cutoff));
*/

pub struct FilterNode {
    filter: SVFilter,
    cutoff: ParamTimeline,
    cutoff_buffer: Vec<f32>,
}

impl FilterNode {
    pub fn new(kind: FilterKind, q: f32, cutoff: ParamTimeline) -> Self {
        Self {
            filter: SVFilter::new(kind, q),
            cutoff,
            cutoff_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn kind(&self) -> FilterKind {
        self.filter.kind()
    }

    pub fn cutoff(&self) -> &ParamTimeline {
        &self.cutoff
    }
}

impl GraphNode for FilterNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let cutoffs = &mut self.cutoff_buffer[..out.len()];
        self.cutoff.render(cutoffs, ctx.time, ctx.sample_rate);
        self.filter.render(out, cutoffs, ctx.sample_rate);
    }
}
