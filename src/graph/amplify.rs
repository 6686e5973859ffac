use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// Final stage of a component: source (or filtered source) times its gain curve.
pub struct Amplify<S, G> {
    pub source: S,
    pub gain: G,
    /// Gain samples for the current block; sized once for `MAX_BLOCK_SIZE`.
    scratch: Vec<f32>,
}

impl<S, G> Amplify<S, G> {
    pub fn new(source: S, gain: G) -> Self {
        Self {
            source,
            gain,
            scratch: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<S: GraphNode, G: GraphNode> GraphNode for Amplify<S, G> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);

        let gain = &mut self.scratch[..out.len()];
        self.gain.render_block(gain, ctx);

        out.iter_mut().zip(gain.iter()).for_each(|(sample, g)| *sample *= g);
    }

    /// Silent once either side has gone quiet for good.
    fn is_active(&self) -> bool {
        self.gain.is_active() && self.source.is_active()
    }
}
