use crate::graph::{amplify::Amplify, node::GraphNode, through::Through};

/// Chain-building methods available on every node, so a component reads in
/// signal order: `osc.through(filter).amplify(gain)`.
pub trait NodeExt: GraphNode + Sized {
    /// Scale this signal sample by sample with a gain node's output.
    fn amplify<G: GraphNode>(self, gain: G) -> Amplify<Self, G> {
        Amplify::new(self, gain)
    }

    /// Feed this signal into `stage` in place.
    fn through<F: GraphNode>(self, stage: F) -> Through<Self, F> {
        Through::new(self, stage)
    }
}

impl<T: GraphNode> NodeExt for T {}
