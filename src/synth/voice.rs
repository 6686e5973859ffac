use crate::{
    error::SynthError,
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// One scheduled component chain.
///
/// The chain only runs inside `[start, stop)` on the audio clock, so every
/// source begins at phase zero on the exact sample it was scheduled for. A
/// voice is never cancelled: once queued it plays until its stop time.
pub struct Voice {
    chain: Box<dyn GraphNode>,
    start: f64,
    stop: f64,
}

impl Voice {
    /// A voice that starts at `start` and has no stop time yet.
    pub fn new(chain: Box<dyn GraphNode>, start: f64) -> Self {
        Self {
            chain,
            start,
            stop: f64::INFINITY,
        }
    }

    /// Schedule the stop. Times already behind `now` are refused.
    pub fn stop_at(&mut self, stop: f64, now: f64) -> Result<(), SynthError> {
        if stop < now {
            return Err(SynthError::StopInPast { stop, now });
        }
        self.stop = stop;
        Ok(())
    }

    pub fn start_time(&self) -> f64 {
        self.start
    }

    pub fn stop_time(&self) -> f64 {
        self.stop
    }

    /// True once the audio clock has passed the stop time.
    pub fn is_finished(&self, now: f64) -> bool {
        now >= self.stop
    }

    /// Overwrite `out` with this voice's contribution to the block at `ctx.time`.
    ///
    /// `out` may be any length; the chain sees at most `MAX_BLOCK_SIZE` frames per call.
    pub fn render(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        out.fill(0.0);

        let sample_rate = ctx.sample_rate as f64;
        let first = frames_until(self.start - ctx.time, sample_rate).min(out.len());
        let end = frames_until(self.stop - ctx.time, sample_rate).min(out.len());
        if first >= end {
            return;
        }

        let mut offset = first;
        for chunk in out[first..end].chunks_mut(MAX_BLOCK_SIZE) {
            self.chain.render_block(chunk, &ctx.offset(offset));
            offset += chunk.len();
        }
    }
}

/// Index of the first sample at or after `seconds` from the block start.
fn frames_until(seconds: f64, sample_rate: f64) -> usize {
    // Saturating cast: an unscheduled stop (infinity) maps to usize::MAX.
    (seconds * sample_rate).ceil().max(0.0) as usize
}
