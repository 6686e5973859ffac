use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use rtrb::Consumer;

use crate::{graph::node::RenderCtx, synth::voice::Voice, MAX_BLOCK_SIZE};

/// Audio-thread half of the engine: sums live voices into the master stage.
///
/// Owns the only mutable view of the voice list. The control thread reaches
/// it solely through the voice queue, and reads the shared frame clock to
/// know what "now" is when scheduling. Nothing in here logs or locks.
pub struct Mixer {
    rx: Consumer<Voice>,
    voices: Vec<Voice>,
    capacity: usize,
    master_gain: f32,
    sample_rate: f32,
    frames: Arc<AtomicU64>,
    voice_buffer: Vec<f32>,
    mono_buffer: Vec<f32>,
}

impl Mixer {
    pub fn new(
        rx: Consumer<Voice>,
        sample_rate: f32,
        capacity: usize,
        master_gain: f32,
        frames: Arc<AtomicU64>,
    ) -> Self {
        let capacity = capacity.max(1);
        Self {
            rx,
            voices: Vec::with_capacity(capacity),
            capacity,
            master_gain,
            sample_rate,
            frames,
            voice_buffer: vec![0.0; MAX_BLOCK_SIZE],
            mono_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    /// Audio-clock time of the next sample to be rendered.
    pub fn time(&self) -> f64 {
        self.frames.load(Ordering::Acquire) as f64 / self.sample_rate as f64
    }

    /// Render a mono buffer of any length.
    pub fn render(&mut self, out: &mut [f32]) {
        self.drain_queue();
        for block in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.render_block(block);
        }
    }

    /// Render into an interleaved buffer, copying the mono mix to every channel.
    pub fn render_interleaved(&mut self, data: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        self.drain_queue();

        let mut mono = std::mem::take(&mut self.mono_buffer);
        for frame_block in data.chunks_mut(MAX_BLOCK_SIZE * channels) {
            let frames = frame_block.len() / channels;
            let block = &mut mono[..frames];
            self.render_block(block);

            for (frame, &sample) in frame_block.chunks_mut(channels).zip(block.iter()) {
                frame.fill(sample);
            }
        }
        self.mono_buffer = mono;
    }

    fn drain_queue(&mut self) {
        while let Ok(voice) = self.rx.pop() {
            self.admit(voice);
        }
    }

    fn admit(&mut self, voice: Voice) {
        if self.voices.len() >= self.capacity {
            // Steal the voice that started first.
            let oldest = self
                .voices
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| a.start_time().total_cmp(&b.start_time()))
                .map(|(index, _)| index);
            if let Some(index) = oldest {
                self.voices.swap_remove(index);
            }
        }
        self.voices.push(voice);
    }

    fn render_block(&mut self, out: &mut [f32]) {
        let frames = out.len();
        let start_frame = self.frames.load(Ordering::Acquire);
        let ctx = RenderCtx::new(self.sample_rate, start_frame as f64 / self.sample_rate as f64);

        out.fill(0.0);
        let scratch = &mut self.voice_buffer[..frames];
        for voice in &mut self.voices {
            voice.render(scratch, &ctx);
            for (o, &v) in out.iter_mut().zip(scratch.iter()) {
                *o += v;
            }
        }

        for sample in out.iter_mut() {
            *sample *= self.master_gain;
        }

        let end_frame = start_frame + frames as u64;
        self.frames.store(end_frame, Ordering::Release);

        let end_time = end_frame as f64 / self.sample_rate as f64;
        self.voices.retain(|voice| !voice.is_finished(end_time));
    }
}
