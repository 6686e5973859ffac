use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, MutexGuard, OnceLock, PoisonError,
};

use rand::Rng;
use rtrb::{Producer, RingBuffer};
use tracing::{debug, info};

use crate::{
    config::EngineConfig,
    dsp::noise::NoiseBuffer,
    engine::{mixer::Mixer, VoiceSink},
    synth::{profile::SoundProfile, synthesizer::build_voices, voice::Voice},
};

static SHARED: OnceLock<Arc<AudioEngine>> = OnceLock::new();

/// Result of `AudioEngine::activate`.
pub enum Activation {
    /// First activation: the caller must drive this mixer from its audio callback.
    Started(Mixer),
    /// The session already exists; nothing was recreated.
    AlreadyActive,
}

/// Control-thread state that exists once audio has been activated.
struct Session {
    sample_rate: f32,
    noise: NoiseBuffer,
    tx: Producer<Voice>,
    frames: Arc<AtomicU64>,
}

/// Process-wide audio resource.
///
/// Created inert. `activate` builds the noise buffer, the voice queue and the
/// mixer exactly once; until then every trigger is a silent no-op, which is
/// how hits keep animating on machines with no audio output at all.
pub struct AudioEngine {
    config: EngineConfig,
    session: Mutex<Option<Session>>,
}

impl AudioEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            session: Mutex::new(None),
        }
    }

    /// The shared engine, created with default settings on first use.
    pub fn shared() -> Arc<AudioEngine> {
        Self::shared_with(EngineConfig::default())
    }

    /// The shared engine. `config` only applies if this call creates it.
    pub fn shared_with(config: EngineConfig) -> Arc<AudioEngine> {
        SHARED.get_or_init(|| Arc::new(AudioEngine::new(config))).clone()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn activate(&self, sample_rate: f32) -> Activation {
        self.activate_with_rng(sample_rate, &mut rand::thread_rng())
    }

    /// `activate` with an explicit noise source, for reproducible sessions.
    pub fn activate_with_rng<R: Rng + ?Sized>(&self, sample_rate: f32, rng: &mut R) -> Activation {
        let mut session = self.lock();
        if session.is_some() {
            debug!("audio already active");
            return Activation::AlreadyActive;
        }

        let noise = NoiseBuffer::generate(rng, sample_rate, self.config.noise_seconds);
        let (tx, rx) = RingBuffer::new(self.config.queue_capacity.max(1));
        let frames = Arc::new(AtomicU64::new(0));
        let mixer = Mixer::new(
            rx,
            sample_rate,
            self.config.voice_capacity,
            self.config.master_gain,
            frames.clone(),
        );

        info!(
            sample_rate,
            noise_samples = noise.len(),
            master_gain = self.config.master_gain,
            "audio activated"
        );
        *session = Some(Session {
            sample_rate,
            noise,
            tx,
            frames,
        });
        Activation::Started(mixer)
    }

    /// Tear the session down so triggers go back to being no-ops.
    ///
    /// For when the mixer handed out by `activate` will never be driven,
    /// e.g. the output stream failed to start. A later `activate` starts fresh.
    pub fn deactivate(&self) -> bool {
        let was_active = self.lock().take().is_some();
        if was_active {
            info!("audio deactivated");
        }
        was_active
    }

    pub fn is_ready(&self) -> bool {
        self.lock().is_some()
    }

    /// Audio-clock time in seconds, or `None` before activation.
    pub fn current_time(&self) -> Option<f64> {
        self.lock()
            .as_ref()
            .map(|s| s.frames.load(Ordering::Acquire) as f64 / s.sample_rate as f64)
    }

    /// Schedule `profile` to sound now. Returns how many voices were queued.
    pub fn trigger(&self, profile: &SoundProfile) -> usize {
        let mut guard = self.lock();
        let Some(session) = guard.as_mut() else {
            return 0;
        };

        let now = session.frames.load(Ordering::Acquire) as f64 / session.sample_rate as f64;
        let voices = build_voices(profile, now, now, Some(&session.noise), self.config.stop_padding);

        let mut queued = 0;
        for voice in voices {
            match session.tx.push(voice) {
                Ok(()) => queued += 1,
                Err(_) => {
                    debug!(profile = profile.name, "voice queue full, dropping voice");
                    break;
                }
            }
        }
        queued
    }

    fn lock(&self) -> MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl VoiceSink for AudioEngine {
    fn trigger(&mut self, profile: &SoundProfile) {
        AudioEngine::trigger(self, profile);
    }
}

impl VoiceSink for Arc<AudioEngine> {
    fn trigger(&mut self, profile: &SoundProfile) {
        AudioEngine::trigger(&**self, profile);
    }
}
