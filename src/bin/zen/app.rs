//! Audio output and application wiring

use std::{path::PathBuf, sync::Arc};

use color_eyre::eyre::{bail, eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{error, info, warn};
use zen_rhythm::{
    engine::{Activation, AudioEngine},
    runtime::RhythmPlayer,
    sequencing::{persist::PatternStore, Pattern},
    EngineConfig,
};

use super::ui::ZenUi;

/// Run the visualizer until the user quits.
///
/// Missing audio hardware is not fatal: the circle keeps turning and
/// popping, it just makes no sound.
pub fn run(pattern: Pattern, config: EngineConfig, save_dir: PathBuf) -> EyreResult<()> {
    let engine = AudioEngine::shared_with(config.clone());

    let stream = match start_audio(&engine) {
        Ok(stream) => Some(stream),
        Err(err) => {
            warn!(%err, "audio unavailable, running silent");
            None
        }
    };

    let store = PatternStore::open(&save_dir)
        .wrap_err_with(|| format!("failed to open pattern directory {}", save_dir.display()))?;
    let player = RhythmPlayer::new(pattern, engine.clone(), &config);
    let mut ui = ZenUi::new(player, store, stream.is_some());

    let mut terminal = ratatui::init();
    let result = ui.run(&mut terminal);
    ratatui::restore();

    drop(stream);
    result
}

/// Open the default output device and hand the engine's mixer to its callback.
fn start_audio(engine: &Arc<AudioEngine>) -> EyreResult<cpal::Stream> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;

    let Activation::Started(mut mixer) = engine.activate(sample_rate) else {
        bail!("audio engine was already activated");
    };

    let stream = (|| -> EyreResult<cpal::Stream> {
        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| mixer.render_interleaved(data, channels),
            |err| error!(%err, "audio stream error"),
            None,
        )?;
        stream.play()?;
        Ok(stream)
    })();

    // Nobody will drain the voice queue without a running stream.
    let stream = match stream {
        Ok(stream) => stream,
        Err(err) => {
            engine.deactivate();
            return Err(err.wrap_err("failed to start output stream"));
        }
    };

    info!(sample_rate, channels, "audio stream started");
    Ok(stream)
}
