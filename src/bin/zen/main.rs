//! zen - terminal rhythm circle
//!
//! Run with: cargo run --bin zen -- --pattern my_rhythm.json

mod app;
mod ui;

use std::{fs::File, path::PathBuf, sync::Mutex};

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing_subscriber::EnvFilter;
use zen_rhythm::{
    sequencing::{persist, Pattern},
    synth::library,
    EngineConfig,
};

#[derive(Parser, Debug)]
#[command(name = "zen", version, about = "Play and edit a circular polyrhythm in the terminal")]
struct Args {
    /// Pattern file (JSON) to open; the built-in pattern is used when omitted
    #[arg(short, long)]
    pattern: Option<PathBuf>,

    /// Engine settings (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory patterns are saved into
    #[arg(long, default_value = "patterns")]
    save_dir: PathBuf,

    /// Log file (the terminal belongs to the UI while it runs)
    #[arg(long, default_value = "zen.log")]
    log_file: PathBuf,

    /// Print the sound catalog and exit
    #[arg(long)]
    list_sounds: bool,
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if args.list_sounds {
        for (index, profile) in library::library().iter().enumerate() {
            println!("{index:>2}  {:<24} {:.2}s", profile.name, profile.overall_duration);
        }
        return Ok(());
    }

    init_logging(&args.log_file)?;

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .wrap_err_with(|| format!("failed to read engine config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let pattern = match &args.pattern {
        Some(path) => persist::load_from_path(path)
            .wrap_err_with(|| format!("failed to load pattern {}", path.display()))?,
        None => Pattern::default(),
    };

    app::run(pattern, config, args.save_dir)
}

fn init_logging(path: &PathBuf) -> EyreResult<()> {
    let file = File::create(path).wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
