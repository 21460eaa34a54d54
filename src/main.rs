//! BackTune - YouTube with your own background sound
//!
//! This is the main entry point. It loads settings, starts the audio engine
//! and the reminder schedule, and runs the terminal UI until the user quits.

use std::{
    fs::{File, create_dir_all},
    path::PathBuf,
    sync::{Arc, Mutex},
};

use {
    anyhow::Result,
    clap::Parser,
    tokio::task::block_in_place,
    tracing::{info, warn},
    tracing_subscriber::EnvFilter,
};

use backtune::{
    audio::{AudioEngine, OutputConfig},
    config::{SettingsManager, get_cache_dir},
    error::ResultExt,
    notification::{DesktopNotifier, NotificationScheduler, NotificationWorker, REMINDER_INTERVAL},
    service::{BackgroundSoundService, SoundLibrary},
    state::{PlayerState, SharedIntentState},
    ui::BackTuneApplication,
    video::{BrowserLauncher, parse_video_url},
};

#[derive(Parser)]
#[command(name = "backtune")]
#[command(
    version,
    about = "Watch YouTube with a looping ambient background sound"
)]
struct Args {
    /// YouTube link to open right away
    url: Option<String>,

    /// Settings file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the rain, waves and forest sound files
    #[arg(long)]
    sounds_dir: Option<PathBuf>,
}

/// Sends logs to a file so they do not tear through the terminal UI.
fn init_logging() -> Result<PathBuf> {
    let cache_dir = get_cache_dir();
    create_dir_all(&cache_dir).add_contextf(format!("Creating {cache_dir:?}"))?;
    let log_path = cache_dir.join("backtune.log");
    let log_file = File::create(&log_path).add_contextf(format!("Creating {log_path:?}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    Ok(log_path)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_path = init_logging()?;
    info!("BackTune starting, logging to {log_path:?}");

    let settings = Arc::new(
        match args.config {
            Some(path) => SettingsManager::with_config_path(path),
            None => SettingsManager::new(),
        }
        .add_context("Failed to load settings")?,
    );

    let (sounds_dir, output_config) = {
        let current = settings.get_settings();
        (
            args.sounds_dir.unwrap_or_else(|| current.sounds_dir()),
            OutputConfig {
                device_name: current.audio_device.clone(),
                buffer_duration_ms: current.buffer_duration_ms,
            },
        )
    };
    info!("Looking up sounds in {sounds_dir:?}");

    let engine = AudioEngine::new(output_config).add_context("Failed to start audio engine")?;
    let service = BackgroundSoundService::new(engine, SoundLibrary::new(sounds_dir));
    let player_state = PlayerState::new(service);

    let shared_intent = Arc::new(SharedIntentState::new());
    if let Some(url) = args.url {
        match parse_video_url(&url) {
            Some(video_id) => shared_intent.set_shared_video_id(video_id),
            None => warn!("Ignoring shared text without a YouTube video: {url}"),
        }
    }

    let worker = Arc::new(NotificationWorker::new(
        Arc::new(DesktopNotifier::new()),
        Arc::<SettingsManager>::clone(&settings),
    ));
    let scheduler = NotificationScheduler::start(worker, REMINDER_INTERVAL);

    let mut app = BackTuneApplication::new(
        player_state,
        shared_intent,
        settings,
        Arc::new(BrowserLauncher),
    );

    let mut terminal = ratatui::init();
    let result = block_in_place(|| app.run(&mut terminal));
    ratatui::restore();

    scheduler.shutdown().await;
    // Releases the player and joins the audio thread
    drop(app);
    info!("BackTune stopped");

    result.add_context("Terminal UI failed")
}
