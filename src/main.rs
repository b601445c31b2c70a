//! Application entry point: F&I trainer.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Open the training settings store and the API token.
//! 4. Create the [`tokio`] runtime.
//! 5. Spawn the session worker with a [`TavusClient`].
//! 6. Run [`eframe::run_native`], which blocks the main thread until the window
//!    is closed.

use std::sync::Arc;

use eframe::egui;
use tokio::sync::mpsc;

use fi_trainer::{
    api::{ConversationApi, TavusClient},
    app::TrainerApp,
    config::{AppConfig, SettingsStore, TokenStore},
    session::{SessionCommand, SessionResult, SessionRunner},
};

fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    let (width, height) = config.ui.window_size;
    let mut vp = egui::ViewportBuilder::default()
        .with_inner_size([width, height])
        .with_min_inner_size([420.0, 360.0]);

    if let Some((x, y)) = config.ui.window_position {
        vp = vp.with_position(egui::pos2(x, y));
    }

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("F&I trainer starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Settings + token
    let store = SettingsStore::open_default();
    let tokens = TokenStore::load_or_default();
    log::info!("Loaded settings from {}", store.path().display());

    // 4. Tokio runtime (one worker is plenty for a handful of HTTP calls)
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("failed to create tokio runtime");

    // 5. Session worker
    let api: Arc<dyn ConversationApi> = Arc::new(TavusClient::from_config(&config.api));
    let (command_tx, command_rx) = mpsc::channel::<SessionCommand>(8);
    let (result_tx, result_rx) = mpsc::channel::<SessionResult>(8);
    rt.spawn(SessionRunner::new(api).run(command_rx, result_tx));

    // 6. UI
    let app = TrainerApp::new(store, tokens, command_tx, result_rx, config.clone());
    let options = native_options(&config);

    eframe::run_native(
        "F&I Training",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}
