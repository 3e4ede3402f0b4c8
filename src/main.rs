//! Boxing Mood - A round timer and theme service for combat-sport workouts
//!
//! This is the main entry point for the boxing-mood application.

use std::sync::Arc;
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use boxing_mood::{
    config::Config,
    services::FileStore,
    state::{find_profile, AppState, ThemeStore, TimerEngine},
    api::create_router,
    tasks::{theme_watch_task, tick_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("boxing_mood={},tower_http=info", config.log_level()))
        .init();

    info!("Starting boxing-mood server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, data_file={}, profile={}",
          config.host, config.port, config.data_file.display(), config.profile);

    // Timer starts from the requested profile
    let mut engine = TimerEngine::default();
    match find_profile(&config.profile) {
        Some(profile) => engine.apply_profile(profile),
        None => warn!("Unknown profile {}, using default timer settings", config.profile),
    }

    // Theme store reads custom themes and the selection from the data file
    let store = FileStore::open(&config.data_file)?;
    let themes = ThemeStore::load(Box::new(store));
    info!("Loaded {} themes, selected {}", themes.themes().len(), themes.selected_name());

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), engine, themes));

    // Start the background tasks
    let tick_state = Arc::clone(&state);
    tokio::spawn(async move {
        tick_task(tick_state).await;
    });
    let watch_state = Arc::clone(&state);
    tokio::spawn(async move {
        theme_watch_task(watch_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /timer                 - Current timer snapshot");
    info!("  POST /timer/start|pause|toggle|reset");
    info!("  PUT  /timer/config          - Replace timer configuration");
    info!("  PATCH /timer/config/:field  - Edit round|rest|prepare|warning");
    info!("  GET  /profiles, POST /profiles/:name");
    info!("  GET|POST|DELETE /themes, GET /themes/current, POST /themes/select/:name");
    info!("  GET  /themes/export, POST /themes/import");
    info!("  GET|POST /biometrics, POST /media");
    info!("  GET  /status, GET /health");

    // Serve until a shutdown signal arrives
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}
