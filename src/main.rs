//! Keypad Countdown - a single countdown timer engine with an HTTP front end
//!
//! This is the main entry point for the keypad-countdown server.

use tokio::net::TcpListener;
use tracing::info;

use keypad_countdown::{
    api::create_router,
    config::Config,
    state::{AppState, TimerEngine},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("keypad_countdown={},tower_http=info", config.log_level()))
        .init();

    info!("Starting keypad-countdown server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms",
          config.host, config.port, config.tick_ms);

    let engine = TimerEngine::with_system_clock(config.tick_interval());
    let state = AppState::new(engine.clone(), config.host.clone(), config.port);
    let shutdown = state.shutdown.clone();
    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start          - Start or resume the countdown");
    info!("  POST /pause          - Pause the countdown");
    info!("  POST /stop           - Stop the countdown");
    info!("  POST /reset          - Reset a paused or completed countdown");
    info!("  POST /digit/:digit   - Type a keypad digit (0-9)");
    info!("  POST /clear          - Clear the duration");
    info!("  POST /backspace      - Delete the last digit");
    info!("  GET  /status         - Current timer snapshot");
    info!("  GET  /events         - Snapshot stream (SSE)");
    info!("  GET  /health         - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            shutdown.cancel();
        })
        .await?;

    engine.teardown();
    info!("Server shutdown complete");
    Ok(())
}
