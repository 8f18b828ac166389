//! Dial Timer - A circular countdown timer served over HTTP
//!
//! This is the main entry point for the dial-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use dial_timer::{
    api::create_router,
    config::Config,
    dial::{format_label, DialGeometry},
    state::AppState,
    tasks::ticker_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("dial_timer={},tower_http=info", config.log_level()))
        .init();

    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {}", e);
        std::process::exit(2);
    }

    info!("Starting dial-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, duration={}, tick={:?}",
          config.host, config.port, format_label(config.duration), config.tick_interval());

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.duration,
        config.tick_interval(),
        DialGeometry::default(),
    ));

    // Start the countdown ticker background task
    let ticker_state = Arc::clone(&state);
    tokio::spawn(async move {
        ticker_task(ticker_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start        - Start the countdown");
    info!("  POST /stop         - Stop the countdown");
    info!("  POST /reset        - Stop and restore the full duration");
    info!("  POST /pointer/down - Press on the dial {{x, y}}");
    info!("  POST /pointer/drag - Drag the dot {{x, y}}");
    info!("  POST /pointer/up   - Release the dot");
    info!("  GET  /status       - Current dial state");
    info!("  GET  /dial.svg     - Rendered dial");
    info!("  GET  /health       - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
