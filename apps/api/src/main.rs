use axum::Router;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_notifications::{EmailDispatcher, TemplateEngine};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

mod api;
mod config;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    let templates = TemplateEngine::new()
        .map_err(|e| eyre::eyre!("Failed to initialize template engine: {}", e))?;
    let dispatcher = EmailDispatcher::from_config(&config.email)
        .map_err(|e| eyre::eyre!("Failed to initialize email dispatcher: {}", e))?;

    let state = AppState {
        templates: Arc::new(templates),
        dispatcher: Arc::new(dispatcher),
        app_url: config.email.app_url.clone(),
    };

    let app = Router::new()
        .nest("/api", api::routes())
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let address = config.server.address();
    info!("Starting DentCare API on {}", address);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("DentCare API shutdown complete");
    Ok(())
}

/// Resolves on ctrl-c or SIGTERM so in-flight sends can finish.
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
