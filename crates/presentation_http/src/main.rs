//! tempbox HTTP server
//!
//! Main entry point for the disposable-mailbox web front-end.

use std::sync::Arc;

use integration_mailtm::MailTmClient;
use presentation_http::{
    AppConfig, create_router,
    state::{AppState, CookieNames},
    views::TemplateEngine,
};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tempbox_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("tempbox v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    info!(
        environment = %config.environment,
        host = %config.server.host,
        port = %config.server.port,
        provider = %config.provider.base_url,
        "Configuration loaded"
    );

    // The signing key is validated here so a misconfigured production
    // deployment fails at startup, not at the first request
    let cookie_key = config
        .cookie_key()
        .map_err(|e| anyhow::anyhow!("Invalid session configuration: {e}"))?;

    let mail = MailTmClient::new(config.provider.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize provider client: {e}"))?;

    let templates = TemplateEngine::new()
        .map_err(|e| anyhow::anyhow!("Failed to compile templates: {e}"))?;

    let state = AppState {
        mail: Arc::new(mail),
        templates: Arc::new(templates),
        cookie_key,
        cookies: Arc::new(CookieNames {
            session: config.session.session_cookie.clone(),
            flash: config.session.flash_cookie.clone(),
        }),
    };

    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
