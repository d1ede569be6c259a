mod api;
mod middleware;

use std::sync::Arc;

use anyhow::Context;
use leadminer_gemini::GeminiClient;
use leadminer_search::SearchSession;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, default_rate_limit_state, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(leadminer_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let client = GeminiClient::from_app_config(&config)
        .context("the server needs a Gemini client to run searches")?;
    tracing::info!(
        env = %config.env,
        model = client.model(),
        bind_addr = %config.bind_addr,
        "starting leadminer server"
    );

    let session = Arc::new(SearchSession::new());
    let state = AppState {
        session: Arc::clone(&session),
        client: Arc::new(client),
        config: Arc::clone(&config),
    };
    let app = build_app(state, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(session))
        .await?;
    Ok(())
}

/// Resolves on ctrl-c or SIGTERM. A search still running at that point is
/// dropped with the runtime.
async fn shutdown_signal(session: Arc<SearchSession>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "ctrl-c listener failed");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM listener failed");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!(
        search_running = session.is_busy(),
        "shutdown requested, draining connections"
    );
}
