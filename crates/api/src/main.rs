use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use slateboard_api::config::GatewayConfig;
use slateboard_api::router::build_app_router;
use slateboard_api::scripting::ScriptRunner;
use slateboard_api::state::AppState;
use slateboard_core::recordings::RecordingStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slateboard_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = GatewayConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded gateway configuration");

    // --- Recording store ---
    let store = Arc::new(RecordingStore::new(
        config.recordings_dir.clone(),
        config.staging_dir.clone(),
    ));
    store
        .ensure_dirs()
        .await
        .expect("Failed to create recording directories");
    tracing::info!(root = %config.recordings_dir.display(), "Recordings root ready");

    // --- Script runner ---
    let runner = Arc::new(ScriptRunner::new(&config.script));
    tracing::info!(
        interpreter = %config.script.interpreter.display(),
        script = %config.script.script_path.display(),
        max_concurrent = config.script.max_concurrent,
        "Script runner ready"
    );

    // --- App state / router ---
    let state = AppState {
        config: Arc::new(config.clone()),
        store,
        runner,
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
