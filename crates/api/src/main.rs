//! API server entry point.

use api::config::{Config, LogFormat};
use api::readiness::ToggleProbe;
use api::routes::APPLICATION_NAME;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM), then marks the service unready.
async fn shutdown_signal(traffic: ToggleProbe) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }

    traffic.set_ready(false);
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

#[tokio::main]
async fn main() {
    // 1. Load configuration
    let config = Config::from_env();

    // 2. Initialize tracing
    init_tracing(&config);

    // 3. Freeze service identity and build the application
    let (state, traffic) = api::create_default_state(&config);
    tracing::info!(
        version = state.service.version(),
        environment = state.service.environment(),
        "starting {APPLICATION_NAME}"
    );
    let app = api::create_app(state);

    // 4. Start server
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    tracing::info!(%addr, "application started successfully");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(traffic))
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
