use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::EnvFilter;

use lander::config::Config;
use lander::store::FileStore;
use lander::upload::ImgbbClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Load config
    let config = Config::from_env()?;

    // Init tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(&config.log_level)
        }))
        .init();

    tracing::info!("Starting Lander");

    if config.default_password {
        tracing::warn!(
            "LANDER_ADMIN_PASSWORD_HASH is not set; using the default password '{}'",
            lander::config::DEFAULT_ADMIN_PASSWORD
        );
    }
    if config.imgbb_api_key.is_none() {
        tracing::warn!("IMGBB_API_KEY is not set; image uploads are disabled");
    }

    let store = FileStore::open(&config.data_dir).await?;
    tracing::info!("Data directory: {}", store.dir().display());

    let images = ImgbbClient::new(config.upload_url.clone(), config.imgbb_api_key.clone())?;

    let addr = SocketAddr::new(config.host, config.port);
    let app = lander::build_app(config, Arc::new(store), Arc::new(images));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
