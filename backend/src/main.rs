use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use articles_backend::{config::AppConfig, create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    let addr = config.bind_addr;

    let app_state = initialize_backend(config).await?;
    let app = create_router(app_state);

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
