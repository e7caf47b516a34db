use anyhow::Context;
use std::sync::Arc;
use storefront::blob::FsBlobStore;
use storefront::config::Config;
use storefront::http::{build_router, AppState};
use storefront::lifecycle::{setup_tracing, StorefrontSystem};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let config = Config::from_env().context("loading configuration")?;
    info!(bind = %config.bind, upload_dir = %config.upload_dir.display(), "Starting storefront");

    let system = StorefrontSystem::start(&config);
    system
        .seed(&config.public_base_url, &config.seed_admin_password)
        .await;

    let blobs = FsBlobStore::open(&config.upload_dir)
        .await
        .context("opening the upload directory")?;
    let app = build_router(AppState::new(&system, Arc::new(blobs)), &config.upload_dir);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("binding {}", config.bind))?;
    info!(addr = %config.bind, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    system.shutdown().await.context("stopping actors")?;
    info!("Storefront stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
