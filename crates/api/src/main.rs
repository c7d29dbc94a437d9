use std::sync::Arc;

use anyhow::Context;

use stockroom_infra::{AppConfig, CatalogService, SnapshotStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockroom_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    let store: Arc<dyn SnapshotStore> = Arc::new(config.snapshot_store());
    let services = Arc::new(
        CatalogService::open(store).with_context(|| {
            format!(
                "failed to load catalog snapshots from {} and {}",
                config.products_path().display(),
                config.categories_path().display()
            )
        })?,
    );

    let app = stockroom_api::app::build_app(services.clone());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(stockroom_api::shutdown::shutdown_signal())
        .await
        .context("server error")?;

    services.flush().context("failed to flush catalog on shutdown")?;
    tracing::info!("catalog flushed, shutting down");
    Ok(())
}
