use std::sync::Arc;

use relay::api::create_router;
use relay::config::CONFIG;
use relay::proxy::BackendProxy;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber (handles both tracing and log crate)
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let proxy = Arc::new(BackendProxy::from_config());
    log::info!(
        "backend base url: {} (environment: {})",
        proxy.base_url(),
        CONFIG.environment
    );

    let router = create_router(proxy);

    let listener = tokio::net::TcpListener::bind(CONFIG.bind_addr()).await?;
    log::info!("relay listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;
    Ok(())
}
