use std::sync::Arc;

use anyhow::Context;

use netapi_api::app::{self, services::AppServices};
use netapi_api::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("invalid configuration")?;
    netapi_observability::init(&config.observability);
    tracing::info!(config = ?config, "configuration loaded");

    let services = Arc::new(AppServices::from_config(&config).context("failed to set up stores")?);
    let app = app::build_app(&config, services);

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
