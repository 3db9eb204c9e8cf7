use std::sync::Arc;

use anyhow::Context;

use prodplan_api::app::{self, services::AppServices};
use prodplan_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env()?;
    prodplan_observability::init(config.log_format);

    let app = app::build_app(Arc::new(AppServices::in_memory()));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        log_format = %config.log_format,
        "listening"
    );

    axum::serve(listener, app).await.context("server terminated")?;
    Ok(())
}
