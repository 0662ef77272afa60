use std::sync::Arc;

use anyhow::Context;

use workhub_infra::HubConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    workhub_observability::init();

    let config = HubConfig::from_env()?;
    tracing::info!(?config, "configuration loaded");

    let services = Arc::new(workhub_api::app::services::build_services(&config).await?);
    let app = workhub_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
