//! Service wiring: pick a store backend and build the hub services.

use std::sync::Arc;

use anyhow::Context;

use workhub_auth::TokenService;
use workhub_infra::{HubConfig, HubServices, HubStore, InMemoryHubStore, PostgresHubStore};

/// Everything a handler needs, shared behind an `Arc`.
pub struct AppServices {
    pub hub: HubServices<Arc<dyn HubStore>>,
    /// Mark the session cookie `Secure`.
    pub cookie_secure: bool,
}

impl AppServices {
    pub fn new(store: Arc<dyn HubStore>, config: &HubConfig) -> Self {
        let tokens = TokenService::new(config.jwt_secret.as_bytes(), config.token_ttl);
        Self {
            hub: HubServices::new(store, tokens),
            cookie_secure: config.cookie_secure,
        }
    }
}

/// Postgres when `DATABASE_URL` is configured, otherwise the in-memory store.
pub async fn build_services(config: &HubConfig) -> anyhow::Result<AppServices> {
    let store: Arc<dyn HubStore> = match &config.database_url {
        Some(url) => {
            let pg = PostgresHubStore::connect(url)
                .await
                .context("failed to connect to Postgres")?;
            pg.migrate().await.context("failed to apply schema")?;
            tracing::info!("using Postgres store");
            Arc::new(pg)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; data lives in memory only");
            Arc::new(InMemoryHubStore::new())
        }
    };
    Ok(AppServices::new(store, config))
}
