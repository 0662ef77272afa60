//! Process configuration.
//!
//! Read once at startup and handed to the components that need it; nothing
//! below the binary consults the environment on its own.

use std::net::SocketAddr;

use anyhow::Context;
use chrono::Duration;
use workhub_auth::DEFAULT_TOKEN_TTL_MINUTES;

const DEV_SECRET: &str = "workhub-dev-secret-change-me";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Clone)]
pub struct HubConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    /// `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub cookie_secure: bool,
}

impl HubConfig {
    /// Build from the process environment, loading `.env` first when present.
    pub fn from_env() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let jwt_secret = match lookup("JWT_SECRET").or_else(|| lookup("SECRET_KEY")) {
            Some(secret) if !secret.trim().is_empty() => secret,
            _ => {
                tracing::warn!("JWT_SECRET not set; using an insecure development secret");
                DEV_SECRET.to_string()
            }
        };

        let ttl_minutes = match lookup("TOKEN_TTL_MINUTES") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|m| *m > 0)
                .with_context(|| format!("TOKEN_TTL_MINUTES must be a positive integer, got {raw:?}"))?,
            None => DEFAULT_TOKEN_TTL_MINUTES,
        };

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse()
            .with_context(|| format!("BIND_ADDR is not a socket address: {bind_raw:?}"))?;

        let cookie_secure = lookup("COOKIE_SECURE")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            jwt_secret,
            token_ttl: Duration::minutes(ttl_minutes),
            database_url,
            bind_addr,
            cookie_secure,
        })
    }
}

impl core::fmt::Debug for HubConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HubConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("bind_addr", &self.bind_addr)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}
