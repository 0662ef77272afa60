//! Signed session tokens.
//!
//! HS256 over a server-held secret. The secret is injected at construction so
//! tests can run against fixture secrets.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use workhub_core::UserId;

use crate::{Principal, Role};

pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Token payload: `{sub: email, id, role, exp}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the user's email.
    pub sub: String,
    pub id: UserId,
    pub role: Role,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Issues and verifies session tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    default_ttl: Duration,
}

impl TokenService {
    pub fn new(secret: impl AsRef<[u8]>, default_ttl: Duration) -> Self {
        let secret = secret.as_ref();
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact; a token one second past `exp` is invalid.
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            default_ttl,
        }
    }

    /// Service with the default 30 minute lifetime.
    pub fn with_default_ttl(secret: impl AsRef<[u8]>) -> Self {
        Self::new(secret, Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES))
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Sign a token for `principal`, valid for `ttl` (or the default lifetime).
    pub fn issue(&self, principal: &Principal, ttl: Option<Duration>) -> Result<String, TokenError> {
        self.issue_at(principal, ttl, Utc::now())
    }

    pub fn issue_at(
        &self,
        principal: &Principal,
        ttl: Option<Duration>,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = TokenClaims {
            sub: principal.email.clone(),
            id: principal.user_id,
            role: principal.role,
            exp: (now + ttl.unwrap_or(self.default_ttl)).timestamp(),
        };
        Ok(jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Verify signature and expiry.
    ///
    /// Returns `None` on any failure. Expired, malformed and forged tokens are
    /// indistinguishable to the caller.
    pub fn verify(&self, token: &str) -> Option<TokenClaims> {
        match jsonwebtoken::decode::<TokenClaims>(token, &self.decoding, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                tracing::debug!(error = %e, "rejected session token");
                None
            }
        }
    }
}

impl core::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TokenService")
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}
