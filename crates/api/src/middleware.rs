use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::Response,
};
use cookie::Cookie;

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

/// Name of the session cookie set by `/login`.
pub const SESSION_COOKIE: &str = "access_token";

#[derive(Clone)]
pub struct AuthState {
    pub services: Arc<AppServices>,
}

/// Resolve the bearer token (or session cookie) into a [`PrincipalContext`].
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let Some(token) = extract_token(req.headers()) else {
        return errors::json_error(StatusCode::UNAUTHORIZED, "unauthenticated", "Not authenticated");
    };

    let principal = match state.services.hub.resolve_principal(&token).await {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let ctx = PrincipalContext::new(principal);
    tracing::debug!(
        user_id = %ctx.user_id(),
        company_id = %ctx.company_id(),
        role = %ctx.role(),
        path = %req.uri().path(),
        "request authenticated"
    );
    req.extensions_mut().insert(ctx);
    next.run(req).await
}

/// Bearer header first, then the session cookie.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    extract_bearer(headers)
        .map(str::to_string)
        .or_else(|| extract_cookie(headers))
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

fn extract_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| {
            let value = c.value();
            value.strip_prefix("Bearer ").unwrap_or(value).trim().to_string()
        })
        .filter(|t| !t.is_empty())
}
