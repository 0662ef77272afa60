//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store backend selection and the shared [`services::AppServices`]
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(services: Arc<services::AppServices>) -> Router {
    let auth_state = middleware::AuthState {
        services: services.clone(),
    };

    // Protected routes: require a resolved principal.
    let protected = routes::router()
        .layer(Extension(services.clone()))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    routes::public_router()
        .layer(Extension(services))
        .merge(protected)
        .layer(ServiceBuilder::new())
}
