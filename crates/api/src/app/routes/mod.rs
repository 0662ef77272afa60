use axum::{
    Router,
    routing::{get, post},
};

pub mod calendar;
pub mod finance;
pub mod notebooks;
pub mod system;
pub mod tasks;
pub mod users;

/// Endpoints reachable without a credential.
pub fn public_router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/signup", post(users::signup))
        .route("/login", post(users::login))
        .route("/logout", post(users::logout))
}

/// Router for all authenticated (company-scoped) endpoints.
pub fn router() -> Router {
    Router::new()
        .merge(users::router())
        .merge(calendar::router())
        .merge(tasks::router())
        .merge(finance::router())
        .merge(notebooks::router())
}
