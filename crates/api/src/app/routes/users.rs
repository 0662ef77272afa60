use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::Extension,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use cookie::{Cookie, SameSite};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;
use crate::middleware::SESSION_COOKIE;

pub fn router() -> Router {
    Router::new()
        .route("/api/me", get(me))
        .route("/api/my-employees", get(my_employees))
        .route("/api/company", get(my_company))
}

pub async fn signup(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::SignupRequest>,
) -> axum::response::Response {
    match services.hub.signup(body.into()).await {
        Ok(user) => (StatusCode::OK, Json(dto::UserResponse::from(&user))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Issue a session: cookie for browsers, token body for bearer clients.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Form(form): Form<dto::LoginForm>,
) -> axum::response::Response {
    let session = match services.hub.login(&form.username, &form.password).await {
        Ok(s) => s,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let max_age = cookie::time::Duration::seconds(services.hub.tokens().default_ttl().num_seconds());
    let cookie = Cookie::build((SESSION_COOKIE, session.access_token.clone()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(services.cookie_secure)
        .path("/")
        .max_age(max_age)
        .build();

    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie.to_string())],
        Json(dto::TokenResponse {
            access_token: session.access_token,
            token_type: "bearer",
        }),
    )
        .into_response()
}

pub async fn logout() -> axum::response::Response {
    let mut cookie = Cookie::build((SESSION_COOKIE, "")).path("/").http_only(true).build();
    cookie.make_removal();
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie.to_string())],
        Json(dto::message("Logged out")),
    )
        .into_response()
}

pub async fn me(Extension(ctx): Extension<PrincipalContext>) -> axum::response::Response {
    (StatusCode::OK, Json(dto::UserResponse::from(ctx.principal()))).into_response()
}

pub async fn my_employees(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
) -> axum::response::Response {
    match services.hub.employees(ctx.principal()).await {
        Ok(users) => {
            let out: Vec<dto::EmployeeResponse> = users
                .into_iter()
                .map(|u| dto::EmployeeResponse { id: u.id, email: u.email })
                .collect();
            (StatusCode::OK, Json(out)).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn my_company(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
) -> axum::response::Response {
    match services.hub.company(ctx.principal()).await {
        Ok(company) => {
            (StatusCode::OK, Json(dto::CompanyResponse::for_viewer(company, ctx.principal()))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
