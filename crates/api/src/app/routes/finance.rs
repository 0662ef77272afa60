use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use workhub_finance::{DateWindow, NewTransaction};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/api/finance/transactions", get(list_transactions).post(create_transaction))
        .route("/api/finance/dashboard", get(dashboard))
        .route("/api/finance/summary", get(summary))
}

pub async fn create_transaction(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Json(body): Json<dto::CreateTransactionRequest>,
) -> axum::response::Response {
    let input = match NewTransaction::new(body.amount, &body.kind, &body.category, body.date, body.notes) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.hub.create_transaction(ctx.principal(), input).await {
        Ok(tx) => (StatusCode::CREATED, Json(tx)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_transactions(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
) -> axum::response::Response {
    match services.hub.transactions(ctx.principal()).await {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn dashboard(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
) -> axum::response::Response {
    match services.hub.dashboard(ctx.principal()).await {
        Ok(totals) => (StatusCode::OK, Json(totals)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// `GET /api/finance/summary?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD`
pub async fn summary(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Query(query): Query<dto::SummaryQuery>,
) -> axum::response::Response {
    let window = match DateWindow::parse(&query.start_date, &query.end_date) {
        Ok(w) => w,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.hub.summary(ctx.principal(), window).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
