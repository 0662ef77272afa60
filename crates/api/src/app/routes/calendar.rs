use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use workhub_calendar::NewEvent;
use workhub_core::EventId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/calendar/general/events", post(create_event))
        .route("/calendar/feed", get(feed))
        .route("/events/:id", get(get_event).delete(delete_event))
}

/// Create a general or personal event; the body's `calendar_type` decides.
pub async fn create_event(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Json(body): Json<dto::CreateEventRequest>,
) -> axum::response::Response {
    let input = match NewEvent::new(
        &body.title,
        body.start_time,
        body.end_time,
        body.place,
        body.notes,
        &body.calendar_type,
    ) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.hub.create_event(ctx.principal(), input).await {
        Ok(event) => (StatusCode::CREATED, Json(event)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_event(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: EventId = match errors::parse_id(&id, "event") {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.hub.event(ctx.principal(), id).await {
        Ok(event) => (StatusCode::OK, Json(event)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_event(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: EventId = match errors::parse_id(&id, "event") {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.hub.delete_event(ctx.principal(), id).await {
        Ok(()) => (StatusCode::OK, Json(dto::message("Event deleted"))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Events and tasks visible to the caller.
pub async fn feed(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
) -> axum::response::Response {
    match services.hub.feed(ctx.principal()).await {
        Ok(feed) => (StatusCode::OK, Json(feed)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
