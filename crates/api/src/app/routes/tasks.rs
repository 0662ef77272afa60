use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};

use workhub_calendar::{NewTask, TaskStatus};
use workhub_core::{TaskId, UserId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/", get(list_tasks).post(create_task))
        .route("/api/tasks/:id", put(update_task_status))
}

pub async fn create_task(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Json(body): Json<dto::CreateTaskRequest>,
) -> axum::response::Response {
    let input = dto::parse_field::<UserId>(body.assignee_id.trim())
        .and_then(|assignee| NewTask::new(&body.title, body.due_date, body.status.as_deref(), assignee));
    let input = match input {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.hub.create_task(ctx.principal(), input).await {
        Ok(task) => (StatusCode::CREATED, Json(task)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_tasks(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
) -> axum::response::Response {
    match services.hub.tasks(ctx.principal()).await {
        Ok(tasks) => (StatusCode::OK, Json(tasks)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// `PUT /api/tasks/{id}?status=Done`
pub async fn update_task_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Query(query): Query<dto::TaskStatusQuery>,
) -> axum::response::Response {
    let id: TaskId = match errors::parse_id(&id, "task") {
        Ok(v) => v,
        Err(res) => return res,
    };
    let status: TaskStatus = match dto::parse_field(&query.status) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.hub.update_task_status(ctx.principal(), id, status).await {
        Ok(task) => (StatusCode::OK, Json(task)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
