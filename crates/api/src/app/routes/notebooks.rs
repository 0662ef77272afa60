use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use workhub_core::{NoteId, NotebookId};
use workhub_notebooks::{NewNote, NewNotebook};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/api/notebooks", get(list_notebooks).post(create_notebook))
        .route("/api/notebooks/", get(list_notebooks).post(create_notebook))
        .route("/api/notebooks/:id", get(get_notebook).delete(delete_notebook))
        .route("/api/notebooks/:id/notes", get(list_notes).post(create_note))
        .route("/api/notebooks/notes/:id", get(get_note).put(update_note).delete(delete_note))
}

pub async fn create_notebook(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Json(body): Json<dto::CreateNotebookRequest>,
) -> axum::response::Response {
    let input = match NewNotebook::new(&body.name, body.cover) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match services.hub.create_notebook(ctx.principal(), input).await {
        Ok(view) => (StatusCode::CREATED, Json(view)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_notebooks(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
) -> axum::response::Response {
    match services.hub.notebooks(ctx.principal()).await {
        Ok(views) => (StatusCode::OK, Json(views)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_notebook(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: NotebookId = match errors::parse_id(&id, "notebook") {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.hub.notebook(ctx.principal(), id).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Deletes the notebook and all of its notes.
pub async fn delete_notebook(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: NotebookId = match errors::parse_id(&id, "notebook") {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.hub.delete_notebook(ctx.principal(), id).await {
        Ok(()) => (StatusCode::OK, Json(dto::message("Notebook deleted"))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_note(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::CreateNoteRequest>,
) -> axum::response::Response {
    let notebook_id: NotebookId = match errors::parse_id(&id, "notebook") {
        Ok(v) => v,
        Err(res) => return res,
    };
    let input = match NewNote::new(body.title, body.kind.as_deref(), body.content, body.color) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match services.hub.create_note(ctx.principal(), notebook_id, input).await {
        Ok(note) => (StatusCode::CREATED, Json(note)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_notes(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let notebook_id: NotebookId = match errors::parse_id(&id, "notebook") {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.hub.notes(ctx.principal(), notebook_id).await {
        Ok(notes) => (StatusCode::OK, Json(notes)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_note(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: NoteId = match errors::parse_id(&id, "note") {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.hub.note(ctx.principal(), id).await {
        Ok(note) => (StatusCode::OK, Json(note)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Partial update; absent fields are left as they are.
pub async fn update_note(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateNoteRequest>,
) -> axum::response::Response {
    let id: NoteId = match errors::parse_id(&id, "note") {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.hub.update_note(ctx.principal(), id, body.into()).await {
        Ok(note) => (StatusCode::OK, Json(note)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_note(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: NoteId = match errors::parse_id(&id, "note") {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.hub.delete_note(ctx.principal(), id).await {
        Ok(()) => (StatusCode::OK, Json(dto::message("Note deleted"))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
