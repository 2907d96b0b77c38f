mod error;
mod extract;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_macros::debug_handler;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

use crate::{
    dto::{
        CreateNoteRequest, ErrorResponse, MessageResponse, NoteResponse, SummaryResponse,
        UpdateNoteRequest,
    },
    service::{NoteService, SummarizeError},
};

use error::ApiError;
use extract::{JsonBody, NoteId};

#[derive(OpenApi)]
#[openapi(
    paths(
        create_note,
        get_all_notes,
        get_one_note,
        update_note,
        delete_note,
        summarize_note
    ),
    components(schemas(
        NoteResponse,
        CreateNoteRequest,
        UpdateNoteRequest,
        MessageResponse,
        SummaryResponse,
        ErrorResponse
    )),
    tags(
        (name = "notes", description = "Notes management API"),
        (name = "summaries", description = "Model-generated note summaries")
    )
)]
pub struct ApiDoc;

pub fn router(service: Arc<NoteService>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/notes", post(create_note).get(get_all_notes))
        .route(
            "/notes/{id}",
            get(get_one_note).put(update_note).delete(delete_note),
        )
        .route("/notes/{id}/summarize", post(summarize_note))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}

async fn root() -> Response {
    (StatusCode::OK, "Hello world!").into_response()
}

#[utoipa::path(
    post,
    path = "/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created successfully", body = NoteResponse),
        (status = 400, description = "Malformed body or missing content", body = ErrorResponse),
        (status = 415, description = "Body is not JSON", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    JsonBody(payload): JsonBody<CreateNoteRequest>,
) -> Response {
    match service.create_note(payload).await {
        Ok(note) => (StatusCode::CREATED, Json(note)).into_response(),
        Err(e) => {
            tracing::error!("failed to create note entry: {}", e);
            ApiError::Internal("Failed to create note".into()).into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/notes",
    responses(
        (status = 200, description = "List of all notes", body = Vec<NoteResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_all_notes(State(service): State<Arc<NoteService>>) -> Response {
    match service.get_all_notes().await {
        Ok(notes) => (StatusCode::OK, Json(notes)).into_response(),
        Err(e) => {
            tracing::error!("failed to get note entries: {}", e);
            ApiError::Internal("Failed to get all notes".into()).into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = NoteResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_one_note(
    State(service): State<Arc<NoteService>>,
    NoteId(id): NoteId,
) -> Response {
    match service.get_one_note(id).await {
        Ok(Some(note)) => (StatusCode::OK, Json(note)).into_response(),
        Ok(None) => ApiError::NotFound.into_response(),
        Err(e) => {
            tracing::error!("failed to get note entry {}: {}", id, e);
            ApiError::Internal("Failed to get note".into()).into_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = NoteResponse),
        (status = 400, description = "Malformed body or missing content", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 415, description = "Body is not JSON", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    NoteId(id): NoteId,
    body: Result<JsonBody<UpdateNoteRequest>, ApiError>,
) -> Response {
    // Unknown ids answer 404 before any body error
    let payload = match body {
        Ok(JsonBody(payload)) => payload,
        Err(rejection) => {
            return match service.get_one_note(id).await {
                Ok(Some(_)) => rejection.into_response(),
                Ok(None) => ApiError::NotFound.into_response(),
                Err(e) => {
                    tracing::error!("failed to get note entry {}: {}", id, e);
                    ApiError::Internal("Failed to update note".into()).into_response()
                }
            };
        }
    };

    match service.update_note(id, payload).await {
        Ok(Some(note)) => (StatusCode::OK, Json(note)).into_response(),
        Ok(None) => ApiError::NotFound.into_response(),
        Err(e) => {
            tracing::error!("failed to update note entry {}: {}", id, e);
            ApiError::Internal("Failed to update note".into()).into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note deleted successfully", body = MessageResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(State(service): State<Arc<NoteService>>, NoteId(id): NoteId) -> Response {
    match service.delete_note(id).await {
        Ok(Some(message)) => (StatusCode::OK, Json(message)).into_response(),
        Ok(None) => ApiError::NotFound.into_response(),
        Err(e) => {
            tracing::error!("failed to delete note entry {}: {}", id, e);
            ApiError::Internal("Failed to delete note".into()).into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/notes/{id}/summarize",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Summary generated", body = SummaryResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
        (status = 502, description = "Summarization model failed", body = ErrorResponse)
    ),
    tag = "summaries"
)]
#[debug_handler]
pub async fn summarize_note(
    State(service): State<Arc<NoteService>>,
    NoteId(id): NoteId,
) -> Response {
    match service.summarize_note(id).await {
        Ok(Some(summary)) => (StatusCode::OK, Json(summary)).into_response(),
        Ok(None) => ApiError::NotFound.into_response(),
        Err(SummarizeError::Summarizer(e)) => {
            tracing::error!("summarizer failed for note {}: {}", id, e);
            ApiError::BadGateway(format!("Summarizer error: {e}")).into_response()
        }
        Err(SummarizeError::Store(e)) => {
            tracing::error!("failed to get note entry {}: {}", id, e);
            ApiError::Internal("Failed to get note".into()).into_response()
        }
    }
}
