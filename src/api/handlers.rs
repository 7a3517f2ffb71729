//! HTTP request handlers

use super::assets::{get_index_html, serve_static};
use super::types::{BackendInfo, ChatResponse, ChatTurn, ErrorResponse};
use super::AppState;
use crate::assistant::AssistantError;
use crate::llm::LlmErrorKind;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::Instrument;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Root serves the chat page
        .route("/", get(serve_spa))
        .route("/assets/*path", get(serve_static))
        // Submit a turn
        .route("/api/chat", post(send_chat))
        .route("/api/backend", get(get_backend))
        .route("/version", get(get_version))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
}

// ============================================================
// SPA Handler
// ============================================================

async fn serve_spa() -> impl IntoResponse {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - UI not found</h1>".to_string()),
        )
            .into_response(),
    }
}

// ============================================================
// Chat
// ============================================================

/// Message validation failure text
const MESSAGE_REQUIRED: &str = "Message is required.";

async fn send_chat(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, AppError> {
    let body: Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Unparseable chat body");
        AppError::Internal(e.to_string())
    })?;
    let turn = ChatTurn::from_json(&body)
        .ok_or_else(|| AppError::BadRequest(MESSAGE_REQUIRED.to_string()))?;

    let span = tracing::info_span!(
        "turn",
        turn_id = %uuid::Uuid::new_v4(),
        backend = %state.assistant.info().backend,
    );

    async move {
        let reply = state
            .assistant
            .reply(&turn.message, &turn.history)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Turn failed");
                AppError::from(e)
            })?;
        tracing::info!(reply_len = reply.len(), "Turn completed");
        Ok::<_, AppError>(Json(ChatResponse { reply }))
    }
    .instrument(span)
    .await
}

// ============================================================
// Status
// ============================================================

async fn get_backend(State(state): State<AppState>) -> Json<BackendInfo> {
    Json(state.assistant.info())
}

async fn get_version() -> &'static str {
    concat!("study-assistant ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

/// Generic message for failures the client did not cause
const SERVER_ERROR: &str = "Server error";

enum AppError {
    BadRequest(String),
    /// Operator must fix configuration
    Config(String),
    /// Hosted model failed
    Upstream { kind: LlmErrorKind, details: String },
    /// Anything unexpected; carries its description
    Internal(String),
}

impl From<AssistantError> for AppError {
    fn from(err: AssistantError) -> Self {
        match err {
            AssistantError::MissingCredential => AppError::Config(err.to_string()),
            AssistantError::Upstream(e) => AppError::Upstream {
                kind: e.kind,
                details: e.message,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            AppError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new(msg)),
            AppError::Upstream { kind, details } => (
                upstream_status(kind),
                ErrorResponse::new(SERVER_ERROR).with_details(details),
            ),
            AppError::Internal(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(SERVER_ERROR).with_details(details),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// A rejected credential is the operator's problem, throttling is temporary,
/// and everything else is the upstream's fault.
fn upstream_status(kind: LlmErrorKind) -> StatusCode {
    match kind {
        LlmErrorKind::Auth => StatusCode::INTERNAL_SERVER_ERROR,
        LlmErrorKind::RateLimit => StatusCode::SERVICE_UNAVAILABLE,
        LlmErrorKind::Network
        | LlmErrorKind::ServerError
        | LlmErrorKind::InvalidRequest
        | LlmErrorKind::Unknown => StatusCode::BAD_GATEWAY,
    }
}

/// Turn a handler panic into a structured 500
#[allow(clippy::needless_pass_by_value)] // Signature required by CatchPanicLayer
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "Unknown panic".to_string()
    };

    tracing::error!(details = %details, "Handler panicked");
    AppError::Internal(details).into_response()
}
