use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;
use insight::InsightError;

use serde::Serialize;
pub use server::{CurrentUser, ServerState, app, run, run_with_listener, spawn_with_listener};

mod auth;
mod chatbot;
mod dashboard;
mod goals;
mod insights;
mod limits;
mod profile;
mod server;
mod transactions;

pub enum ServerError {
    Engine(EngineError),
    Gateway(InsightError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::DuplicateEmail(_) => StatusCode::BAD_REQUEST,
        EngineError::InvalidCredentials | EngineError::TokenExpired | EngineError::TokenInvalid => {
            StatusCode::UNAUTHORIZED
        }
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::Internal(_) | EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// 5xx causes are logged and replaced with an opaque message; every
/// other engine error is safe to echo back.
fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::Internal(msg) => {
            tracing::error!("internal error: {msg}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Gateway(err) => {
                tracing::error!("insight gateway error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate insights".to_string(),
                )
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<InsightError> for ServerError {
    fn from(value: InsightError) -> Self {
        Self::Gateway(value)
    }
}
