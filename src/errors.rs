use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::validation::ValidationErrors;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("Request body must be a JSON object: {0}")]
    MalformedBody(String),

    #[error("Game '{0}' not found")]
    GameNotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Stored game '{id}' is unreadable: {reason}")]
    CorruptRecord { id: String, reason: String },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            AppError::GameNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::CorruptRecord { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            AppError::Validation(errors) => json!({
                "error": self.to_string(),
                "errors": errors.messages(),
            }),
            AppError::Database(e) => {
                tracing::error!(error = %e, "store operation failed");
                json!({ "error": "Database error" })
            }
            AppError::CorruptRecord { .. } => {
                tracing::error!(error = %self, "failed to decode stored game");
                json!({ "error": "Database error" })
            }
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
