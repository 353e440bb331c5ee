//! Error types for the trivia dashboard
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::upstream::ApiErrorCode;

// == App Error Enum ==
/// Unified error type for the trivia dashboard server.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request parameters failed validation
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Upstream reported an error code (1-5 or unknown)
    #[error("Trivia API error: {0}")]
    Upstream(ApiErrorCode),

    /// Upstream request failed after the retry
    #[error("Trivia API unreachable, try again later: {0}")]
    Network(String),

    /// Upstream answered success but returned no questions
    #[error("No questions returned from the trivia API")]
    NoQuestions,

    /// Game session does not exist
    #[error("Game session not found: {0}")]
    GameNotFound(Uuid),

    /// Game has already run through all its questions
    #[error("Game is finished, fetch the results instead")]
    GameFinished,

    /// Leaderboard database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Network(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::NoQuestions => StatusCode::BAD_GATEWAY,
            AppError::GameNotFound(_) => StatusCode::NOT_FOUND,
            AppError::GameFinished => StatusCode::CONFLICT,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the trivia dashboard.
pub type Result<T> = std::result::Result<T, AppError>;
