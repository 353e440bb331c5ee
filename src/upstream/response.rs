//! Upstream response models
//!
//! Serde models for the OpenTDB payload and the mapping from its
//! `response_code` field to typed error kinds.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// == Raw Question ==
/// One trivia question exactly as upstream delivers it.
///
/// Text fields are HTML-entity encoded until [`crate::game::transform`]
/// decodes them for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuestion {
    /// Category name (entity-encoded)
    pub category: String,
    /// "multiple" or "boolean"
    #[serde(rename = "type")]
    pub question_type: String,
    /// "easy", "medium" or "hard"
    pub difficulty: String,
    /// Question text (entity-encoded)
    pub question: String,
    /// The correct answer (entity-encoded)
    pub correct_answer: String,
    /// Incorrect answers in upstream order (entity-encoded)
    pub incorrect_answers: Vec<String>,
}

// == Trivia Response ==
/// The upstream response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct TriviaResponse {
    /// 0 = success, 1-5 = upstream error kinds
    pub response_code: i64,
    /// Question batch, empty on error codes
    #[serde(default)]
    pub results: Vec<RawQuestion>,
}

// == API Error Code ==
/// Typed upstream error kinds, mapped from `response_code` values 1-5.
///
/// These are deterministic answers for a given parameter set and are cached
/// with the same TTL as successful batches. Codes outside the documented
/// range map to [`ApiErrorCode::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
pub enum ApiErrorCode {
    /// Code 1: not enough questions for the query
    #[error("No results - not enough questions for this query")]
    NoResults,
    /// Code 2: malformed request parameters
    #[error("Invalid parameter - check the request parameters")]
    InvalidParameter,
    /// Code 3: session token does not exist
    #[error("Token not found - session token is invalid")]
    TokenNotFound,
    /// Code 4: token has exhausted all questions
    #[error("Token empty - all questions have been used, reset the token")]
    TokenEmpty,
    /// Code 5: too many requests
    #[error("Rate limit - too many requests")]
    RateLimited,
    /// Any code outside 0-5
    #[error("Unknown error code: {0}")]
    Unknown(i64),
}

impl ApiErrorCode {
    /// Maps a `response_code` to its error kind; `None` means success.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => None,
            1 => Some(ApiErrorCode::NoResults),
            2 => Some(ApiErrorCode::InvalidParameter),
            3 => Some(ApiErrorCode::TokenNotFound),
            4 => Some(ApiErrorCode::TokenEmpty),
            5 => Some(ApiErrorCode::RateLimited),
            other => Some(ApiErrorCode::Unknown(other)),
        }
    }
}
