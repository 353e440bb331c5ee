//! Request DTOs for the trivia dashboard API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::leaderboard::{DEFAULT_LIMIT, MAX_LIMIT};

/// Request body for POST /api/game/:id/answer
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerRequest {
    /// Index into the shuffled answer list
    pub answer_index: usize,
}

/// Request body for POST /api/game/:id/score
#[derive(Debug, Clone, Deserialize)]
pub struct SaveScoreRequest {
    /// Player name for the leaderboard
    pub name: String,
}

impl SaveScoreRequest {
    /// Returns the trimmed name, or an error message for blank input.
    pub fn validated_name(&self) -> Result<&str, String> {
        let name = self.name.trim();
        if name.is_empty() {
            Err("Please enter your name".to_string())
        } else {
            Ok(name)
        }
    }
}

/// Query string for GET /api/leaderboard
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaderboardQuery {
    /// Difficulty filter; empty or absent means all difficulties
    pub difficulty: Option<String>,
    /// Row limit; non-numeric input falls back to the default
    pub limit: Option<String>,
}

impl LeaderboardQuery {
    /// Lenient limit parse: garbage and out-of-range values become the
    /// default rather than an error.
    pub fn effective_limit(&self) -> u32 {
        self.limit
            .as_deref()
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|v| (1..=MAX_LIMIT).contains(v))
            .unwrap_or(DEFAULT_LIMIT)
    }
}
