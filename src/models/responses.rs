//! Response DTOs for the trivia dashboard API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use uuid::Uuid;

use crate::cache::CacheStats;
use crate::game::{DisplayQuestion, GameSummary};
use crate::leaderboard::ScoreEntry;
use crate::upstream::RawQuestion;

/// Response body for GET /api/preview
#[derive(Debug, Clone, Serialize)]
pub struct PreviewResponse {
    /// True when upstream delivered a question batch
    pub success: bool,
    /// The raw (still entity-encoded) questions, on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<RawQuestion>>,
    /// Explanatory message, on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Upstream round-trip milliseconds; 0 for cache hits
    pub latency_ms: f64,
    /// True when the payload was served from the response cache
    pub cached: bool,
}

/// Response body for POST /api/game
#[derive(Debug, Clone, Serialize)]
pub struct StartGameResponse {
    /// Handle for the new game session
    pub session_id: Uuid,
    /// Number of questions in the game
    pub total: usize,
}

/// Response body for GET /api/game/:id/question
#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub category: String,
    pub difficulty: String,
    #[serde(rename = "type")]
    pub question_type: String,
    pub question: String,
    /// Shuffled answers; the correct index is never exposed here
    pub answers: Vec<String>,
    /// Zero-based position of this question in the game
    pub index: usize,
    pub total: usize,
}

impl QuestionResponse {
    /// Builds the player-facing view of a question.
    pub fn new(question: &DisplayQuestion, index: usize, total: usize) -> Self {
        Self {
            category: question.category.clone(),
            difficulty: question.difficulty.clone(),
            question_type: question.question_type.clone(),
            question: question.question.clone(),
            answers: question.answers.clone(),
            index,
            total,
        }
    }
}

/// Response body for POST /api/game/:id/answer
#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    pub correct: bool,
    /// Revealed so a wrong answer can show what was right
    pub correct_answer: String,
    pub score: f64,
    pub finished: bool,
}

/// Response body for GET /api/game/:id/results
#[derive(Debug, Clone, Serialize)]
pub struct ResultsResponse {
    pub score: i64,
    pub total: usize,
    pub accuracy: f64,
    pub grade: &'static str,
    pub time_taken_secs: f64,
    pub time_taken: String,
    pub difficulty: String,
}

impl From<GameSummary> for ResultsResponse {
    fn from(summary: GameSummary) -> Self {
        Self {
            score: summary.score,
            total: summary.total,
            accuracy: summary.accuracy,
            grade: summary.grade,
            time_taken_secs: summary.elapsed_secs,
            time_taken: summary.elapsed_display,
            difficulty: summary.difficulty,
        }
    }
}

/// Response body for POST /api/game/:id/score
#[derive(Debug, Clone, Serialize)]
pub struct SaveScoreResponse {
    pub message: String,
    /// Leaderboard row id of the saved score
    pub id: i64,
}

/// Response body for DELETE /api/game/:id
#[derive(Debug, Clone, Serialize)]
pub struct ClearGameResponse {
    pub message: String,
}

/// Response body for GET /api/leaderboard
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardResponse {
    pub scores: Vec<ScoreEntry>,
    /// The filter the listing was produced with, empty for all
    pub difficulty_filter: String,
}

/// One category in GET /api/categories
#[derive(Debug, Clone, Serialize)]
pub struct CategoryInfo {
    pub id: u32,
    pub name: &'static str,
}

/// Response body for GET /api/categories
#[derive(Debug, Clone, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryInfo>,
}

/// Response body for GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub total_entries: usize,
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        let hit_rate = stats.hit_rate();
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            hit_rate,
        }
    }
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a healthy response stamped with the current time.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
