//! Request and Response models for the trivia dashboard API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{AnswerRequest, LeaderboardQuery, SaveScoreRequest};
pub use responses::{
    AnswerResponse, CategoriesResponse, CategoryInfo, ClearGameResponse, HealthResponse,
    LeaderboardResponse, PreviewResponse, QuestionResponse, ResultsResponse, SaveScoreResponse,
    StartGameResponse, StatsResponse,
};
