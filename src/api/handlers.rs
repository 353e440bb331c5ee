//! API Handlers
//!
//! HTTP request handlers for each trivia dashboard endpoint.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tokio::sync::{Mutex, RwLock};
use tracing::info;
use uuid::Uuid;

use crate::cache::{FetchCache, FetchError, ResponseCache};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::game::{transform, GameState};
use crate::leaderboard::Leaderboard;
use crate::models::{
    AnswerRequest, AnswerResponse, CategoriesResponse, CategoryInfo, ClearGameResponse,
    HealthResponse, LeaderboardQuery, LeaderboardResponse, PreviewResponse, QuestionResponse,
    ResultsResponse, SaveScoreRequest, SaveScoreResponse, StartGameResponse, StatsResponse,
};
use crate::upstream::{QuestionSource, RawParams, TriviaClient, CATEGORIES};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Caching fetch layer over the upstream provider
    pub fetch: FetchCache,
    /// Active game sessions by id
    pub sessions: Arc<RwLock<HashMap<Uuid, GameState>>>,
    /// Persistent score store
    pub leaderboard: Leaderboard,
}

impl AppState {
    /// Creates state over an explicit question source and leaderboard.
    ///
    /// Tests pass a scripted source and an in-memory leaderboard here.
    pub fn new(
        source: Arc<dyn QuestionSource>,
        cache: ResponseCache,
        leaderboard: Leaderboard,
    ) -> Self {
        Self {
            fetch: FetchCache::new(source, Arc::new(Mutex::new(cache))),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            leaderboard,
        }
    }

    /// Creates production state from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let source = Arc::new(TriviaClient::new(&config.opentdb_url, config.api_timeout));
        let cache = ResponseCache::new(config.max_cache_entries, config.cache_ttl);
        let leaderboard = Leaderboard::open(&config.db_path)?;
        Ok(Self::new(source, cache, leaderboard))
    }
}

/// Handler for GET /api/preview
///
/// Validates the query parameters and fetches a batch through the cache,
/// reporting latency and whether the response was a cache hit.
pub async fn preview_handler(
    State(state): State<AppState>,
    Query(raw): Query<RawParams>,
) -> Result<Json<PreviewResponse>> {
    let params = raw.validate()?;
    let result = state.fetch.get(&params).await;

    let (questions, error) = match result.payload {
        Ok(batch) => (Some(batch), None),
        Err(err) => (None, Some(err.to_string())),
    };

    Ok(Json(PreviewResponse {
        success: questions.is_some(),
        questions,
        error,
        latency_ms: (result.latency_ms * 100.0).round() / 100.0,
        cached: result.served_from_cache,
    }))
}

/// Handler for POST /api/game
///
/// Starts a game: fetches a fresh batch (a new game never replays a cached
/// one), transforms every question, and registers the session.
pub async fn start_game_handler(
    State(state): State<AppState>,
    Json(raw): Json<RawParams>,
) -> Result<Json<StartGameResponse>> {
    let params = raw.validate()?;
    let result = state.fetch.get_fresh(&params).await;

    let batch = result.payload.map_err(|err| match err {
        FetchError::Api(code) => AppError::Upstream(code),
        FetchError::Network(reason) => AppError::Network(reason),
    })?;

    if batch.is_empty() {
        return Err(AppError::NoQuestions);
    }

    let questions = batch.iter().map(|raw| transform(raw, None)).collect();
    let game = GameState::new(questions, params.difficulty_label());

    let session_id = Uuid::new_v4();
    let total = game.total();
    state.sessions.write().await.insert(session_id, game);
    info!(%session_id, total, "game started");

    Ok(Json(StartGameResponse { session_id, total }))
}

/// Handler for GET /api/game/:id/question
///
/// Returns the current question and starts its answer timer.
pub async fn question_handler(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<QuestionResponse>> {
    let mut sessions = state.sessions.write().await;
    let game = sessions
        .get_mut(&session_id)
        .ok_or(AppError::GameNotFound(session_id))?;

    game.mark_question_shown();
    let index = game.index();
    let total = game.total();
    let question = game.current()?;

    Ok(Json(QuestionResponse::new(question, index, total)))
}

/// Handler for POST /api/game/:id/answer
///
/// Scores the submitted answer index and advances the game.
pub async fn answer_handler(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>> {
    let mut sessions = state.sessions.write().await;
    let game = sessions
        .get_mut(&session_id)
        .ok_or(AppError::GameNotFound(session_id))?;

    let verdict = game.answer(req.answer_index)?;

    Ok(Json(AnswerResponse {
        correct: verdict.correct,
        correct_answer: verdict.correct_answer,
        score: verdict.score,
        finished: verdict.finished,
    }))
}

/// Handler for GET /api/game/:id/results
pub async fn results_handler(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ResultsResponse>> {
    let sessions = state.sessions.read().await;
    let game = sessions
        .get(&session_id)
        .ok_or(AppError::GameNotFound(session_id))?;

    Ok(Json(game.summary().into()))
}

/// Handler for POST /api/game/:id/score
///
/// Persists the game to the leaderboard and drops the session.
pub async fn save_score_handler(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<SaveScoreRequest>,
) -> Result<Json<SaveScoreResponse>> {
    let name = req.validated_name().map_err(AppError::Validation)?;

    let mut sessions = state.sessions.write().await;
    let game = sessions
        .get(&session_id)
        .ok_or(AppError::GameNotFound(session_id))?;

    let summary = game.summary();
    let id = state.leaderboard.save_score(
        name,
        summary.score,
        summary.total as i64,
        summary.accuracy,
        &summary.difficulty,
    )?;

    sessions.remove(&session_id);
    info!(%session_id, name, score = summary.score, "score saved, session closed");

    Ok(Json(SaveScoreResponse {
        message: format!("Score saved to leaderboard for {}", name),
        id,
    }))
}

/// Handler for DELETE /api/game/:id
pub async fn clear_game_handler(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ClearGameResponse>> {
    let removed = state.sessions.write().await.remove(&session_id);
    if removed.is_none() {
        return Err(AppError::GameNotFound(session_id));
    }

    Ok(Json(ClearGameResponse {
        message: "Game session cleared".to_string(),
    }))
}

/// Handler for GET /api/leaderboard
pub async fn leaderboard_handler(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>> {
    let difficulty = query.difficulty.clone().unwrap_or_default();
    let scores = state
        .leaderboard
        .top(Some(difficulty.as_str()), query.effective_limit())?;

    Ok(Json(LeaderboardResponse {
        scores,
        difficulty_filter: difficulty,
    }))
}

/// Handler for GET /api/categories
pub async fn categories_handler() -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        categories: CATEGORIES
            .iter()
            .map(|&(id, name)| CategoryInfo { id, name })
            .collect(),
    })
}

/// Handler for GET /stats
///
/// Returns response-cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.fetch.stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
