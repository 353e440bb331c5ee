//! API Routes
//!
//! Configures the Axum router with all trivia dashboard endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    answer_handler, categories_handler, clear_game_handler, health_handler, leaderboard_handler,
    preview_handler, question_handler, results_handler, save_score_handler, start_game_handler,
    stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET    /api/preview` - Fetch a raw question batch through the cache
/// - `POST   /api/game` - Start a game session
/// - `GET    /api/game/:id/question` - Current question for a session
/// - `POST   /api/game/:id/answer` - Answer the current question
/// - `GET    /api/game/:id/results` - Score summary for a session
/// - `POST   /api/game/:id/score` - Save the session to the leaderboard
/// - `DELETE /api/game/:id` - Clear a session
/// - `GET    /api/leaderboard` - Ranked scores, optionally by difficulty
/// - `GET    /api/categories` - Available question categories
/// - `GET    /stats` - Response-cache statistics
/// - `GET    /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/api/preview", get(preview_handler))
        .route("/api/game", post(start_game_handler))
        .route("/api/game/:id/question", get(question_handler))
        .route("/api/game/:id/answer", post(answer_handler))
        .route("/api/game/:id/results", get(results_handler))
        .route("/api/game/:id/score", post(save_score_handler))
        .route("/api/game/:id", delete(clear_game_handler))
        .route("/api/leaderboard", get(leaderboard_handler))
        .route("/api/categories", get(categories_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
