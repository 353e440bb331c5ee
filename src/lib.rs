//! Trivia Dashboard - a web backend over the OpenTDB trivia API
//!
//! Adds gameplay state, scoring and a persisted leaderboard on top of a
//! TTL-cached, retrying upstream fetch layer.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod game;
pub mod leaderboard;
pub mod models;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
