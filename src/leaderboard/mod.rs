//! Leaderboard Module
//!
//! SQLite-backed score store. Thread-safe via an internal mutex on the
//! connection; queries are small and indexed, so handlers call it directly.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection};
use serde::Serialize;
use tracing::debug;

use crate::error::{AppError, Result};

/// Default number of rows returned by leaderboard queries.
pub const DEFAULT_LIMIT: u32 = 50;

/// Upper bound on requested leaderboard rows.
pub const MAX_LIMIT: u32 = 100;

// == Score Entry ==
/// One persisted leaderboard row.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreEntry {
    pub id: i64,
    pub name: String,
    pub score: i64,
    pub total: i64,
    pub accuracy: f64,
    pub difficulty: String,
    pub created_at: String,
}

// == Leaderboard Stats ==
/// Aggregate statistics over all saved games.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardStats {
    pub total_games: i64,
    pub avg_accuracy: f64,
    pub high_score: i64,
}

// == Leaderboard ==
/// Persistent score store.
#[derive(Clone)]
pub struct Leaderboard {
    conn: Arc<Mutex<Connection>>,
}

impl Leaderboard {
    // == Constructors ==
    /// Opens (or creates) the database at `path` and ensures the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;

        // WAL keeps concurrent readers from blocking on score inserts
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        let board = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        board.init_schema()?;
        Ok(board)
    }

    /// In-memory store for tests.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let board = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        board.init_schema()?;
        Ok(board)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| AppError::Internal(format!("Leaderboard lock poisoned: {}", e)))
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS scores (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                score INTEGER NOT NULL,
                total INTEGER NOT NULL,
                accuracy REAL NOT NULL,
                difficulty TEXT,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_created_at ON scores(created_at DESC);
            CREATE INDEX IF NOT EXISTS idx_score ON scores(score DESC);
            CREATE INDEX IF NOT EXISTS idx_difficulty ON scores(difficulty);
            "#,
        )?;
        Ok(())
    }

    // == Save Score ==
    /// Inserts a finished game, returning the new row id.
    pub fn save_score(
        &self,
        name: &str,
        score: i64,
        total: i64,
        accuracy: f64,
        difficulty: &str,
    ) -> Result<i64> {
        let conn = self.lock()?;
        let created_at = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO scores (name, score, total, accuracy, difficulty, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![name, score, total, accuracy, difficulty, created_at],
        )?;

        let id = conn.last_insert_rowid();
        debug!(id, name, score, "score saved");
        Ok(id)
    }

    // == Top ==
    /// Best scores, optionally filtered by difficulty, ordered by score,
    /// then accuracy, then recency.
    pub fn top(&self, difficulty: Option<&str>, limit: u32) -> Result<Vec<ScoreEntry>> {
        let limit = limit.clamp(1, MAX_LIMIT);
        let conn = self.lock()?;

        let mut rows = Vec::new();
        match difficulty {
            Some(difficulty) if !difficulty.is_empty() => {
                let mut stmt = conn.prepare(
                    "SELECT id, name, score, total, accuracy, difficulty, created_at
                     FROM scores
                     WHERE difficulty = ?1
                     ORDER BY score DESC, accuracy DESC, created_at DESC
                     LIMIT ?2",
                )?;
                let mapped = stmt.query_map(params![difficulty, limit], row_to_entry)?;
                for entry in mapped {
                    rows.push(entry?);
                }
            }
            _ => {
                let mut stmt = conn.prepare(
                    "SELECT id, name, score, total, accuracy, difficulty, created_at
                     FROM scores
                     ORDER BY score DESC, accuracy DESC, created_at DESC
                     LIMIT ?1",
                )?;
                let mapped = stmt.query_map(params![limit], row_to_entry)?;
                for entry in mapped {
                    rows.push(entry?);
                }
            }
        }
        Ok(rows)
    }

    // == Recent ==
    /// Most recently saved scores.
    pub fn recent(&self, limit: u32) -> Result<Vec<ScoreEntry>> {
        let limit = limit.clamp(1, MAX_LIMIT);
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, score, total, accuracy, difficulty, created_at
             FROM scores
             ORDER BY created_at DESC
             LIMIT ?1",
        )?;
        let mapped = stmt.query_map(params![limit], row_to_entry)?;

        let mut rows = Vec::new();
        for entry in mapped {
            rows.push(entry?);
        }
        Ok(rows)
    }

    // == Stats ==
    /// Aggregate statistics over every saved game.
    pub fn stats(&self) -> Result<LeaderboardStats> {
        let conn = self.lock()?;

        let total_games: i64 =
            conn.query_row("SELECT COUNT(*) FROM scores", [], |row| row.get(0))?;
        let avg_accuracy: f64 = conn.query_row(
            "SELECT COALESCE(AVG(accuracy), 0) FROM scores",
            [],
            |row| row.get(0),
        )?;
        let high_score: i64 = conn.query_row(
            "SELECT COALESCE(MAX(score), 0) FROM scores",
            [],
            |row| row.get(0),
        )?;

        Ok(LeaderboardStats {
            total_games,
            avg_accuracy: (avg_accuracy * 100.0).round() / 100.0,
            high_score,
        })
    }

    // == Delete ==
    /// Removes a score row by id. Admin operation.
    pub fn delete(&self, id: i64) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM scores WHERE id = ?1", params![id])?;
        Ok(())
    }
}

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<ScoreEntry> {
    Ok(ScoreEntry {
        id: row.get(0)?,
        name: row.get(1)?,
        score: row.get(2)?,
        total: row.get(3)?,
        accuracy: row.get(4)?,
        difficulty: row.get(5)?,
        created_at: row.get(6)?,
    })
}
