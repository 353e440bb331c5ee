//! Game Module
//!
//! Question presentation (decode + shuffle) and per-player game state.

mod session;
mod transform;

pub use session::{format_duration, letter_grade, AnswerVerdict, GameState, GameSummary};
pub use transform::{decode_entities, transform, DisplayQuestion};
