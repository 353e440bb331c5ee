//! Game Session Module
//!
//! Server-side state for one play-through: question cursor, fractional
//! score with the fast-answer bonus, timing and grading.

use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::error::{AppError, Result};
use crate::game::DisplayQuestion;

/// Extra score for answering correctly in under this many seconds.
const FAST_ANSWER_SECS: f64 = 5.0;
const FAST_ANSWER_BONUS: f64 = 0.2;

// == Answer Verdict ==
/// Outcome of answering the current question.
#[derive(Debug, Clone)]
pub struct AnswerVerdict {
    /// Whether the chosen index was the correct one
    pub correct: bool,
    /// The correct answer text, for the "wrong answer" reveal
    pub correct_answer: String,
    /// Running score after this answer
    pub score: f64,
    /// True once the last question has been answered
    pub finished: bool,
}

// == Game Summary ==
/// Final results of a play-through.
#[derive(Debug, Clone)]
pub struct GameSummary {
    /// Integer score (the fractional bonus is truncated)
    pub score: i64,
    /// Number of questions in the game
    pub total: usize,
    /// Correct answers as a percentage of the total
    pub accuracy: f64,
    /// Letter grade for the accuracy
    pub grade: &'static str,
    /// Seconds since the game started
    pub elapsed_secs: f64,
    /// Human-readable elapsed time
    pub elapsed_display: String,
    /// Difficulty filter the game was started with ("any" when unset)
    pub difficulty: String,
}

// == Game State ==
/// One player's active game.
#[derive(Debug)]
pub struct GameState {
    /// Transformed questions in presentation order
    questions: Vec<DisplayQuestion>,
    /// Index of the question currently being asked
    index: usize,
    /// Running score, including fast-answer bonuses
    score: f64,
    /// When the game started
    started_at: DateTime<Utc>,
    /// When the current question was first shown
    question_shown_at: Option<Instant>,
    /// Seconds taken per answered question
    question_times: Vec<f64>,
    /// Difficulty filter used to start the game
    difficulty: String,
}

impl GameState {
    // == Constructor ==
    /// Starts a game over `questions` with the given difficulty label.
    pub fn new(questions: Vec<DisplayQuestion>, difficulty: impl Into<String>) -> Self {
        Self {
            questions,
            index: 0,
            score: 0.0,
            started_at: Utc::now(),
            question_shown_at: None,
            question_times: Vec::new(),
            difficulty: difficulty.into(),
        }
    }

    // == Current Question ==
    /// The question being asked, or an error once the game is finished.
    pub fn current(&self) -> Result<&DisplayQuestion> {
        self.questions.get(self.index).ok_or(AppError::GameFinished)
    }

    /// Zero-based index of the current question.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Total number of questions.
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// True once every question has been answered.
    pub fn is_finished(&self) -> bool {
        self.index >= self.questions.len()
    }

    // == Mark Shown ==
    /// Starts the answer timer for the current question, if not already
    /// running. Called when the question is served to the player.
    pub fn mark_question_shown(&mut self) {
        if self.question_shown_at.is_none() {
            self.question_shown_at = Some(Instant::now());
        }
    }

    // == Answer ==
    /// Scores `answer_index` against the current question and advances.
    ///
    /// A correct answer scores 1 point, plus a 0.2 bonus when given within
    /// 5 seconds of the question being shown. An index outside the answer
    /// list is rejected without advancing the game.
    pub fn answer(&mut self, answer_index: usize) -> Result<AnswerVerdict> {
        let question = self.questions.get(self.index).ok_or(AppError::GameFinished)?;

        if answer_index >= question.answers.len() {
            return Err(AppError::Validation("Invalid answer".to_string()));
        }

        // A question answered before it was ever served counts as instant
        let time_taken = self
            .question_shown_at
            .take()
            .map(|shown| shown.elapsed().as_secs_f64())
            .unwrap_or(0.0);
        self.question_times.push(time_taken);

        let correct = answer_index == question.correct_index;
        let correct_answer = question.answers[question.correct_index].clone();

        if correct {
            self.score += 1.0;
            if time_taken < FAST_ANSWER_SECS {
                self.score += FAST_ANSWER_BONUS;
            }
        }

        self.index += 1;

        Ok(AnswerVerdict {
            correct,
            correct_answer,
            score: self.score,
            finished: self.is_finished(),
        })
    }

    // == Summary ==
    /// Results snapshot; valid at any point, final once finished.
    pub fn summary(&self) -> GameSummary {
        let score = self.score as i64;
        let total = self.questions.len();
        let accuracy = if total > 0 {
            score as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        let elapsed_secs = (Utc::now() - self.started_at)
            .to_std()
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);

        GameSummary {
            score,
            total,
            accuracy,
            grade: letter_grade(accuracy),
            elapsed_secs,
            elapsed_display: format_duration(elapsed_secs),
            difficulty: self.difficulty.clone(),
        }
    }

    /// Difficulty filter label for the leaderboard row.
    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }
}

// == Letter Grade ==
/// Maps an accuracy percentage to a letter grade.
pub fn letter_grade(accuracy: f64) -> &'static str {
    if accuracy >= 90.0 {
        "A"
    } else if accuracy >= 80.0 {
        "B"
    } else if accuracy >= 70.0 {
        "C"
    } else if accuracy >= 60.0 {
        "D"
    } else {
        "F"
    }
}

// == Format Duration ==
/// Formats seconds as "12.3s" or "2m 5s" past the minute mark.
pub fn format_duration(seconds: f64) -> String {
    if seconds < 60.0 {
        format!("{:.1}s", seconds)
    } else {
        let minutes = (seconds / 60.0) as u64;
        let remaining = seconds % 60.0;
        format!("{}m {:.0}s", minutes, remaining)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn two_question_game() -> GameState {
        let questions = vec![
            DisplayQuestion {
                category: "Math".to_string(),
                difficulty: "easy".to_string(),
                question_type: "multiple".to_string(),
                question: "2+2=?".to_string(),
                answers: vec!["3".to_string(), "4".to_string(), "5".to_string()],
                correct_index: 1,
            },
            DisplayQuestion {
                category: "History".to_string(),
                difficulty: "easy".to_string(),
                question_type: "boolean".to_string(),
                question: "Rome fell in 476 AD.".to_string(),
                answers: vec!["True".to_string(), "False".to_string()],
                correct_index: 0,
            },
        ];
        GameState::new(questions, "easy")
    }

    #[test]
    fn test_correct_answer_scores_with_bonus() {
        let mut game = two_question_game();
        game.mark_question_shown();

        let verdict = game.answer(1).unwrap();
        assert!(verdict.correct);
        // Instant answer earns the fast bonus
        assert!((verdict.score - 1.2).abs() < f64::EPSILON);
        assert!(!verdict.finished);
        assert_eq!(game.index(), 1);
    }

    #[test]
    fn test_wrong_answer_reveals_correct() {
        let mut game = two_question_game();

        let verdict = game.answer(0).unwrap();
        assert!(!verdict.correct);
        assert_eq!(verdict.correct_answer, "4");
        assert_eq!(verdict.score, 0.0);
    }

    #[test]
    fn test_out_of_range_answer_rejected() {
        let mut game = two_question_game();

        let result = game.answer(3);
        assert!(matches!(result, Err(AppError::Validation(_))));
        // Game did not advance
        assert_eq!(game.index(), 0);
    }

    #[test]
    fn test_game_finishes_after_last_answer() {
        let mut game = two_question_game();

        game.answer(1).unwrap();
        let verdict = game.answer(0).unwrap();
        assert!(verdict.finished);
        assert!(game.is_finished());
        assert!(matches!(game.current(), Err(AppError::GameFinished)));
        assert!(matches!(game.answer(0), Err(AppError::GameFinished)));
    }

    #[test]
    fn test_summary_truncates_bonus() {
        let mut game = two_question_game();
        game.answer(1).unwrap(); // correct, +1.2 with bonus
        game.answer(1).unwrap(); // wrong

        let summary = game.summary();
        assert_eq!(summary.score, 1);
        assert_eq!(summary.total, 2);
        assert!((summary.accuracy - 50.0).abs() < f64::EPSILON);
        assert_eq!(summary.grade, "F");
        assert_eq!(summary.difficulty, "easy");
    }

    #[test]
    fn test_letter_grades() {
        assert_eq!(letter_grade(95.0), "A");
        assert_eq!(letter_grade(90.0), "A");
        assert_eq!(letter_grade(85.0), "B");
        assert_eq!(letter_grade(70.0), "C");
        assert_eq!(letter_grade(65.0), "D");
        assert_eq!(letter_grade(10.0), "F");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(42.34), "42.3s");
        assert_eq!(format_duration(125.0), "2m 5s");
    }
}
