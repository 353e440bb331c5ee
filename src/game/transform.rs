//! Question Transform Module
//!
//! Pure conversion of a raw upstream question into a display-ready one:
//! HTML entities decoded, answers shuffled, correct index tracked.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

use crate::upstream::RawQuestion;

// == Display Question ==
/// A question prepared for presentation.
///
/// Derived from a [`RawQuestion`] per game start and held in session state;
/// never persisted. `correct_index` is the unit of truth for answer
/// checking, not the answer text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayQuestion {
    /// Decoded category name
    pub category: String,
    /// "easy", "medium" or "hard"
    pub difficulty: String,
    /// "multiple" or "boolean"
    pub question_type: String,
    /// Decoded question text
    pub question: String,
    /// Decoded answers in shuffled order
    pub answers: Vec<String>,
    /// Position of the correct answer within `answers`
    pub correct_index: usize,
}

// == Decode ==
/// Decodes HTML entities (named and numeric) to literal characters.
///
/// Total: unrecognized sequences pass through verbatim, so malformed
/// upstream text degrades instead of erroring.
pub fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

// == Transform ==
/// Builds a [`DisplayQuestion`] from a raw one.
///
/// The answer list is the incorrect answers followed by the correct one,
/// then shuffled. With `seed` set the shuffle is deterministic; otherwise
/// it is seeded from entropy. The correct answer is tracked through the
/// shuffle by position, so an incorrect answer with identical text cannot
/// claim the index.
pub fn transform(raw: &RawQuestion, seed: Option<u64>) -> DisplayQuestion {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut answers: Vec<(String, bool)> = raw
        .incorrect_answers
        .iter()
        .map(|answer| (decode_entities(answer), false))
        .collect();
    answers.push((decode_entities(&raw.correct_answer), true));

    answers.shuffle(&mut rng);

    let correct_index = answers
        .iter()
        .position(|(_, is_correct)| *is_correct)
        .unwrap_or(0);

    DisplayQuestion {
        category: decode_entities(&raw.category),
        difficulty: raw.difficulty.clone(),
        question_type: raw.question_type.clone(),
        question: decode_entities(&raw.question),
        answers: answers.into_iter().map(|(text, _)| text).collect(),
        correct_index,
    }
}
