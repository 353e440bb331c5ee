//! Upstream query parameters
//!
//! Validates raw request input into a typed OpenTDB query and derives the
//! cache key used by the response cache.

use serde::Deserialize;

use crate::error::{AppError, Result};

// == Limits ==
/// Minimum number of questions per request
pub const MIN_AMOUNT: u8 = 1;

/// Maximum number of questions per request
pub const MAX_AMOUNT: u8 = 50;

// == Difficulty ==
/// Question difficulty filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Parses a difficulty string; empty input means "no filter".
    pub fn parse(value: &str) -> Result<Option<Self>> {
        match value.trim().to_lowercase().as_str() {
            "" => Ok(None),
            "easy" => Ok(Some(Difficulty::Easy)),
            "medium" => Ok(Some(Difficulty::Medium)),
            "hard" => Ok(Some(Difficulty::Hard)),
            _ => Err(AppError::Validation(
                "Difficulty must be one of: easy, medium, hard".to_string(),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

// == Question Type ==
/// Question format filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionType {
    Multiple,
    Boolean,
}

impl QuestionType {
    /// Parses a question type string; empty input means "no filter".
    pub fn parse(value: &str) -> Result<Option<Self>> {
        match value.trim().to_lowercase().as_str() {
            "" => Ok(None),
            "multiple" => Ok(Some(QuestionType::Multiple)),
            "boolean" => Ok(Some(QuestionType::Boolean)),
            _ => Err(AppError::Validation(
                "Type must be one of: multiple, boolean".to_string(),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Multiple => "multiple",
            QuestionType::Boolean => "boolean",
        }
    }
}

// == Encoding ==
/// Upstream text encoding scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Url3986,
    Base64,
}

impl Encoding {
    /// Parses an encoding string; empty input means the upstream default
    /// (HTML entities).
    pub fn parse(value: &str) -> Result<Option<Self>> {
        match value.trim().to_lowercase().as_str() {
            "" => Ok(None),
            "url3986" => Ok(Some(Encoding::Url3986)),
            "base64" => Ok(Some(Encoding::Base64)),
            _ => Err(AppError::Validation(
                "Encode must be one of: url3986, base64".to_string(),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Url3986 => "url3986",
            Encoding::Base64 => "base64",
        }
    }
}

// == Raw Params ==
/// Unvalidated request input, as received from query strings or JSON bodies.
///
/// Mirrors the form fields of the original dashboard: everything arrives as
/// an optional string and is validated into [`QueryParams`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawParams {
    /// Number of questions (defaults to "10")
    pub amount: Option<String>,
    /// OpenTDB category code
    pub category: Option<String>,
    /// Difficulty filter
    pub difficulty: Option<String>,
    /// Question type filter
    #[serde(rename = "type")]
    pub question_type: Option<String>,
    /// Text encoding scheme
    pub encode: Option<String>,
}

impl RawParams {
    /// Validates the raw input into a typed query.
    ///
    /// A non-numeric category is silently dropped rather than rejected,
    /// matching the original dashboard behavior.
    pub fn validate(&self) -> Result<QueryParams> {
        let amount = validate_amount(self.amount.as_deref().unwrap_or("10"))?;
        let difficulty = Difficulty::parse(self.difficulty.as_deref().unwrap_or(""))?;
        let question_type = QuestionType::parse(self.question_type.as_deref().unwrap_or(""))?;
        let encode = Encoding::parse(self.encode.as_deref().unwrap_or(""))?;
        let category = self
            .category
            .as_deref()
            .and_then(|c| c.trim().parse::<u32>().ok());

        Ok(QueryParams {
            amount,
            category,
            difficulty,
            question_type,
            encode,
        })
    }
}

// == Query Params ==
/// Validated upstream query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    /// Number of questions (1-50)
    pub amount: u8,
    /// OpenTDB category code, if filtering by category
    pub category: Option<u32>,
    /// Difficulty filter
    pub difficulty: Option<Difficulty>,
    /// Question type filter
    pub question_type: Option<QuestionType>,
    /// Text encoding scheme
    pub encode: Option<Encoding>,
}

impl QueryParams {
    /// Builds a query for `amount` questions with no filters.
    pub fn with_amount(amount: u8) -> Self {
        Self {
            amount,
            category: None,
            difficulty: None,
            question_type: None,
            encode: None,
        }
    }

    /// Returns the set parameters as name/value pairs for the HTTP query
    /// string. Unset filters are omitted, as upstream expects.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("amount", self.amount.to_string())];
        if let Some(category) = self.category {
            pairs.push(("category", category.to_string()));
        }
        if let Some(difficulty) = self.difficulty {
            pairs.push(("difficulty", difficulty.as_str().to_string()));
        }
        if let Some(question_type) = self.question_type {
            pairs.push(("type", question_type.as_str().to_string()));
        }
        if let Some(encode) = self.encode {
            pairs.push(("encode", encode.as_str().to_string()));
        }
        pairs
    }

    /// Derives the cache key: `name=value` pairs sorted by parameter name.
    ///
    /// Two parameter sets that differ only in ordering produce the same key.
    pub fn cache_key(&self) -> String {
        let mut pairs = self.to_pairs();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Difficulty filter as stored on the leaderboard ("any" when unset).
    pub fn difficulty_label(&self) -> &'static str {
        self.difficulty.map(|d| d.as_str()).unwrap_or("any")
    }
}

// == Amount Validation ==
/// Validates the amount parameter (1-50).
pub fn validate_amount(value: &str) -> Result<u8> {
    let amount: i64 = value
        .trim()
        .parse()
        .map_err(|_| AppError::Validation("Amount must be a valid integer".to_string()))?;

    if amount < MIN_AMOUNT as i64 || amount > MAX_AMOUNT as i64 {
        return Err(AppError::Validation(format!(
            "Amount must be between {} and {}",
            MIN_AMOUNT, MAX_AMOUNT
        )));
    }

    Ok(amount as u8)
}
