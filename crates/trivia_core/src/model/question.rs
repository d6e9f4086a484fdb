//! Question domain model.
//!
//! # Responsibility
//! - Define the persisted question record and its creation input.
//! - Validate creation input before it reaches storage.
//!
//! # Invariants
//! - `question` and `answer` are non-empty.
//! - `category` is set; `0` is treated as absent.
//! - `difficulty` defaults to 1.

use crate::model::category::CategoryId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned question identifier.
pub type QuestionId = i64;

/// Difficulty applied when the caller omits it.
pub const DEFAULT_DIFFICULTY: i64 = 1;

/// Persisted trivia question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: i64,
}

/// Creation input. The store assigns the identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<CategoryId>,
    pub difficulty: Option<i64>,
}

/// Fully validated creation input, ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidQuestion {
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: i64,
}

/// Reason a question cannot be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionValidationError {
    EmptyQuestion,
    EmptyAnswer,
    MissingCategory,
}

impl QuestionValidationError {
    /// Name of the offending request field.
    pub fn field(self) -> &'static str {
        match self {
            Self::EmptyQuestion => "question",
            Self::EmptyAnswer => "answer",
            Self::MissingCategory => "category",
        }
    }
}

impl Display for QuestionValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyQuestion => write!(f, "question text must not be empty"),
            Self::EmptyAnswer => write!(f, "answer text must not be empty"),
            Self::MissingCategory => write!(f, "category is required"),
        }
    }
}

impl Error for QuestionValidationError {}

impl NewQuestion {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        category: CategoryId,
    ) -> Self {
        Self {
            question: Some(question.into()),
            answer: Some(answer.into()),
            category: Some(category),
            difficulty: None,
        }
    }

    pub fn with_difficulty(mut self, difficulty: i64) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Checks required fields and applies the difficulty default.
    ///
    /// Fields are checked in order `question`, `answer`, `category`; the first
    /// failure is reported.
    pub fn validate(&self) -> Result<ValidQuestion, QuestionValidationError> {
        let question = non_empty(self.question.as_deref())
            .ok_or(QuestionValidationError::EmptyQuestion)?;
        let answer =
            non_empty(self.answer.as_deref()).ok_or(QuestionValidationError::EmptyAnswer)?;
        let category = match self.category {
            Some(id) if id != 0 => id,
            _ => return Err(QuestionValidationError::MissingCategory),
        };

        Ok(ValidQuestion {
            question: question.to_string(),
            answer: answer.to_string(),
            category,
            difficulty: self.difficulty.unwrap_or(DEFAULT_DIFFICULTY),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}
