//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Classify every failure as validation, not-found or internal.
//!
//! # Invariants
//! - Validation and not-found outcomes are never merged.
//! - Services hold no state between calls; every read goes to the store.

pub mod query_service;
pub mod question_service;
pub mod quiz_service;

use crate::model::question::{QuestionId, QuestionValidationError};
use crate::repo::question_repo::RepoError;
use crate::search::term::SearchError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Outcome class of a failed service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller input is missing or malformed.
    Validation,
    /// Target entity does not exist.
    NotFound,
    /// Store or consistency failure.
    Internal,
}

/// Service error shared by query, quiz and mutation use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Question creation input failed validation.
    InvalidQuestion(QuestionValidationError),
    /// Search term absent or blank.
    EmptySearchTerm,
    /// Quiz request carried no category.
    MissingQuizCategory,
    /// Target question does not exist.
    QuestionNotFound(QuestionId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidQuestion(_) | Self::EmptySearchTerm | Self::MissingQuizCategory => {
                ErrorKind::Validation
            }
            Self::QuestionNotFound(_) => ErrorKind::NotFound,
            Self::Repo(_) => ErrorKind::Internal,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidQuestion(err) => write!(f, "invalid question: {err}"),
            Self::EmptySearchTerm => write!(f, "search term must not be empty"),
            Self::MissingQuizCategory => write!(f, "quiz_category is required"),
            Self::QuestionNotFound(id) => write!(f, "question not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidQuestion(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::QuestionNotFound(id),
            RepoError::Validation(err) => Self::InvalidQuestion(err),
            other => Self::Repo(other),
        }
    }
}

impl From<QuestionValidationError> for ServiceError {
    fn from(value: QuestionValidationError) -> Self {
        Self::InvalidQuestion(value)
    }
}

impl From<SearchError> for ServiceError {
    fn from(value: SearchError) -> Self {
        match value {
            SearchError::EmptyTerm => Self::EmptySearchTerm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, ServiceError};
    use crate::db::DbError;
    use crate::model::question::QuestionValidationError;
    use crate::repo::question_repo::RepoError;

    #[test]
    fn repo_errors_map_to_distinct_kinds() {
        let not_found = ServiceError::from(RepoError::NotFound(7));
        assert_eq!(not_found.kind(), ErrorKind::NotFound);

        let invalid = ServiceError::from(RepoError::Validation(
            QuestionValidationError::EmptyAnswer,
        ));
        assert_eq!(invalid.kind(), ErrorKind::Validation);

        let db = ServiceError::from(RepoError::Db(DbError::SchemaTooNew {
            found: 9,
            supported: 1,
        }));
        assert_eq!(db.kind(), ErrorKind::Internal);
    }

    #[test]
    fn missing_quiz_category_is_validation_not_not_found() {
        assert_eq!(
            ServiceError::MissingQuizCategory.kind(),
            ErrorKind::Validation
        );
    }
}
