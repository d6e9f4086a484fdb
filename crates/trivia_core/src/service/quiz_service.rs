//! Quiz question selection.
//!
//! # Responsibility
//! - Pick the next question of an open-ended quiz from a category filter and
//!   the set of questions already asked.
//!
//! # Invariants
//! - Category id `0` means any category.
//! - A question in `previous_questions` is never returned.
//! - Selection policy: the eligible question with the lowest id wins.
//! - Missing category (validation) and exhausted quiz (not found) stay
//!   distinct outcomes.

use crate::model::category::CategoryId;
use crate::model::question::{Question, QuestionId};
use crate::repo::question_repo::{QuestionListQuery, QuestionRepository, RepoError};
use crate::service::{ServiceError, ServiceResult};
use log::debug;
use std::collections::BTreeSet;

/// Category id that disables category filtering.
pub const ANY_CATEGORY_ID: CategoryId = 0;

/// Category constraint for candidate questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    Any,
    Only(CategoryId),
}

impl CategoryFilter {
    pub fn from_id(id: CategoryId) -> Self {
        if id == ANY_CATEGORY_ID {
            Self::Any
        } else {
            Self::Only(id)
        }
    }

    fn category(self) -> Option<CategoryId> {
        match self {
            Self::Any => None,
            Self::Only(id) => Some(id),
        }
    }
}

/// Input of one "next question" step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizRequest {
    /// Required; `None` is a caller error.
    pub quiz_category: Option<CategoryId>,
    /// Already shown questions. Empty means first question of the quiz.
    pub previous_questions: BTreeSet<QuestionId>,
}

impl QuizRequest {
    pub fn new(
        quiz_category: CategoryId,
        previous_questions: impl IntoIterator<Item = QuestionId>,
    ) -> Self {
        Self {
            quiz_category: Some(quiz_category),
            previous_questions: previous_questions.into_iter().collect(),
        }
    }
}

/// Successful outcome of one selection step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizPick {
    Next(Question),
    /// No eligible question remains; the quiz is over.
    Exhausted,
}

/// Quiz selector over a question repository.
pub struct QuizSelector<Q: QuestionRepository> {
    questions: Q,
}

impl<Q: QuestionRepository> QuizSelector<Q> {
    pub fn new(questions: Q) -> Self {
        Self { questions }
    }

    /// Picks the lowest-id question that matches the filter and was not
    /// asked before.
    pub fn next_question(&self, request: &QuizRequest) -> ServiceResult<QuizPick> {
        let category_id = request
            .quiz_category
            .ok_or(ServiceError::MissingQuizCategory)?;
        let filter = CategoryFilter::from_id(category_id);

        let query = QuestionListQuery {
            category: filter.category(),
            exclude: request.previous_questions.clone(),
            limit: Some(1),
            offset: 0,
        };
        let picked = self.questions.list_questions(&query)?.into_iter().next();

        match picked {
            Some(question) if !request.previous_questions.contains(&question.id) => {
                debug!(
                    "event=quiz_select module=service status=ok category={} excluded={} question_id={}",
                    category_id,
                    request.previous_questions.len(),
                    question.id
                );
                Ok(QuizPick::Next(question))
            }
            Some(question) => Err(ServiceError::Repo(RepoError::InvalidData(format!(
                "store returned excluded question {}",
                question.id
            )))),
            None => {
                debug!(
                    "event=quiz_select module=service status=exhausted category={} excluded={}",
                    category_id,
                    request.previous_questions.len()
                );
                Ok(QuizPick::Exhausted)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoryFilter, QuizPick, QuizRequest, QuizSelector};
    use crate::model::question::{NewQuestion, Question, QuestionId};
    use crate::repo::question_repo::{QuestionListQuery, QuestionRepository, RepoResult};
    use crate::search::term::SearchTerm;
    use crate::service::ServiceError;

    /// Repository that ignores every filter, to prove the selector's own guard.
    struct UnfilteredRepo(Vec<Question>);

    impl QuestionRepository for UnfilteredRepo {
        fn create_question(&self, _question: &NewQuestion) -> RepoResult<QuestionId> {
            unreachable!()
        }
        fn get_question(&self, _id: QuestionId) -> RepoResult<Option<Question>> {
            unreachable!()
        }
        fn delete_question(&self, _id: QuestionId) -> RepoResult<()> {
            unreachable!()
        }
        fn list_questions(&self, _query: &QuestionListQuery) -> RepoResult<Vec<Question>> {
            Ok(self.0.clone())
        }
        fn count_questions(&self) -> RepoResult<u64> {
            Ok(self.0.len() as u64)
        }
        fn search_questions(&self, _term: &SearchTerm) -> RepoResult<Vec<Question>> {
            unreachable!()
        }
    }

    fn question(id: QuestionId) -> Question {
        Question {
            id,
            question: format!("q{id}"),
            answer: format!("a{id}"),
            category: 1,
            difficulty: 1,
        }
    }

    #[test]
    fn zero_means_any_category() {
        assert_eq!(CategoryFilter::from_id(0), CategoryFilter::Any);
        assert_eq!(CategoryFilter::from_id(3), CategoryFilter::Only(3));
    }

    #[test]
    fn missing_category_is_rejected_before_store_access() {
        let selector = QuizSelector::new(UnfilteredRepo(vec![question(1)]));
        let err = selector.next_question(&QuizRequest::default()).unwrap_err();
        assert!(matches!(err, ServiceError::MissingQuizCategory));
    }

    #[test]
    fn excluded_question_from_store_is_never_returned() {
        let selector = QuizSelector::new(UnfilteredRepo(vec![question(4)]));
        let err = selector
            .next_question(&QuizRequest::new(0, [4]))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Repo(_)));
    }

    #[test]
    fn empty_store_is_exhausted() {
        let selector = QuizSelector::new(UnfilteredRepo(Vec::new()));
        let pick = selector.next_question(&QuizRequest::new(3, [])).unwrap();
        assert_eq!(pick, QuizPick::Exhausted);
    }
}
