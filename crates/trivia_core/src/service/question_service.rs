//! Question mutation use-cases.
//!
//! # Invariants
//! - Validation runs before any store call; a rejected input inserts nothing.
//! - Delete of an unknown id is `QuestionNotFound`, never a silent success.

use crate::model::question::{NewQuestion, Question, QuestionId};
use crate::repo::question_repo::QuestionRepository;
use crate::service::ServiceResult;
use log::{error, info};

/// Create/delete service over a question repository.
pub struct QuestionService<Q: QuestionRepository> {
    repo: Q,
}

impl<Q: QuestionRepository> QuestionService<Q> {
    pub fn new(repo: Q) -> Self {
        Self { repo }
    }

    /// Validates and inserts a question, returning the store-assigned id.
    pub fn create_question(&self, input: &NewQuestion) -> ServiceResult<QuestionId> {
        input.validate()?;

        match self.repo.create_question(input) {
            Ok(id) => {
                info!("event=question_create module=service status=ok question_id={id}");
                Ok(id)
            }
            Err(err) => {
                error!(
                    "event=question_create module=service status=error error_code=store_failed error={err}"
                );
                Err(err.into())
            }
        }
    }

    /// Deletes a question and echoes its id.
    pub fn delete_question(&self, id: QuestionId) -> ServiceResult<QuestionId> {
        self.repo.delete_question(id)?;
        info!("event=question_delete module=service status=ok question_id={id}");
        Ok(id)
    }

    /// Reads one question back by id.
    pub fn get_question(&self, id: QuestionId) -> ServiceResult<Option<Question>> {
        Ok(self.repo.get_question(id)?)
    }
}
