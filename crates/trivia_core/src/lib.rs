//! Core query and selection logic for the trivia service.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use config::StoreConfig;
pub use logging::{
    default_log_dir, default_log_level, init_logging, logging_status, LogLevel, LoggingError,
};
pub use model::category::{Category, CategoryId, DEFAULT_CATEGORIES};
pub use model::question::{
    NewQuestion, Question, QuestionId, QuestionValidationError, DEFAULT_DIFFICULTY,
};
pub use repo::category_repo::{
    seed_default_categories, CategoryRepository, SqliteCategoryRepository,
};
pub use repo::question_repo::{
    QuestionListQuery, QuestionRepository, RepoError, RepoResult, SqliteQuestionRepository,
};
pub use search::term::{SearchError, SearchTerm};
pub use service::query_service::{
    PageRequest, QueryService, QuestionPage, DEFAULT_PAGE, DEFAULT_PAGE_LIMIT,
};
pub use service::question_service::QuestionService;
pub use service::quiz_service::{
    CategoryFilter, QuizPick, QuizRequest, QuizSelector, ANY_CATEGORY_ID,
};
pub use service::{ErrorKind, ServiceError, ServiceResult};

/// Minimal health-check API for smoke checks.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
