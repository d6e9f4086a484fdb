//! Question repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/delete/list/count/search APIs over `questions` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `NewQuestion::validate()` before SQL mutations.
//! - Every list is ordered by `id ASC`.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::category::CategoryId;
use crate::model::question::{NewQuestion, Question, QuestionId, QuestionValidationError};
use crate::search::term::SearchTerm;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

const QUESTION_SELECT_SQL: &str = "SELECT
    id,
    question,
    answer,
    category,
    difficulty
FROM questions";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for question and category persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(QuestionValidationError),
    Db(DbError),
    NotFound(QuestionId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "question not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<QuestionValidationError> for RepoError {
    fn from(value: QuestionValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing questions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionListQuery {
    /// Exact category match; `None` lists every category.
    pub category: Option<CategoryId>,
    /// Identifiers to leave out of the result.
    pub exclude: BTreeSet<QuestionId>,
    pub limit: Option<u32>,
    pub offset: u64,
}

/// Repository interface for question operations.
pub trait QuestionRepository {
    fn create_question(&self, question: &NewQuestion) -> RepoResult<QuestionId>;
    fn get_question(&self, id: QuestionId) -> RepoResult<Option<Question>>;
    fn delete_question(&self, id: QuestionId) -> RepoResult<()>;
    fn list_questions(&self, query: &QuestionListQuery) -> RepoResult<Vec<Question>>;
    fn count_questions(&self) -> RepoResult<u64>;
    fn search_questions(&self, term: &SearchTerm) -> RepoResult<Vec<Question>>;
}

/// SQLite-backed question repository.
pub struct SqliteQuestionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteQuestionRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl QuestionRepository for SqliteQuestionRepository<'_> {
    fn create_question(&self, question: &NewQuestion) -> RepoResult<QuestionId> {
        let valid = question.validate()?;

        self.conn.execute(
            "INSERT INTO questions (
                question,
                answer,
                category,
                difficulty
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                valid.question.as_str(),
                valid.answer.as_str(),
                valid.category,
                valid.difficulty,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_question(&self, id: QuestionId) -> RepoResult<Option<Question>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{QUESTION_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_question_row(row)?));
        }

        Ok(None)
    }

    fn delete_question(&self, id: QuestionId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM questions WHERE id = ?1;", params![id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn list_questions(&self, query: &QuestionListQuery) -> RepoResult<Vec<Question>> {
        let mut sql = format!("{QUESTION_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(category) = query.category {
            sql.push_str(" AND category = ?");
            bind_values.push(Value::Integer(category));
        }

        // Bound as one JSON array parameter regardless of set size.
        if !query.exclude.is_empty() {
            let excluded = serde_json::to_string(&query.exclude)
                .map_err(|err| RepoError::InvalidData(format!("exclusion set: {err}")))?;
            sql.push_str(" AND id NOT IN (SELECT value FROM json_each(?))");
            bind_values.push(Value::Text(excluded));
        }

        sql.push_str(" ORDER BY id ASC");

        let offset = i64::try_from(query.offset).unwrap_or(i64::MAX);
        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(offset));
            }
        } else if offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(offset));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query(params_from_iter(bind_values))?;
        collect_questions(rows)
    }

    fn count_questions(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM questions;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative question count `{count}`")))
    }

    fn search_questions(&self, term: &SearchTerm) -> RepoResult<Vec<Question>> {
        // SQLite LIKE folds ASCII only; matching happens on the Rust side.
        let mut stmt = self
            .conn
            .prepare(&format!("{QUESTION_SELECT_SQL} ORDER BY id ASC;"))?;
        let questions = collect_questions(stmt.query([])?)?;
        Ok(questions
            .into_iter()
            .filter(|question| term.matches(&question.question))
            .collect())
    }
}

fn collect_questions(mut rows: rusqlite::Rows<'_>) -> RepoResult<Vec<Question>> {
    let mut questions = Vec::new();
    while let Some(row) = rows.next()? {
        questions.push(parse_question_row(row)?);
    }
    Ok(questions)
}

fn parse_question_row(row: &Row<'_>) -> RepoResult<Question> {
    let id: QuestionId = row.get("id")?;
    let question: String = row.get("question")?;
    let answer: String = row.get("answer")?;

    if question.is_empty() || answer.is_empty() {
        return Err(RepoError::InvalidData(format!(
            "question {id} has empty question or answer text"
        )));
    }

    Ok(Question {
        id,
        question,
        answer,
        category: row.get("category")?,
        difficulty: row.get("difficulty")?,
    })
}
