//! Category repository contract and SQLite implementation.
//!
//! # Invariants
//! - Listing order is `type ASC, id ASC`.
//! - Seeding only inserts into an empty table.

use crate::model::category::{Category, CategoryId, DEFAULT_CATEGORIES};
use crate::repo::question_repo::{RepoError, RepoResult};
use log::info;
use rusqlite::{params, Connection, Row};

/// Repository interface for category reads and seed writes.
pub trait CategoryRepository {
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    fn create_category(&self, kind: &str) -> RepoResult<CategoryId>;
    fn count_categories(&self) -> RepoResult<u64>;
}

/// SQLite-backed category repository.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, type FROM categories ORDER BY type ASC, id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();

        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }

        Ok(categories)
    }

    fn create_category(&self, kind: &str) -> RepoResult<CategoryId> {
        if kind.trim().is_empty() {
            return Err(RepoError::InvalidData(
                "category type must not be empty".to_string(),
            ));
        }

        self.conn
            .execute("INSERT INTO categories (type) VALUES (?1);", params![kind])?;
        Ok(self.conn.last_insert_rowid())
    }

    fn count_categories(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM categories;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative category count `{count}`")))
    }
}

/// Inserts [`DEFAULT_CATEGORIES`] when no category exists yet.
///
/// Returns the number of inserted rows (0 when already seeded).
pub fn seed_default_categories(repo: &impl CategoryRepository) -> RepoResult<usize> {
    if repo.count_categories()? > 0 {
        info!("event=seed_categories module=repo status=skipped reason=already_seeded");
        return Ok(0);
    }

    for kind in DEFAULT_CATEGORIES {
        repo.create_category(kind)?;
    }

    info!(
        "event=seed_categories module=repo status=ok inserted={}",
        DEFAULT_CATEGORIES.len()
    );
    Ok(DEFAULT_CATEGORIES.len())
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    let kind: String = row.get("type")?;
    if kind.is_empty() {
        return Err(RepoError::InvalidData(
            "empty value in categories.type".to_string(),
        ));
    }

    Ok(Category {
        id: row.get("id")?,
        kind,
    })
}
