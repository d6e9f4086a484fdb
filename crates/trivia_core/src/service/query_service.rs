//! Read-only query use-cases.
//!
//! # Responsibility
//! - Category listing, paginated question listing, substring search and
//!   category-scoped listing.
//!
//! # Invariants
//! - Pages are 1-indexed; `offset = (page - 1) * limit`.
//! - `total_questions` is the unwindowed count.
//! - A window past the end is an empty page, never an error.
//! - Nothing is mutated.

use crate::model::category::{Category, CategoryId};
use crate::model::question::Question;
use crate::repo::category_repo::CategoryRepository;
use crate::repo::question_repo::{QuestionListQuery, QuestionRepository};
use crate::search::term::SearchTerm;
use crate::service::ServiceResult;
use log::debug;

/// Page size used when the caller omits or garbles `limit`.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
/// Page used when the caller omits or garbles `page`.
pub const DEFAULT_PAGE: u32 = 1;

/// Normalized pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl PageRequest {
    /// Builds a window, replacing zero values with the defaults.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            limit: if limit == 0 { DEFAULT_PAGE_LIMIT } else { limit },
        }
    }

    /// Parses raw query-string values.
    ///
    /// Anything that is not a positive integer falls back to the default
    /// instead of failing the request.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self::new(parse_positive(page), parse_positive(limit))
    }

    /// Rows skipped before the window starts.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)).saturating_mul(u64::from(self.limit))
    }
}

fn parse_positive(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .unwrap_or(0)
}

/// One page of questions plus the listing context callers render with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPage {
    /// Window items in `id ASC` order.
    pub questions: Vec<Question>,
    /// Full category listing in `type ASC` order.
    pub categories: Vec<Category>,
    /// Count of all questions, independent of the window.
    pub total_questions: u64,
    /// Effective page after defaulting.
    pub page: u32,
    /// Effective limit after defaulting.
    pub limit: u32,
}

impl QuestionPage {
    /// Whether the window fell past the end of the table.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Query service facade over question and category repositories.
pub struct QueryService<Q: QuestionRepository, C: CategoryRepository> {
    questions: Q,
    categories: C,
}

impl<Q: QuestionRepository, C: CategoryRepository> QueryService<Q, C> {
    pub fn new(questions: Q, categories: C) -> Self {
        Self {
            questions,
            categories,
        }
    }

    /// Lists all categories ordered by type. Empty is a valid result.
    pub fn list_categories(&self) -> ServiceResult<Vec<Category>> {
        Ok(self.categories.list_categories()?)
    }

    /// Lists one page of questions ordered by identifier.
    pub fn list_questions(&self, request: PageRequest) -> ServiceResult<QuestionPage> {
        let total_questions = self.questions.count_questions()?;
        let query = QuestionListQuery {
            limit: Some(request.limit),
            offset: request.offset(),
            ..QuestionListQuery::default()
        };
        let questions = self.questions.list_questions(&query)?;
        let categories = self.categories.list_categories()?;

        debug!(
            "event=questions_list module=service status=ok page={} limit={} returned={} total={}",
            request.page,
            request.limit,
            questions.len(),
            total_questions
        );

        Ok(QuestionPage {
            questions,
            categories,
            total_questions,
            page: request.page,
            limit: request.limit,
        })
    }

    /// Case-insensitive substring search over question text.
    ///
    /// An absent or empty term is a validation failure, distinct from an
    /// empty match list.
    pub fn search_questions(&self, raw_term: Option<&str>) -> ServiceResult<Vec<Question>> {
        let term = SearchTerm::parse(raw_term)?;
        let hits = self.questions.search_questions(&term)?;
        debug!(
            "event=questions_search module=service status=ok hits={}",
            hits.len()
        );
        Ok(hits)
    }

    /// Lists questions of one category. Unknown categories yield nothing.
    pub fn questions_by_category(&self, category: CategoryId) -> ServiceResult<Vec<Question>> {
        let query = QuestionListQuery {
            category: Some(category),
            ..QuestionListQuery::default()
        };
        Ok(self.questions.list_questions(&query)?)
    }
}

#[cfg(test)]
mod tests {
    use super::{PageRequest, DEFAULT_PAGE, DEFAULT_PAGE_LIMIT};

    #[test]
    fn from_raw_uses_defaults_when_absent() {
        assert_eq!(PageRequest::from_raw(None, None), PageRequest::default());
    }

    #[test]
    fn from_raw_falls_back_on_unparseable_values() {
        let request = PageRequest::from_raw(Some("abc"), Some("-3"));
        assert_eq!(request.page, DEFAULT_PAGE);
        assert_eq!(request.limit, DEFAULT_PAGE_LIMIT);

        let zero = PageRequest::from_raw(Some("0"), Some("0"));
        assert_eq!(zero, PageRequest::default());
    }

    #[test]
    fn from_raw_keeps_valid_values() {
        let request = PageRequest::from_raw(Some(" 3 "), Some("5"));
        assert_eq!(request, PageRequest { page: 3, limit: 5 });
        assert_eq!(request.offset(), 10);
    }

    #[test]
    fn offset_is_zero_on_first_page_and_never_overflows() {
        assert_eq!(PageRequest::new(1, 10).offset(), 0);
        let huge = PageRequest::new(u32::MAX, u32::MAX);
        assert_eq!(
            huge.offset(),
            u64::from(u32::MAX - 1) * u64::from(u32::MAX)
        );
    }
}
