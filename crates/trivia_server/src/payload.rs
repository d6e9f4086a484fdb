//! Request schemas and response envelopes.
//!
//! # Responsibility
//! - Give every endpoint one typed request shape with explicit optionality.
//! - Shape core results into the public JSON contract.
//!
//! # Invariants
//! - Integer ids accept JSON numbers or numeric strings; anything else is a
//!   deserialization failure, reported as a bad request.
//! - Categories serialize as an `{id: type}` object in listing order.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use trivia_core::{
    Category, CategoryId, NewQuestion, Question, QuestionId, QuestionPage, QuizRequest,
};

#[derive(Deserialize)]
#[serde(untagged)]
enum IdValue {
    Int(i64),
    Text(String),
}

impl IdValue {
    fn into_id<E: serde::de::Error>(self) -> Result<Option<i64>, E> {
        match self {
            Self::Int(value) => Ok(Some(value)),
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed
                    .parse::<i64>()
                    .map(Some)
                    .map_err(|_| E::custom(format!("`{trimmed}` is not an integer id")))
            }
        }
    }
}

/// `null`, absent and `""` map to `None`.
fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IdValue>::deserialize(deserializer)? {
        Some(value) => value.into_id(),
        None => Ok(None),
    }
}

fn deserialize_required_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    IdValue::deserialize(deserializer)?
        .into_id::<D::Error>()?
        .ok_or_else(|| D::Error::custom("id must not be empty"))
}

fn deserialize_id_list<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<IdValue>>::deserialize(deserializer)?.unwrap_or_default();
    let mut ids = Vec::with_capacity(values.len());
    for value in values {
        if let Some(id) = value.into_id::<D::Error>()? {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Query string of `GET /questions`. Values stay raw so the core can apply
/// its fallback-to-default parsing.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuestionsParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Body of `POST /questions`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateQuestionRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub category: Option<CategoryId>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub difficulty: Option<i64>,
}

impl From<CreateQuestionRequest> for NewQuestion {
    fn from(value: CreateQuestionRequest) -> Self {
        Self {
            question: value.question,
            answer: value.answer,
            category: value.category,
            difficulty: value.difficulty,
        }
    }
}

/// Body of `POST /questions/search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm", default)]
    pub search_term: Option<String>,
}

/// Category selector sent by quiz clients. `id == 0` means all categories.
///
/// Clients also echo the display label as `type`; it plays no part in
/// selection and is skipped.
#[derive(Debug, Deserialize)]
pub struct QuizCategoryPayload {
    #[serde(deserialize_with = "deserialize_required_id")]
    pub id: CategoryId,
}

/// Body of `POST /quizzes`.
#[derive(Debug, Default, Deserialize)]
pub struct QuizRequestPayload {
    #[serde(default, deserialize_with = "deserialize_id_list")]
    pub previous_questions: Vec<QuestionId>,
    #[serde(default)]
    pub quiz_category: Option<QuizCategoryPayload>,
}

impl From<QuizRequestPayload> for QuizRequest {
    fn from(value: QuizRequestPayload) -> Self {
        Self {
            quiz_category: value.quiz_category.map(|category| category.id),
            previous_questions: value.previous_questions.into_iter().collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: Map<String, Value>,
}

impl CategoriesResponse {
    pub fn new(categories: &[Category]) -> Self {
        Self {
            success: true,
            categories: category_map(categories),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuestionPageResponse {
    pub success: bool,
    pub categories: Map<String, Value>,
    pub questions: Vec<Question>,
    pub total_questions: u64,
    pub selected_page: u32,
}

impl From<QuestionPage> for QuestionPageResponse {
    fn from(page: QuestionPage) -> Self {
        Self {
            success: true,
            categories: category_map(&page.categories),
            questions: page.questions,
            total_questions: page.total_questions,
            selected_page: page.page,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
}

impl QuestionsResponse {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            success: true,
            questions,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub question_id: QuestionId,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted_id: QuestionId,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Question,
}

fn category_map(categories: &[Category]) -> Map<String, Value> {
    categories
        .iter()
        .map(|category| {
            (
                category.id.to_string(),
                Value::String(category.kind.clone()),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_request_accepts_numeric_strings() {
        let request: CreateQuestionRequest = serde_json::from_value(json!({
            "question": "q",
            "answer": "a",
            "category": "4",
            "difficulty": 2
        }))
        .unwrap();
        let input = NewQuestion::from(request);
        assert_eq!(input.category, Some(4));
        assert_eq!(input.difficulty, Some(2));
    }

    #[test]
    fn create_request_treats_empty_category_as_absent() {
        let request: CreateQuestionRequest =
            serde_json::from_value(json!({"question": "q", "answer": "a", "category": ""}))
                .unwrap();
        assert_eq!(request.category, None);
    }

    #[test]
    fn create_request_rejects_non_numeric_category() {
        let result = serde_json::from_value::<CreateQuestionRequest>(json!({"category": "art"}));
        assert!(result.is_err());
    }

    #[test]
    fn quiz_payload_defaults_and_string_ids() {
        let payload: QuizRequestPayload = serde_json::from_value(json!({
            "quiz_category": {"type": "Science", "id": "1"},
            "previous_questions": [5, "7"]
        }))
        .unwrap();
        let request = QuizRequest::from(payload);
        assert_eq!(request.quiz_category, Some(1));
        assert_eq!(
            request.previous_questions.into_iter().collect::<Vec<_>>(),
            vec![5, 7]
        );

        let bare: QuizRequestPayload = serde_json::from_value(json!({})).unwrap();
        assert!(bare.quiz_category.is_none());
        assert!(bare.previous_questions.is_empty());
    }

    #[test]
    fn quiz_category_without_id_is_rejected() {
        let result =
            serde_json::from_value::<QuizRequestPayload>(json!({"quiz_category": {"type": "x"}}));
        assert!(result.is_err());
    }

    #[test]
    fn categories_keep_listing_order() {
        let response = CategoriesResponse::new(&[
            Category::new(2, "Art"),
            Category::new(1, "Science"),
        ]);
        let text = serde_json::to_string(&response).unwrap();
        assert_eq!(
            text,
            r#"{"success":true,"categories":{"2":"Art","1":"Science"}}"#
        );
    }
}
