//! Trivia HTTP routes.
//!
//! Binds methods and paths to the core services. Handlers parse one typed
//! schema, run the service in a unit of work and shape the response.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use log::warn;
use rusqlite::Connection;
use serde::Serialize;
use trivia_core::{
    CategoryId, NewQuestion, PageRequest, QueryService, QuestionId, QuestionService, QuizPick,
    QuizRequest, QuizSelector, SqliteCategoryRepository, SqliteQuestionRepository,
};

use crate::error::ApiError;
use crate::payload::{
    CategoriesResponse, CreateQuestionRequest, CreatedResponse, DeletedResponse,
    ListQuestionsParams, QuestionPageResponse, QuestionsResponse, QuizRequestPayload,
    QuizResponse, SearchRequest,
};
use crate::state::AppState;

type SharedState = Arc<AppState>;

/// Create trivia routes
pub fn trivia_routes(state: SharedState) -> Router {
    Router::new()
        .route("/categories", get(list_categories_handler))
        .route(
            "/categories/:category_id/questions",
            get(questions_by_category_handler),
        )
        .route(
            "/questions",
            get(list_questions_handler).post(create_question_handler),
        )
        .route("/questions/search", post(search_questions_handler))
        .route("/questions/:question_id", delete(delete_question_handler))
        .route("/quizzes", post(quiz_question_handler))
        .with_state(state)
}

/// Health check route
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

fn query_service(
    conn: &Connection,
) -> QueryService<SqliteQuestionRepository<'_>, SqliteCategoryRepository<'_>> {
    QueryService::new(
        SqliteQuestionRepository::new(conn),
        SqliteCategoryRepository::new(conn),
    )
}

/// Path ids that are not integers address nothing.
fn parse_path_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim().parse::<i64>().map_err(|_| ApiError::NotFound)
}

/// Any unreadable body counts as missing parameters.
fn require_body<T>(op: &str, payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            warn!(
                "event=http_request op={} status=rejected error_code=bad_body error={}",
                op,
                rejection.body_text()
            );
            Err(ApiError::BadRequest)
        }
    }
}

async fn list_categories_handler(
    State(state): State<SharedState>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = state
        .run("categories_list", |conn| query_service(conn).list_categories())
        .await?;

    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(CategoriesResponse::new(&categories)))
}

async fn list_questions_handler(
    State(state): State<SharedState>,
    Query(params): Query<ListQuestionsParams>,
) -> Result<Json<QuestionPageResponse>, ApiError> {
    let request = PageRequest::from_raw(params.page.as_deref(), params.limit.as_deref());
    let page = state
        .run("questions_list", move |conn| {
            query_service(conn).list_questions(request)
        })
        .await?;

    if page.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(QuestionPageResponse::from(page)))
}

async fn delete_question_handler(
    State(state): State<SharedState>,
    Path(raw_id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let id: QuestionId = parse_path_id(&raw_id)?;
    let deleted_id = state
        .run("question_delete", move |conn| {
            QuestionService::new(SqliteQuestionRepository::new(conn)).delete_question(id)
        })
        .await?;

    Ok(Json(DeletedResponse {
        success: true,
        deleted_id,
    }))
}

async fn create_question_handler(
    State(state): State<SharedState>,
    payload: Result<Json<CreateQuestionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let input = NewQuestion::from(require_body("question_create", payload)?);
    let question_id = state
        .run("question_create", move |conn| {
            QuestionService::new(SqliteQuestionRepository::new(conn)).create_question(&input)
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            success: true,
            question_id,
        }),
    ))
}

async fn search_questions_handler(
    State(state): State<SharedState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<QuestionsResponse>, ApiError> {
    let request = require_body("questions_search", payload)?;
    let questions = state
        .run("questions_search", move |conn| {
            query_service(conn).search_questions(request.search_term.as_deref())
        })
        .await?;

    Ok(Json(QuestionsResponse::new(questions)))
}

async fn questions_by_category_handler(
    State(state): State<SharedState>,
    Path(raw_id): Path<String>,
) -> Result<Json<QuestionsResponse>, ApiError> {
    let category: CategoryId = parse_path_id(&raw_id)?;
    let questions = state
        .run("questions_by_category", move |conn| {
            query_service(conn).questions_by_category(category)
        })
        .await?;

    Ok(Json(QuestionsResponse::new(questions)))
}

async fn quiz_question_handler(
    State(state): State<SharedState>,
    payload: Result<Json<QuizRequestPayload>, JsonRejection>,
) -> Result<Json<QuizResponse>, ApiError> {
    let request = QuizRequest::from(require_body("quiz_select", payload)?);
    let pick = state
        .run("quiz_select", move |conn| {
            QuizSelector::new(SqliteQuestionRepository::new(conn)).next_question(&request)
        })
        .await?;

    match pick {
        QuizPick::Next(question) => Ok(Json(QuizResponse {
            success: true,
            question,
        })),
        QuizPick::Exhausted => Err(ApiError::NotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_integer_path_ids_are_not_found() {
        assert_eq!(parse_path_id("1xx"), Err(ApiError::NotFound));
        assert_eq!(parse_path_id("12"), Ok(12));
    }

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
    }
}
