use axum::extract::rejection::JsonRejection;
use axum::{
    extract::{Path, Query, State},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::db::queries::categories::get_category_map;
use crate::db::queries::questions;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};

use super::{paginate, PageQuery, QuestionsResponse};

/// Body of `POST /questions`, which overloads one endpoint for search and
/// creation. Clients are known to send `difficulty`/`category` as numeric
/// strings, so both spellings are accepted.
#[derive(Deserialize, Default)]
struct QuestionsBody {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
    question: Option<String>,
    answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
}

impl QuestionsBody {
    fn is_search(&self) -> bool {
        self.search_term.as_deref().is_some_and(|term| !term.is_empty())
    }

    fn is_create(&self) -> bool {
        self.search_term.is_some()
            || self.question.is_some()
            || self.answer.is_some()
            || self.difficulty.is_some()
            || self.category.is_some()
    }
}

#[derive(Serialize)]
struct DeleteResponse {
    success: bool,
    deleted: i64,
}

async fn retrieve_questions(
    State(pool): State<SqlitePool>,
    Query(PageQuery { page }): Query<PageQuery>,
    body: Result<Json<QuestionsBody>, JsonRejection>,
) -> ApiResult<QuestionsResponse> {
    // A request without a JSON body (every GET, and the odd bodyless POST)
    // is a plain listing. A body that fails to parse is the client's fault.
    let body = match body {
        Ok(Json(body)) => body,
        Err(JsonRejection::MissingJsonContentType(_)) => QuestionsBody::default(),
        Err(_) => return Err(ApiError::BadRequest),
    };

    let questions = if body.is_search() {
        let term = body.search_term.as_deref().unwrap_or_default();
        questions::search_questions(&pool, term).await?
    } else if body.is_create() {
        create_question(&pool, &body).await?;
        questions::get_all_questions(&pool).await?
    } else {
        questions::get_all_questions(&pool).await?
    };

    let total_questions = questions.len();

    Ok(Json(QuestionsResponse {
        questions: paginate(page, questions),
        total_questions,
        categories: get_category_map(&pool).await?,
        current_category: "All".to_owned(),
    }))
}

async fn create_question(pool: &SqlitePool, body: &QuestionsBody) -> Result<i64, ApiError> {
    let question = body.question.as_deref().filter(|q| !q.is_empty());
    let answer = body.answer.as_deref().filter(|a| !a.is_empty());
    // Zero is rejected along with absent values; every field must be
    // present and non-falsy.
    let difficulty = body.difficulty.filter(|&d| d != 0);
    let category = body.category.filter(|&c| c != 0);

    match (question, answer, difficulty, category) {
        (Some(question), Some(answer), Some(difficulty), Some(category)) => {
            let id =
                questions::create_question(pool, question, answer, category, difficulty).await?;
            tracing::info!("Created question {id}");
            Ok(id)
        }
        _ => Err(ApiError::BadRequest),
    }
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    Path(question_id): Path<i64>,
) -> ApiResult<DeleteResponse> {
    questions::get_question_by_id(&pool, question_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    questions::delete_question(&pool, question_id).await?;

    Ok(Json(DeleteResponse {
        success: true,
        deleted: question_id,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/questions",
            get(retrieve_questions).post(retrieve_questions),
        )
        .route("/questions/{question_id}", delete(delete_question))
        .with_state(state)
}
