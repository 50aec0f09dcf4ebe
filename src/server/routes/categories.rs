use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::BTreeMap;

use crate::db::queries::categories::{get_category, get_category_map};
use crate::db::queries::questions::get_questions_for_category;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};

use super::{paginate, PageQuery, QuestionsResponse};

#[derive(Serialize)]
struct CategoriesResponse {
    categories: BTreeMap<i64, String>,
}

async fn retrieve_categories(State(pool): State<SqlitePool>) -> ApiResult<CategoriesResponse> {
    let categories = get_category_map(&pool).await?;
    Ok(Json(CategoriesResponse { categories }))
}

async fn retrieve_category_questions(
    State(pool): State<SqlitePool>,
    Path(category_id): Path<i64>,
    Query(PageQuery { page }): Query<PageQuery>,
) -> ApiResult<QuestionsResponse> {
    // Unknown category ids get a clean 404 instead of leaking a lookup
    // failure out of the response assembly.
    let category = get_category(&pool, category_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let questions = get_questions_for_category(&pool, category_id).await?;
    let total_questions = questions.len();

    Ok(Json(QuestionsResponse {
        questions: paginate(page, questions),
        total_questions,
        categories: get_category_map(&pool).await?,
        current_category: category.kind,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(retrieve_categories))
        .route(
            "/categories/{category_id}/questions",
            get(retrieve_category_questions),
        )
        .with_state(state)
}
