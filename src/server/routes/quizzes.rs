use axum::extract::rejection::JsonRejection;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize, Serializer};
use sqlx::SqlitePool;

use crate::db::queries::questions;
use crate::db::Question;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};
use crate::telemetry::QUIZ_QUESTION_CNTR;

#[derive(Deserialize)]
struct QuizBody {
    #[serde(default)]
    previous_questions: Vec<i64>,
    quiz_category: Option<QuizCategory>,
}

#[derive(Deserialize)]
struct QuizCategory {
    id: i64,
}

#[derive(Serialize)]
struct QuizResponse {
    #[serde(serialize_with = "serialize_question_or_false")]
    question: Option<Question>,
}

// Wire contract: an exhausted quiz is `"question": false`, not null.
fn serialize_question_or_false<S>(
    question: &Option<Question>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match question {
        Some(question) => question.serialize(serializer),
        None => serializer.serialize_bool(false),
    }
}

async fn play_quiz(
    State(pool): State<SqlitePool>,
    body: Result<Json<QuizBody>, JsonRejection>,
) -> ApiResult<QuizResponse> {
    let Ok(Json(body)) = body else {
        return Err(ApiError::BadRequest);
    };
    let category = body.quiz_category.ok_or(ApiError::BadRequest)?;

    // Category id 0 means "play across all categories".
    let candidates = if category.id == 0 {
        questions::get_all_questions(&pool).await?
    } else {
        questions::get_questions_for_category(&pool, category.id).await?
    };

    // Deterministic on purpose: always the lowest-id question the client
    // has not seen yet.
    let question = candidates
        .into_iter()
        .find(|q| !body.previous_questions.contains(&q.id));

    if question.is_some() {
        let label = category.id.to_string();
        QUIZ_QUESTION_CNTR.with_label_values(&[label.as_str()]).inc();
    }

    Ok(Json(QuizResponse { question }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(play_quiz))
        .with_state(state)
}
