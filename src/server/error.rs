use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Everything a handler can fail with. Each variant maps to the uniform
/// `{"error_code", "message", "success": false}` envelope, except database
/// errors, which are logged and surface as a bare 500.
#[derive(Debug)]
pub enum ApiError {
    BadRequest,
    NotFound,
    MethodNotAllowed,
    Unprocessable,
    Database(sqlx::Error),
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest => (StatusCode::BAD_REQUEST, "Bad Request"),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Resource Not Found"),
            ApiError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed"),
            ApiError::Unprocessable => (StatusCode::UNPROCESSABLE_ENTITY, "unprocessable"),
            ApiError::Database(error) => {
                tracing::error!("Database error: {error}");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        };
        let envelope = json!({
            "error_code": status.as_u16(),
            "message": message,
            "success": false,
        });
        (status, Json(envelope)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> ApiError {
        ApiError::Database(error)
    }
}
