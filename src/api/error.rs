//! HTTP error mapping
//!
//! Every error leaves the API as `{"error": "..."}`. Service errors are
//! translated here; they were already logged where they happened.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
        FromRequest,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::DomainError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound,
    Internal(String),
}

impl ApiError {
    /// Map a service error, prefixing 500s with what was being attempted
    /// (e.g. "Failed to create item").
    pub fn from_domain(context: &str, err: DomainError) -> Self {
        match err {
            DomainError::NotFound => ApiError::NotFound,
            DomainError::Validation(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(format!("{}: {}", context, other)),
        }
    }

    /// Adapter for `map_err`
    pub fn context(context: &'static str) -> impl Fn(DomainError) -> Self {
        move |err| Self::from_domain(context, err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Item not found".to_string()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

/// `axum::Json` whose rejections use the API error body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_has_fixed_message() {
        let (status, body) = body_of(ApiError::from_domain("Failed to fetch item", DomainError::NotFound)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Item not found");
    }

    #[tokio::test]
    async fn internal_errors_carry_context() {
        let err = ApiError::from_domain(
            "Failed to create item",
            DomainError::Database("FOREIGN KEY constraint failed".to_string()),
        );
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"],
            "Failed to create item: Database error: FOREIGN KEY constraint failed"
        );
    }

    #[tokio::test]
    async fn validation_is_a_bad_request() {
        let err = ApiError::from_domain("Failed to upload file", DomainError::Validation("Uploaded file is empty".into()));
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Uploaded file is empty");
    }
}
