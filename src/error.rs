//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Failure reported by a [`crate::store::TriviaStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store refused the values it was given (type mismatch, constraint violation).
    #[error("rejected by store: {0}")]
    Rejected(String),
    /// Connection, pool or protocol failure; nothing the client can fix.
    #[error("store backend: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            // SQLSTATE class 22 = data exception, 23 = integrity constraint violation.
            let refused = db
                .code()
                .as_deref()
                .map_or(false, |c| c.starts_with("22") || c.starts_with("23"));
            if refused {
                return StoreError::Rejected(db.message().to_string());
            }
        }
        StoreError::Backend(e.to_string())
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("request body exceeds the configured limit")]
    PayloadTooLarge,
    #[error("unprocessable: {0}")]
    Unprocessable(String),
    #[error("internal: {0}")]
    Internal(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Uniform error envelope: `{success: false, error: <status>, message: <fixed text>}`.
#[derive(Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: u16,
    pub message: &'static str,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Store(StoreError::Rejected(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Store(StoreError::Backend(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Fixed client-facing message for each status this API emits.
pub fn status_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "bad request",
        StatusCode::NOT_FOUND => "resource not found",
        StatusCode::METHOD_NOT_ALLOWED => "method not allowed for this request",
        StatusCode::PAYLOAD_TOO_LARGE => "payload too large",
        StatusCode::UNPROCESSABLE_ENTITY => "unprocessable",
        _ => "internal server error",
    }
}

/// Build the error envelope response for a bare status code.
pub fn error_response(status: StatusCode) -> Response {
    let body = ErrorBody {
        success: false,
        error: status.as_u16(),
        message: status_message(status),
    };
    (status, Json(body)).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "request rejected");
        }
        error_response(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn bad_request_envelope() {
        let response = AppError::BadRequest("missing answer".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], 400);
        assert_eq!(body["message"], "bad request");
    }

    #[tokio::test]
    async fn rejected_store_error_is_422() {
        let response = AppError::from(StoreError::Rejected("invalid input syntax".into())).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["message"], "unprocessable");
    }

    #[tokio::test]
    async fn backend_store_error_is_500() {
        let response = AppError::from(StoreError::Backend("pool timed out".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], 500);
        assert_eq!(body["message"], "internal server error");
    }

    #[test]
    fn fixed_messages() {
        assert_eq!(status_message(StatusCode::NOT_FOUND), "resource not found");
        assert_eq!(
            status_message(StatusCode::METHOD_NOT_ALLOWED),
            "method not allowed for this request"
        );
        assert_eq!(status_message(StatusCode::PAYLOAD_TOO_LARGE), "payload too large");
    }

    #[test]
    fn pool_timeout_is_backend() {
        assert!(matches!(StoreError::from(sqlx::Error::PoolTimedOut), StoreError::Backend(_)));
    }
}
