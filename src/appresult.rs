use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::{json, Value};
use tracing::error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    /// The store is not accepting work; nothing was attempted.
    Unavailable,
    BadRequest {
        message: &'static str,
        error: Option<Value>,
    },
    NotFound,
    MethodNotAllowed,
    Internal(anyhow::Error),
}

impl AppError {
    pub fn bad_request(message: &'static str, error: impl Into<Value>) -> Self {
        Self::BadRequest { message, error: Some(error.into()) }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::Unavailable => json!({ "error": "Service unavailable" }),
            Self::BadRequest { message, error: Some(error) } => json!({ "message": message, "error": error }),
            Self::BadRequest { message, error: None } => json!({ "message": message }),
            Self::NotFound => json!({ "message": "Not found" }),
            Self::MethodNotAllowed => json!({ "message": "Method not allowed" }),
            Self::Internal(err) => {
                error!("unhandled error: {err:?}");
                json!({ "message": "Internal server error", "error": err.to_string() })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn unavailable_uses_error_key() {
        let (status, body) = render(AppError::Unavailable).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, json!({ "error": "Service unavailable" }));
    }

    #[tokio::test]
    async fn bad_request_carries_detail() {
        let (status, body) = render(AppError::bad_request("Invalid request", "boom")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "Invalid request", "error": "boom" }));
    }

    #[tokio::test]
    async fn internal_errors_do_not_leak_backtraces() {
        let err: AppError = anyhow::anyhow!("disk on fire").into();
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "disk on fire");
        assert!(!body.to_string().contains("backtrace"));
    }
}
