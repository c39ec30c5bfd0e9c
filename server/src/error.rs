use std::process::{ExitCode, Termination};

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use error_stack::Report;
use kernel::KernelError;
use serde_json::json;

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

impl ErrorStatus {
    pub fn status_code(&self) -> StatusCode {
        match self.0.current_context() {
            KernelError::NotFound => StatusCode::NOT_FOUND,
            KernelError::InvalidRange
            | KernelError::Unavailable
            | KernelError::WrongState
            | KernelError::TooEarly
            | KernelError::Validation => StatusCode::BAD_REQUEST,
            KernelError::Unauthorized => StatusCode::FORBIDDEN,
            KernelError::Conflict | KernelError::Concurrency => StatusCode::CONFLICT,
            KernelError::Timeout => StatusCode::REQUEST_TIMEOUT,
            KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
        } else {
            tracing::debug!("{:?}", self.0);
        }
        let body = json!({ "error": self.0.current_context().to_string() });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod test {
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use error_stack::Report;
    use kernel::KernelError;

    use super::ErrorStatus;

    #[test]
    fn maps_every_kind() {
        let cases = [
            (KernelError::NotFound, StatusCode::NOT_FOUND),
            (KernelError::InvalidRange, StatusCode::BAD_REQUEST),
            (KernelError::Unavailable, StatusCode::BAD_REQUEST),
            (KernelError::WrongState, StatusCode::BAD_REQUEST),
            (KernelError::TooEarly, StatusCode::BAD_REQUEST),
            (KernelError::Validation, StatusCode::BAD_REQUEST),
            (KernelError::Unauthorized, StatusCode::FORBIDDEN),
            (KernelError::Conflict, StatusCode::CONFLICT),
            (KernelError::Concurrency, StatusCode::CONFLICT),
            (KernelError::Timeout, StatusCode::REQUEST_TIMEOUT),
            (KernelError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (kind, status) in cases {
            assert_eq!(ErrorStatus::from(Report::new(kind)).status_code(), status);
        }
    }

    #[tokio::test]
    async fn body_carries_message() {
        let response = ErrorStatus::from(Report::new(KernelError::WrongState)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], KernelError::WrongState.to_string());
    }
}
