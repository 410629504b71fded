use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pledgewall_core::errors::Error as CoreError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

/// Shown when an insert fails. The client decides whether to submit again.
pub const SUBMISSION_FAILED_MESSAGE: &str =
    "We could not record your pledge. Please try submitting again.";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Core(e) => match e {
                CoreError::Validation(inner) => (StatusCode::BAD_REQUEST, inner.to_string()),
                CoreError::Submission(_) => {
                    (StatusCode::BAD_GATEWAY, SUBMISSION_FAILED_MESSAGE.to_string())
                }
                CoreError::Fetch(_) | CoreError::Repository(_) => {
                    (StatusCode::SERVICE_UNAVAILABLE, e.to_string())
                }
                CoreError::Unexpected(_) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            },
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
        };
        if status.is_server_error() {
            tracing::error!("Request failed ({}): {}", status, self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pledgewall_core::errors::ValidationError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ApiError::from(CoreError::from(ValidationError::NoCommitments)),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(CoreError::Submission("timeout".into())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ApiError::from(CoreError::Fetch("timeout".into())),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ApiError::BadRequest("bad limit".into()),
                StatusCode::BAD_REQUEST,
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
