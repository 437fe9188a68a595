//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and the single place where a
//! failed request is turned into a client response. The `AppError` enum is the error type
//! every handler returns; its `IntoResponse` implementation normalizes any variant into the
//! JSON error envelope, so no handler builds error bodies itself.

pub mod config;
pub mod operational;
pub mod startup;

use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::{ErrorEnvelopeDto, RawErrorDto},
    server::error::{
        config::ConfigError,
        operational::{ErrorStatus, OperationalError},
    },
};

/// Top-level application error type.
///
/// `Operational` carries anticipated failures classified by the code that raised them.
/// Request body rejections carry their own HTTP status from axum. Every other variant is an
/// unanticipated defect and is reported as a 500.
#[derive(Error, Debug)]
pub enum AppError {
    /// Anticipated failure with an explicit status code.
    #[error(transparent)]
    Operational(#[from] OperationalError),

    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// JSON request body could not be parsed.
    ///
    /// Reported with the rejection's own status (400, 413, 415 or 422).
    #[error(transparent)]
    JsonRejection(#[from] JsonRejection),

    /// URL-encoded request body could not be parsed.
    #[error(transparent)]
    FormRejection(#[from] FormRejection),

    /// Internal server error with custom message.
    #[error("{0}")]
    InternalError(String),
}

impl AppError {
    /// Raises an anticipated failure with an arbitrary status code.
    #[track_caller]
    pub fn operational(message: impl Into<String>, status_code: u16) -> Self {
        Self::Operational(OperationalError::new(message, status_code))
    }

    /// Raises a 400 Bad Request failure.
    #[track_caller]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Operational(OperationalError::new(message, 400))
    }

    /// Raises a 401 Unauthorized failure.
    #[track_caller]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Operational(OperationalError::new(message, 401))
    }

    /// Raises a 403 Forbidden failure.
    #[track_caller]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Operational(OperationalError::new(message, 403))
    }

    /// Raises a 404 Not Found failure.
    #[track_caller]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::Operational(OperationalError::new(message, 404))
    }

    /// Raises a 409 Conflict failure.
    #[track_caller]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Operational(OperationalError::new(message, 409))
    }

    /// Reduces the error to the fields reported to the client.
    fn normalize(&self) -> NormalizedError {
        match self {
            Self::Operational(err) => NormalizedError {
                status_code: err.status_code(),
                status: err.status(),
                message: err.message().to_string(),
                is_operational: err.is_operational(),
            },
            Self::JsonRejection(rejection) => {
                NormalizedError::rejected(rejection.status(), rejection.body_text())
            }
            Self::FormRejection(rejection) => {
                NormalizedError::rejected(rejection.status(), rejection.body_text())
            }
            Self::ConfigErr(_) | Self::DbErr(_) | Self::SchedulerErr(_) | Self::InternalError(_) => {
                NormalizedError::unclassified(self.to_string())
            }
        }
    }
}

/// Client-facing view of an error.
struct NormalizedError {
    status_code: u16,
    status: ErrorStatus,
    message: String,
    is_operational: bool,
}

impl NormalizedError {
    /// Error raised outside handler code that still knows its HTTP status.
    fn rejected(status: StatusCode, message: String) -> Self {
        Self {
            status_code: status.as_u16(),
            status: ErrorStatus::from_status_code(status.as_u16()),
            message,
            is_operational: false,
        }
    }

    /// Error that carries no classification; treated as a server fault.
    fn unclassified(message: String) -> Self {
        Self {
            status_code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            status: ErrorStatus::Error,
            message,
            is_operational: false,
        }
    }

    fn http_status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn into_dto(self) -> ErrorEnvelopeDto {
        ErrorEnvelopeDto {
            status: self.status.to_string(),
            message: self.message,
            error: RawErrorDto {
                status_code: self.status_code,
                status: self.status.to_string(),
                is_operational: self.is_operational,
            },
        }
    }
}

/// Converts application errors into HTTP responses.
///
/// Logs the full error, including the raise site and backtrace of operational errors, then
/// answers with the error's own status code, or 500 when the error carries none.
///
/// # Returns
/// - 4xx/5xx from `OperationalError::status_code` - For `Operational`
/// - Rejection status - For `JsonRejection` and `FormRejection`
/// - 500 Internal Server Error - For all other error types (DbErr, SchedulerErr, etc.)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let normalized = self.normalize();

        match &self {
            Self::Operational(err) => tracing::error!(
                status_code = err.status_code(),
                status = %err.status(),
                location = %err.location(),
                backtrace = %err.backtrace(),
                "ERROR: {:?}",
                err
            ),
            err => tracing::error!(
                status_code = normalized.status_code,
                status = %normalized.status,
                "ERROR: {:?}",
                err
            ),
        }

        (normalized.http_status(), Json(normalized.into_dto())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::response::body_json;

    /// Tests an operational 404 keeps its status and is classified as a failure.
    ///
    /// Expected: 404 response with `status: "fail"` and the raised message
    #[tokio::test]
    async fn not_found_maps_to_404_fail() {
        let response = AppError::not_found("Document not found").into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await.unwrap();
        assert_eq!(body["status"], "fail");
        assert_eq!(body["message"], "Document not found");
        assert_eq!(body["error"]["statusCode"], 404);
        assert_eq!(body["error"]["status"], "fail");
        assert_eq!(body["error"]["isOperational"], true);
    }

    /// Tests an operational server error is classified as an error.
    ///
    /// Expected: 503 response with `status: "error"`
    #[tokio::test]
    async fn operational_5xx_is_error() {
        let response = AppError::operational("Mail relay unavailable", 503).into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await.unwrap();
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Mail relay unavailable");
    }

    /// Tests an error without a status code defaults to 500.
    ///
    /// Expected: 500 response with `status: "error"` and the error's own message
    #[tokio::test]
    async fn unclassified_error_defaults_to_500() {
        let err = AppError::DbErr(sea_orm::DbErr::Custom("relation \"users\" missing".into()));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await.unwrap();
        assert_eq!(body["status"], "error");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("relation \"users\" missing"));
        assert_eq!(body["error"]["statusCode"], 500);
        assert_eq!(body["error"]["isOperational"], false);
    }

    #[tokio::test]
    async fn internal_error_keeps_message() {
        let response = AppError::InternalError("lock poisoned".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await.unwrap();
        assert_eq!(body["message"], "lock poisoned");
        assert_eq!(body["error"]["isOperational"], false);
    }

    /// Tests a status code outside the HTTP range still yields a response.
    ///
    /// Expected: 500 response, body keeps the raised code and its classification
    #[tokio::test]
    async fn invalid_status_code_responds_500() {
        let response = AppError::operational("weird", 42).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await.unwrap();
        assert_eq!(body["status"], "error");
        assert_eq!(body["error"]["statusCode"], 42);
    }

    #[test]
    fn convenience_constructors_use_expected_codes() {
        let cases = [
            (AppError::bad_request("x"), 400),
            (AppError::unauthorized("x"), 401),
            (AppError::forbidden("x"), 403),
            (AppError::not_found("x"), 404),
            (AppError::conflict("x"), 409),
        ];

        for (err, code) in cases {
            match err {
                AppError::Operational(op) => {
                    assert_eq!(op.status_code(), code);
                    assert_eq!(op.status(), ErrorStatus::Fail);
                    assert_eq!(op.location().file(), file!());
                }
                other => panic!("expected operational error, got {other:?}"),
            }
        }
    }
}
