//! HTTP error mapping.
//!
//! Handlers fail with an [`ApiFailure`]: the [`ApiError`] plus the request
//! path and time captured by [`ErrorContext`]. It renders as the shared
//! [`ErrorResponse`] envelope.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use herodex_shared::{ErrorResponse, FieldErrorData};

use crate::app::App;
use crate::use_cases::management::HeroError;

const INTERNAL_MESSAGE: &str = "An unexpected error occurred";

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Conflict(String),
    BadRequest {
        message: String,
        field_errors: Vec<FieldErrorData>,
    },
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            field_errors: Vec::new(),
        }
    }

    /// Echo each rejected field's value from the request body.
    pub fn with_rejected_values(mut self, body: &serde_json::Value) -> Self {
        if let Self::BadRequest { field_errors, .. } = &mut self {
            for field_error in field_errors.iter_mut() {
                field_error.rejected_value = body
                    .get(field_error.field.as_str())
                    .filter(|v| !v.is_null())
                    .cloned();
            }
        }
        self
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "Resource not found",
            Self::Conflict(_) => "Duplicate hero name",
            Self::BadRequest { .. } => "Invalid data",
            Self::Internal(_) => "Internal server error",
        }
    }
}

impl From<HeroError> for ApiError {
    fn from(e: HeroError) -> Self {
        match e {
            HeroError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            HeroError::Conflict { .. } => ApiError::Conflict(e.to_string()),
            HeroError::InvalidInput(violations) => ApiError::BadRequest {
                message: "One or more fields are invalid".to_string(),
                field_errors: violations
                    .iter()
                    .map(|v| FieldErrorData {
                        field: v.field_name().to_string(),
                        message: v.to_string(),
                        rejected_value: None,
                    })
                    .collect(),
            },
            HeroError::Store(repo) => ApiError::Internal(repo.to_string()),
        }
    }
}

/// Request details stamped onto error bodies.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    path: String,
    timestamp: DateTime<Utc>,
}

impl ErrorContext {
    pub fn fail(&self, error: impl Into<ApiError>) -> ApiFailure {
        ApiFailure {
            error: error.into(),
            context: self.clone(),
        }
    }
}

impl FromRequestParts<Arc<App>> for ErrorContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<App>,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self {
            path: parts.uri.path().to_string(),
            timestamp: state.clock.now(),
        })
    }
}

#[derive(Debug)]
pub struct ApiFailure {
    error: ApiError,
    context: ErrorContext,
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = self.error.status();
        let label = self.error.label();
        let path = self.context.path;

        let (message, field_errors) = match self.error {
            ApiError::NotFound(msg) | ApiError::Conflict(msg) => (msg, None),
            ApiError::BadRequest {
                message,
                field_errors,
            } => {
                let field_errors = (!field_errors.is_empty()).then_some(field_errors);
                (message, field_errors)
            }
            ApiError::Internal(detail) => {
                tracing::error!(path = %path, error = %detail, "Request failed");
                (INTERNAL_MESSAGE.to_string(), None)
            }
        };

        let body = ErrorResponse {
            status: status.as_u16(),
            error: label.to_string(),
            message,
            path,
            timestamp: self.context.timestamp,
            field_errors,
        };
        (status, Json(body)).into_response()
    }
}
