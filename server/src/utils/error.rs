use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::models::EventFormView;
use crate::store::StoreError;
use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Form validation failed")]
    InvalidForm(Box<EventFormView>),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database error")]
    DatabaseError(#[from] StoreError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidForm(_) => StatusCode::BAD_REQUEST,
            AppError::AuthError(_) => StatusCode::UNAUTHORIZED,
            // Missing events are reported as 400 on every event route.
            AppError::NotFound(_) => StatusCode::BAD_REQUEST,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::InvalidForm(_) => "VALIDATION_ERROR",
            AppError::AuthError(_) => "AUTH_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::BadRequest(msg) | AppError::AuthError(msg) | AppError::NotFound(msg) => {
                warn!(code = self.code(), message = %msg, "Request rejected");
            }
            AppError::InvalidForm(form) => {
                warn!(fields = ?form.errors.fields(), "Event form rejected");
            }
            AppError::DatabaseError(e) => {
                error!(error = ?e, "Database error");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        self.log();

        // Only expose high-level message to the client
        let (public_message, details) = match self {
            AppError::BadRequest(msg) | AppError::AuthError(msg) | AppError::NotFound(msg) => {
                (msg, None)
            }
            AppError::InvalidForm(form) => (
                "The submitted form is invalid".to_string(),
                serde_json::to_value(&*form).ok(),
            ),
            AppError::DatabaseError(_) => ("A database error occurred".to_string(), None),
        };

        error_response(code, public_message, details, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldErrors, TypeOption};

    #[test]
    fn test_status_codes_follow_route_table() {
        assert_eq!(
            AppError::NotFound("missing".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::AuthError("not yours".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::BadRequest("duplicate".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::NotFound("missing".into()).code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_invalid_form_carries_form_in_details() {
        let mut errors = FieldErrors::default();
        errors.add("start", "Invalid start date: dd.MM.yyyy HH:mm");
        let mut form = EventFormView::empty(vec![TypeOption {
            id: 1,
            name: "Animals".to_string(),
        }]);
        form.errors = errors;

        let response = AppError::InvalidForm(Box::new(form)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(json["error"]["details"]["types"][0]["name"], "Animals");
        assert_eq!(
            json["error"]["details"]["errors"]["start"][0],
            "Invalid start date: dd.MM.yyyy HH:mm"
        );
    }
}
