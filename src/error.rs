use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::responses::{ApiResponse, ErrorResponse, ValidationErrorDetail};

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid request: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Machine readable code shared by the REST envelope and GraphQL extensions.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) | AppError::Invalid(_) => "VALIDATION_ERROR",
            _ => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::Invalid(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns true for faults the client cannot fix by changing the request.
    pub fn is_internal(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Message safe to show to a client. Internal faults are not described.
    pub fn public_message(&self) -> String {
        match self {
            AppError::NotFound(msg) | AppError::Validation(msg) => msg.clone(),
            AppError::Invalid(_) => "Request validation failed".to_string(),
            _ => "An internal error occurred".to_string(),
        }
    }

    fn details(&self) -> Option<Vec<ValidationErrorDetail>> {
        let AppError::Invalid(errors) = self else {
            return None;
        };

        let mut details: Vec<ValidationErrorDetail> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| ValidationErrorDetail {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        details.sort_by(|a, b| a.field.cmp(&b.field));
        Some(details)
    }

    /// Builds the REST error envelope for this error.
    pub fn to_error_response(&self) -> ErrorResponse {
        let response = ErrorResponse::new(self.code(), self.public_message());
        match self.details() {
            Some(details) => response.with_details(details),
            None => response,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_internal() {
            tracing::error!(error = %self, "Request failed");
        }

        let status = self.status_code();
        let body = ApiResponse::<()>::error(self.to_error_response());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "currency cannot be blank"))]
        currency: String,
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = AppError::NotFound("Account abc not found".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "NOT_FOUND");
        assert_eq!(err.public_message(), "Account abc not found");
    }

    #[test]
    fn test_internal_errors_hide_their_message() {
        let err = AppError::Internal(anyhow::anyhow!("connection reset"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.is_internal());
        assert_eq!(err.public_message(), "An internal error occurred");
    }

    #[test]
    fn test_validation_errors_carry_field_details() {
        let errors = Probe { currency: String::new() }.validate().unwrap_err();
        let err = AppError::from(errors);

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let response = err.to_error_response();
        assert_eq!(response.code, "VALIDATION_ERROR");
        let details = response.details.unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].field, "currency");
        assert_eq!(details[0].message, "currency cannot be blank");
    }
}
