use std::borrow::Cow;
use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use serde::Serialize;
use validator::ValidationErrors;

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug)]
pub enum AppError {
    ValidationError(Vec<FieldError>),
    NotFound(String),
    Conflict(String),
    InvalidInput(String),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => {
                let messages = errors.iter()
                    .map(|e| format!("{}:{}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation error: {}", messages)
            }
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal server error: {}", msg)
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::ValidationError(errors) => {
                serde_json::json!({
                    "error": "Validation failed",
                    "details": errors
                })
            }
            // Storage details stay in the logs
            AppError::InternalError(msg) => {
                tracing::error!("Request failed: {}", msg);
                serde_json::json!({"error": "Internal server error"})
            }
            _ => {
                serde_json::json!({"error": self.to_string()})
            }
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();

        field_errors.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::ValidationError(field_errors)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(e) if e.code() == Some(Cow::Borrowed(UNIQUE_VIOLATION)) => {
                AppError::Conflict(unique_violation_message(e.constraint()))
            }
            _ => AppError::InternalError(format!("Database error: {}", err))
        }
    }
}

/// Maps the constraint names declared in the migrations to caller-facing messages.
fn unique_violation_message(constraint: Option<&str>) -> String {
    match constraint {
        Some("projects_slug_key") => "Slug already exists".into(),
        Some("about_singleton_key") => "About content already exists".into(),
        Some("contact_singleton_key") => "Contact details already exist".into(),
        _ => "Database conflict occurred".into(),
    }
}

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn validation_errors_become_sorted_field_errors() {
        let mut errors = ValidationErrors::new();
        let mut title = ValidationError::new("length");
        title.message = Some("Title cannot be empty".into());
        errors.add("title", title);
        errors.add("description", ValidationError::new("length"));

        let AppError::ValidationError(fields) = AppError::from(errors) else {
            panic!("expected a validation error");
        };

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field, "description");
        assert_eq!(fields[0].message, "Invalid value");
        assert_eq!(fields[1].field, "title");
        assert_eq!(fields[1].message, "Title cannot be empty");
    }

    #[test]
    fn status_codes_follow_the_error_kind() {
        assert_eq!(AppError::NotFound("project".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Conflict("slug".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::InvalidInput("id".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InternalError("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unique_violations_name_the_offending_constraint() {
        assert_eq!(unique_violation_message(Some("projects_slug_key")), "Slug already exists");
        assert_eq!(unique_violation_message(None), "Database conflict occurred");
    }

    #[test]
    fn non_database_sqlx_errors_are_internal() {
        let err = AppError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, AppError::InternalError(_)));
    }
}
