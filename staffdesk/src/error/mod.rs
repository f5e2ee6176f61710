use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Serializable view of an [`AppError`] for machine-readable output.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("{0}")]
    AlreadyRecorded(String),
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("{0}")]
    Ineligible(String),
    #[error("{0}")]
    AlreadySubmitted(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Storage(#[source] anyhow::Error),
}

impl AppError {
    /// Stable identifier for the failure class.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::AlreadyRecorded(_) => "ALREADY_RECORDED",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Ineligible(_) => "INELIGIBLE",
            AppError::AlreadySubmitted(_) => "ALREADY_SUBMITTED",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Storage(_) => "STORAGE_ERROR",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let (error, details) = match self {
            AppError::Validation(errors) => (
                "Validation failed".to_string(),
                Some(serde_json::json!({ "errors": errors })),
            ),
            AppError::Storage(err) => {
                tracing::error!("Storage error: {:?}", err);
                ("Storage error".to_string(), None)
            }
            other => (other.to_string(), None),
        };

        ErrorResponse {
            error,
            code: self.code().to_string(),
            details,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Storage(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Storage(err.into())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.into())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .errors()
            .iter()
            .flat_map(|(field, kind)| flatten_kind(field, kind))
            .collect();
        messages.sort();
        AppError::Validation(messages)
    }
}

fn flatten_kind(field: &str, kind: &validator::ValidationErrorsKind) -> Vec<String> {
    use validator::ValidationErrorsKind;

    match kind {
        ValidationErrorsKind::Field(errs) => errs
            .iter()
            .map(|e| format!("{}: {}", field, e.code))
            .collect(),
        ValidationErrorsKind::Struct(inner) => inner
            .errors()
            .iter()
            .flat_map(|(child, kind)| flatten_kind(&format!("{}.{}", field, child), kind))
            .collect(),
        ValidationErrorsKind::List(items) => items
            .iter()
            .flat_map(|(index, inner)| {
                inner
                    .errors()
                    .iter()
                    .flat_map(|(child, kind)| {
                        flatten_kind(&format!("{}[{}].{}", field, index, child), kind)
                    })
                    .collect::<Vec<_>>()
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_codes_are_stable() {
        assert_eq!(AppError::InvalidCredentials.code(), "INVALID_CREDENTIALS");
        assert_eq!(
            AppError::AlreadyRecorded("dup".into()).code(),
            "ALREADY_RECORDED"
        );
        assert_eq!(AppError::Ineligible("nope".into()).code(), "INELIGIBLE");
        assert_eq!(
            AppError::AlreadySubmitted("dup".into()).code(),
            "ALREADY_SUBMITTED"
        );
        assert_eq!(AppError::Forbidden("denied".into()).code(), "FORBIDDEN");
        assert_eq!(AppError::NotFound("missing".into()).code(), "NOT_FOUND");
    }

    #[test]
    fn app_error_display_keeps_user_message() {
        let err = AppError::AlreadyRecorded("You have already checked in today!".into());
        assert_eq!(err.to_string(), "You have already checked in today!");
        assert_eq!(AppError::InvalidCredentials.to_string(), "Invalid credentials");
    }

    #[test]
    fn validation_response_includes_details() {
        let response = AppError::Validation(vec!["field: invalid".to_string()]).to_response();
        assert_eq!(response.error, "Validation failed");
        assert_eq!(response.code, "VALIDATION_ERROR");
        let details = response.details.expect("details");
        assert_eq!(details["errors"][0], "field: invalid");
    }

    #[test]
    fn storage_response_maps_to_generic_message() {
        let response = AppError::Storage(anyhow::anyhow!("disk on fire")).to_response();
        assert_eq!(response.error, "Storage error");
        assert_eq!(response.code, "STORAGE_ERROR");
        assert!(response.details.is_none());
    }

    #[test]
    fn serde_errors_become_storage_errors() {
        let err: AppError = serde_json::from_str::<Vec<u32>>("not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, AppError::Storage(_)));
    }
}
