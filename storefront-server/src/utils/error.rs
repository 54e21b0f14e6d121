//! Server-side error glue
//!
//! Re-exports the unified error types from `shared::error` and converts the
//! layer-specific errors (repository, validator) into [`AppError`].

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

use serde_json::Value;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::db::repository::RepoError;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Repository error");
                AppError::database(msg)
            }
        }
    }
}

/// Run `validator` rules and map failures onto `ValidationFailed`
///
/// Each failing field becomes a `details` entry keyed by its path
/// (`items[0].quantity`).
pub fn validate_payload<T: Validate>(payload: &T) -> AppResult<()> {
    payload.validate().map_err(|errors| {
        let mut fields = Vec::new();
        collect_field_errors("", &errors, &mut fields);

        let message = fields
            .first()
            .map(|(field, msg)| format!("{field}: {msg}"))
            .unwrap_or_else(|| ErrorCode::ValidationFailed.message().to_string());

        fields
            .into_iter()
            .fold(AppError::validation(message), |err, (field, msg)| {
                err.with_detail(field, Value::String(msg))
            })
    })
}

fn collect_field_errors(prefix: &str, errors: &ValidationErrors, out: &mut Vec<(String, String)>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                for e in errs {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("failed '{}' check", e.code));
                    out.push((path.clone(), msg));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_field_errors(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_field_errors(&format!("{path}[{index}]"), inner, out);
                }
            }
        }
    }
}
