use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::{ScheduleError, StorageError};
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Schedule(ScheduleError),
    Validation(ValidationErrors),
    BadRequest(String),
    Unauthorized,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Schedule(e) => write!(f, "Schedule error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized => write!(f, "Unauthorized"),
        }
    }
}

impl WebError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::ConstraintViolation(_)) => StatusCode::CONFLICT,
            Self::Storage(StorageError::Schedule(e)) | Self::Schedule(e) => schedule_status(e),
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

fn schedule_status(error: &ScheduleError) -> StatusCode {
    match error {
        ScheduleError::MissingSchedule
        | ScheduleError::EmptySchedule
        | ScheduleError::MatchweekNotFound(_) => StatusCode::NOT_FOUND,
        ScheduleError::InvalidMatchResult { .. } => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let body = match &self {
            Self::Storage(StorageError::NotFound) => {
                json!({
                    "error": "Resource not found"
                })
            }
            Self::Storage(StorageError::ConstraintViolation(msg)) => {
                json!({
                    "error": msg
                })
            }
            Self::Storage(StorageError::Schedule(e)) | Self::Schedule(e) => {
                tracing::debug!("Schedule error: {}", e);
                json!({
                    "error": e.to_string()
                })
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "error": "An internal error occurred"
                })
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                json!({
                    "error": "Validation failed",
                    "details": field_errors
                })
            }
            Self::BadRequest(msg) => {
                json!({
                    "error": msg
                })
            }
            Self::Unauthorized => {
                json!({
                    "error": "Unauthorized"
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ScheduleError> for WebError {
    fn from(error: ScheduleError) -> Self {
        Self::Schedule(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(error: WebError) -> StatusCode {
        error.into_response().status()
    }

    #[test]
    fn test_storage_errors() {
        assert_eq!(status(StorageError::NotFound.into()), StatusCode::NOT_FOUND);
        assert_eq!(
            status(StorageError::ConstraintViolation("taken".to_string()).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status(StorageError::Database(sqlx::Error::RowNotFound).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_schedule_errors_are_not_found() {
        assert_eq!(status(ScheduleError::MissingSchedule.into()), StatusCode::NOT_FOUND);
        assert_eq!(status(ScheduleError::EmptySchedule.into()), StatusCode::NOT_FOUND);
        assert_eq!(
            status(ScheduleError::MatchweekNotFound("mw9".to_string()).into()),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_schedule_error_through_storage() {
        let error = StorageError::from(ScheduleError::MissingSchedule);
        assert_eq!(status(error.into()), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_match_result_is_bad_request() {
        let error = ScheduleError::InvalidMatchResult {
            match_id: "m1".to_string(),
            reason: "results W and W are not complementary".to_string(),
        };
        assert_eq!(status(error.into()), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_client_errors() {
        assert_eq!(status(WebError::BadRequest("nope".to_string())), StatusCode::BAD_REQUEST);
        assert_eq!(status(WebError::Unauthorized), StatusCode::UNAUTHORIZED);
    }
}
