use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use tower_sessions::session::Error as SessionError;
use validator::ValidationErrors;

use crate::data::models::SrsError;

impl From<ValidationErrors> for SrsError {
    fn from(err: ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();
        SrsError::Validation(messages.join("; "))
    }
}

impl From<SessionError> for SrsError {
    fn from(err: SessionError) -> Self {
        SrsError::Session(err.to_string())
    }
}

impl From<JsonRejection> for SrsError {
    fn from(rejection: JsonRejection) -> Self {
        SrsError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for SrsError {
    fn from(rejection: PathRejection) -> Self {
        SrsError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for SrsError {
    fn from(rejection: QueryRejection) -> Self {
        SrsError::Validation(rejection.body_text())
    }
}
