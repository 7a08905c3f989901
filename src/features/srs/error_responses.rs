use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::data::models::SrsError;

impl SrsError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SrsError::Validation(_) | SrsError::InvalidQuality { .. } => StatusCode::BAD_REQUEST,
            SrsError::UnknownWord(_) => StatusCode::NOT_FOUND,
            SrsError::ConcurrentReview { .. } | SrsError::InvalidSessionAction { .. } => {
                StatusCode::CONFLICT
            }
            SrsError::Database(_) | SrsError::Pool(_) | SrsError::Session(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        }
    }
}

impl IntoResponse for SrsError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        }

        let mut body = json!({
            "error": self.to_string(),
            "status": status.as_u16()
        });
        if self.is_retryable() {
            body["retryable"] = json!(true);
        }

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_status_codes() {
        assert_eq!(
            SrsError::Validation("Word is required".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SrsError::InvalidQuality { word_id: 1, quality: 9 }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(SrsError::UnknownWord(4).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            SrsError::ConcurrentReview { word_id: 1, quality: 2 }.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            SrsError::Database(diesel::result::Error::NotFound).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn error_message_carries_retry_context() {
        let err = SrsError::ConcurrentReview { word_id: 12, quality: 3 };
        assert!(err.is_retryable());
        let message = err.to_string();
        assert!(message.contains("12") && message.contains('3'));

        assert!(!SrsError::InvalidQuality { word_id: 1, quality: 7 }.is_retryable());
    }
}
