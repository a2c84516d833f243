//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use roster_domain::error::RosterError;

/// JSON body carrying a human-readable message, used for errors and for
/// delete confirmations.
#[derive(Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Maps [`RosterError`] to an HTTP response with appropriate status code.
pub struct ApiError(RosterError);

impl From<RosterError> for ApiError {
    fn from(err: RosterError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            RosterError::Validation(_) | RosterError::Conflict(_) => StatusCode::BAD_REQUEST,
            RosterError::NotFound(_) => StatusCode::NOT_FOUND,
            RosterError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(MessageBody::new(self.0.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_domain::error::{ConflictError, NotFoundError, ValidationError};

    fn status_of(err: RosterError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn should_map_error_classes_to_status_codes() {
        assert_eq!(
            status_of(ValidationError::MissingField("name").into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(
                ConflictError {
                    entity: "User",
                    field: "email"
                }
                .into()
            ),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(
                NotFoundError {
                    entity: "Log",
                    key: "3".to_string()
                }
                .into()
            ),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(RosterError::Storage("disk I/O error".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn should_pass_storage_message_through() {
        let response = ApiError::from(RosterError::Storage("disk I/O error".into())).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "disk I/O error");
    }
}
