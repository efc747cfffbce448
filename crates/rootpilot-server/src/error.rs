//! HTTP error mapping. Every failure leaves the server as
//! `{"error": "<message>"}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rootpilot_core::error::RootPilotError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Access token required")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Domain(#[from] RootPilotError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::MissingToken => (StatusCode::UNAUTHORIZED, self.to_string()),
            Self::InvalidToken => (StatusCode::FORBIDDEN, self.to_string()),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Domain(err) => match err {
                RootPilotError::Validation { message } => {
                    (StatusCode::BAD_REQUEST, message.clone())
                }
                RootPilotError::AlreadyExists { entity } => {
                    (StatusCode::BAD_REQUEST, format!("{entity} already exists"))
                }
                RootPilotError::Conflict { reason } => (StatusCode::BAD_REQUEST, reason.clone()),
                RootPilotError::AuthenticationFailed { .. } => {
                    (StatusCode::BAD_REQUEST, "Invalid credentials".into())
                }
                RootPilotError::AuthorizationDenied { .. } => {
                    (StatusCode::FORBIDDEN, "Access denied".into())
                }
                RootPilotError::NotFound { entity, .. } => {
                    (StatusCode::NOT_FOUND, format!("{entity} not found"))
                }
                RootPilotError::Crypto(_) | RootPilotError::Internal(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into())
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self, "Request failed");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(err: RootPilotError) -> StatusCode {
        ApiError::from(err).status_and_message().0
    }

    #[test]
    fn domain_errors_map_to_statuses() {
        assert_eq!(status(RootPilotError::validation("x")), StatusCode::BAD_REQUEST);
        assert_eq!(
            status(RootPilotError::AlreadyExists { entity: "User".into() }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status(RootPilotError::denied("x")), StatusCode::FORBIDDEN);
        assert_eq!(
            status(RootPilotError::not_found("Project", "abc")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(RootPilotError::Internal("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internals_are_not_leaked() {
        let (_, message) = ApiError::from(RootPilotError::Crypto("argon2 params".into()))
            .status_and_message();
        assert_eq!(message, "Internal server error");

        let (_, message) =
            ApiError::from(RootPilotError::not_found("Incident", "1234")).status_and_message();
        assert_eq!(message, "Incident not found");
    }
}
