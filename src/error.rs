use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::models::ErrorResponse;

/// Fixed label carried by every error envelope the gateway emits.
pub const ERROR_LABEL: &str = "Backend request failed";

/// The two failure kinds at the gateway boundary: the backend answered with
/// a non-2xx status, or the backend could not be reached at all.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("backend responded with status {status}: {detail}")]
    Backend { status: StatusCode, detail: String },

    #[error("failed to contact backend service: {0}")]
    Transport(#[from] reqwest::Error),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            GatewayError::Backend { status, detail } => (status, detail),
            GatewayError::Transport(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to contact backend service: {e}"),
            ),
        };

        (
            status,
            Json(ErrorResponse {
                error: ERROR_LABEL.to_string(),
                detail,
            }),
        )
            .into_response()
    }
}
