//! Error-to-response translation.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use notify_core::{DispatchResult, InvalidRequest};

/// Every failure a send-push request can end in.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The body selects no operation.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidRequest),

    /// Anything raised while parsing, querying or sending.
    #[error("{0:#}")]
    Internal(color_eyre::eyre::Report),
}

impl From<color_eyre::eyre::Report> for ApiError {
    fn from(report: color_eyre::eyre::Report) -> Self {
        Self::Internal(report)
    }
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "send-push failed");
        } else {
            tracing::debug!(error = %self, "rejected send-push request");
        }

        (status, Json(DispatchResult::error(self.to_string()))).into_response()
    }
}
