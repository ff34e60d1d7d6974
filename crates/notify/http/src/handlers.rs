//! Send-push handlers.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use color_eyre::eyre::WrapErr as _;
use notify_core::{DispatchResult, NotificationRequest};
use notify_fcm::Messenger;
use notify_service::Dispatcher;
use notify_storage::TokenStore;

use crate::ApiError;

/// Handle a send-push request.
///
/// Bodies that are not JSON at all fail like any other error; JSON that
/// selects no operation is rejected before any I/O.
pub async fn send_push<S, M>(
    State(dispatcher): State<Arc<Dispatcher<S, M>>>,
    body: Bytes,
) -> Result<Json<DispatchResult>, ApiError>
where
    S: TokenStore,
    M: Messenger,
{
    let value: serde_json::Value =
        serde_json::from_slice(&body).wrap_err("request body is not valid JSON")?;

    let request = NotificationRequest::from_json(value)?;
    let result = dispatcher.dispatch(request).await?;

    Ok(Json(result))
}

/// Health check response.
#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
