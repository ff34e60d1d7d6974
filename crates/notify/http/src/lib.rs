//! Send-Push HTTP Layer
//!
//! Axum handlers for the send-push endpoint.

mod error;
mod handlers;
mod middleware;

pub use error::*;
pub use handlers::*;
pub use middleware::*;

use std::sync::Arc;

use axum::Router;
use notify_fcm::Messenger;
use notify_service::Dispatcher;
use notify_storage::TokenStore;

/// Create the send-push router.
pub fn send_push_router<S, M>(dispatcher: Dispatcher<S, M>) -> Router
where
    S: TokenStore + 'static,
    M: Messenger + 'static,
{
    use axum::routing::{get, post};

    Router::new()
        .route("/", post(handlers::send_push::<S, M>))
        .route("/send-push", post(handlers::send_push::<S, M>))
        .route("/health", get(handlers::health))
        .with_state(Arc::new(dispatcher))
}
