//! Process-wide FCM client.

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::{FcmClient, ServiceAccount};

static MESSAGING: OnceCell<Arc<FcmClient>> = OnceCell::const_new();

/// Initialize the process-wide FCM client.
///
/// Only the first successful call builds a client; later calls return it
/// unchanged and ignore their arguments. Concurrent first calls wait on the
/// same initialization.
pub async fn initialize(
    account: ServiceAccount,
    api_base: &str,
) -> color_eyre::eyre::Result<Arc<FcmClient>> {
    let client = MESSAGING
        .get_or_try_init(|| async move {
            let client = FcmClient::new(account)?.with_api_base(api_base);
            tracing::info!(project_id = %client.project_id(), "FCM client initialized");
            Ok::<_, color_eyre::eyre::Report>(Arc::new(client))
        })
        .await?;

    Ok(Arc::clone(client))
}

/// The process-wide FCM client, if [`initialize`] has run.
///
/// For inspecting the initialized client. Request handling gets its client
/// through the `Dispatcher` it was built with, never from here.
pub fn messaging() -> Option<Arc<FcmClient>> {
    MESSAGING.get().cloned()
}
