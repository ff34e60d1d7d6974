//! Send-push dispatch.

use notify_core::{
    DispatchResult, MAX_MULTICAST_TOKENS, Message, MulticastMessage, NotificationRequest,
};
use notify_fcm::Messenger;
use notify_storage::TokenStore;

/// Dispatches send-push requests to a token store and a messenger.
pub struct Dispatcher<S, M> {
    store: S,
    messenger: M,
}

impl<S, M> Dispatcher<S, M>
where
    S: TokenStore,
    M: Messenger,
{
    /// Create a new dispatcher.
    pub fn new(store: S, messenger: M) -> Self {
        Self { store, messenger }
    }

    /// Run the operation selected by `request`.
    pub async fn dispatch(
        &self,
        request: NotificationRequest,
    ) -> color_eyre::eyre::Result<DispatchResult> {
        match request.test_message() {
            Some(message) => self.test_send(&message).await,
            None => self.broadcast_reminder().await,
        }
    }

    /// Send one message to a single device.
    pub async fn test_send(&self, message: &Message) -> color_eyre::eyre::Result<DispatchResult> {
        let message_id = self.messenger.send(message).await?;
        tracing::info!(message_id = %message_id, "test notification sent");

        Ok(DispatchResult::sent())
    }

    /// Send the daily reminder to every registered device.
    ///
    /// Token lists larger than one multicast allows go out in consecutive
    /// batches; the returned counts cover all of them.
    pub async fn broadcast_reminder(&self) -> color_eyre::eyre::Result<DispatchResult> {
        let tokens = self.store.device_tokens().await?;

        if tokens.is_empty() {
            tracing::info!("no device tokens registered, skipping daily reminder");
            return Ok(DispatchResult::no_users());
        }

        tracing::info!(token_count = tokens.len(), "sending daily reminder");

        let message = MulticastMessage::daily_reminder(tokens);
        let mut success_count = 0;
        let mut failure_count = 0;

        for batch in message.batches(MAX_MULTICAST_TOKENS) {
            let response = self.messenger.send_each_for_multicast(&batch).await?;
            success_count += response.success_count;
            failure_count += response.failure_count;
        }

        tracing::info!(success_count, failure_count, "daily reminder sent");

        Ok(DispatchResult::broadcast(success_count, failure_count))
    }
}
