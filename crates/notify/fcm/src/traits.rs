//! Push messaging traits.

use std::sync::Arc;

use notify_core::{BatchResponse, Message, MulticastMessage};

/// Push messaging provider.
#[trait_variant::make(Send)]
pub trait Messenger: Send + Sync {
    /// Send one message, returning the provider's message id.
    async fn send(&self, message: &Message) -> color_eyre::eyre::Result<String>;

    /// Send a multicast message token by token.
    ///
    /// Per-token failures are reported in the batch, not as an error.
    async fn send_each_for_multicast(
        &self,
        message: &MulticastMessage,
    ) -> color_eyre::eyre::Result<BatchResponse>;
}

impl<T: Messenger> Messenger for Arc<T> {
    async fn send(&self, message: &Message) -> color_eyre::eyre::Result<String> {
        (**self).send(message).await
    }

    async fn send_each_for_multicast(
        &self,
        message: &MulticastMessage,
    ) -> color_eyre::eyre::Result<BatchResponse> {
        (**self).send_each_for_multicast(message).await
    }
}
