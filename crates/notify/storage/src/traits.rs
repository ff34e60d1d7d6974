//! Storage traits.

/// Source of push recipients.
#[trait_variant::make(Send)]
pub trait TokenStore: Send + Sync {
    /// Every non-null device token, in the order the store returns them.
    ///
    /// Tokens are not de-duplicated.
    async fn device_tokens(&self) -> color_eyre::eyre::Result<Vec<String>>;
}
