//! Runtime-selected token store.

use crate::{PgTokenStore, RestTokenStore, TokenStore};

/// Token store chosen from configuration at startup.
#[derive(Clone)]
pub enum TokenBackend {
    /// Supabase PostgREST endpoint.
    Rest(RestTokenStore),
    /// Direct Postgres connection.
    Postgres(PgTokenStore),
}

impl TokenStore for TokenBackend {
    async fn device_tokens(&self) -> color_eyre::eyre::Result<Vec<String>> {
        match self {
            Self::Rest(store) => store.device_tokens().await,
            Self::Postgres(store) => store.device_tokens().await,
        }
    }
}

impl From<RestTokenStore> for TokenBackend {
    fn from(store: RestTokenStore) -> Self {
        Self::Rest(store)
    }
}

impl From<PgTokenStore> for TokenBackend {
    fn from(store: PgTokenStore) -> Self {
        Self::Postgres(store)
    }
}
