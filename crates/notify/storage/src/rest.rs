//! Supabase PostgREST token store.

use std::time::Duration;

use color_eyre::eyre::WrapErr as _;

use crate::traits::TokenStore;

/// Reads device tokens through the Supabase REST API using the service-role key.
#[derive(Clone)]
pub struct RestTokenStore {
    client: reqwest::Client,
    base_url: String,
    service_role_key: String,
}

#[derive(serde::Deserialize)]
struct ProfileRow {
    fcm_token: Option<String>,
}

#[derive(serde::Deserialize)]
struct PostgrestError {
    message: String,
}

impl RestTokenStore {
    /// Create a new REST store for a Supabase project URL.
    pub fn new(
        base_url: impl Into<String>,
        service_role_key: impl Into<String>,
    ) -> color_eyre::eyre::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .wrap_err("failed to create PostgREST client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_role_key: service_role_key.into(),
        })
    }

    fn profiles_url(&self) -> String {
        format!("{}/rest/v1/profiles", self.base_url)
    }
}

impl TokenStore for RestTokenStore {
    async fn device_tokens(&self) -> color_eyre::eyre::Result<Vec<String>> {
        let response = self
            .client
            .get(self.profiles_url())
            .query(&[("select", "fcm_token"), ("fcm_token", "not.is.null")])
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .send()
            .await
            .wrap_err("failed to reach PostgREST")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // PostgREST reports failures as {"code", "message", "details", "hint"}.
            let message = serde_json::from_str::<PostgrestError>(&body)
                .map(|e| e.message)
                .unwrap_or_else(|_| format!("PostgREST error {status}: {body}"));
            color_eyre::eyre::bail!(message);
        }

        let rows: Vec<ProfileRow> = response
            .json()
            .await
            .wrap_err("failed to decode profile rows")?;

        let tokens: Vec<String> = rows.into_iter().filter_map(|row| row.fcm_token).collect();

        tracing::debug!(count = tokens.len(), "loaded device tokens from PostgREST");
        Ok(tokens)
    }
}
