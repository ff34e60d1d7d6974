//! FCM HTTP v1 client.

use std::time::Duration;

use color_eyre::eyre::WrapErr as _;
use notify_core::{BatchResponse, MAX_MULTICAST_TOKENS, Message, MulticastMessage, SendResponse};

use crate::auth::TokenCache;
use crate::{Messenger, ServiceAccount};

/// Production FCM API origin.
pub const DEFAULT_API_BASE: &str = "https://fcm.googleapis.com";

/// FCM client bound to one service account.
pub struct FcmClient {
    account: ServiceAccount,
    http: reqwest::Client,
    api_base: String,
    tokens: TokenCache,
}

#[derive(serde::Serialize)]
struct SendRequest<'a> {
    message: &'a Message,
}

#[derive(serde::Deserialize)]
struct SendResult {
    name: String,
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(serde::Deserialize)]
struct ErrorDetail {
    message: String,
}

impl FcmClient {
    /// Create a client for the production FCM endpoint.
    pub fn new(account: ServiceAccount) -> color_eyre::eyre::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .wrap_err("failed to create FCM HTTP client")?;

        Ok(Self {
            account,
            http,
            api_base: DEFAULT_API_BASE.to_string(),
            tokens: TokenCache::new(),
        })
    }

    /// Point the client at another API origin, such as a local emulator.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Project the client sends on behalf of.
    pub fn project_id(&self) -> &str {
        &self.account.project_id
    }

    fn send_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/messages:send",
            self.api_base, self.account.project_id
        )
    }

    async fn access_token(&self) -> color_eyre::eyre::Result<String> {
        self.tokens.get(&self.http, &self.account).await
    }

    async fn post_message(
        &self,
        access_token: &str,
        message: &Message,
    ) -> color_eyre::eyre::Result<String> {
        tracing::debug!(token = %message.token, "sending FCM message");

        let response = self
            .http
            .post(self.send_url())
            .bearer_auth(access_token)
            .json(&SendRequest { message })
            .send()
            .await
            .wrap_err("failed to reach FCM")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("FCM error {status}: {body}"));
            color_eyre::eyre::bail!(message);
        }

        let result: SendResult = response
            .json()
            .await
            .wrap_err("failed to decode FCM response")?;

        Ok(result.name)
    }
}

impl Messenger for FcmClient {
    async fn send(&self, message: &Message) -> color_eyre::eyre::Result<String> {
        let access_token = self.access_token().await?;
        self.post_message(&access_token, message).await
    }

    async fn send_each_for_multicast(
        &self,
        message: &MulticastMessage,
    ) -> color_eyre::eyre::Result<BatchResponse> {
        if message.tokens.is_empty() {
            color_eyre::eyre::bail!("tokens must be a non-empty array");
        }
        if message.tokens.len() > MAX_MULTICAST_TOKENS {
            color_eyre::eyre::bail!(
                "tokens list must not contain more than {MAX_MULTICAST_TOKENS} items"
            );
        }

        let access_token = self.access_token().await?;
        let access_token = access_token.as_str();

        let sends = message.tokens.iter().map(|token| {
            let single = message.for_token(token);
            async move {
                match self.post_message(access_token, &single).await {
                    Ok(name) => SendResponse::success(name),
                    Err(e) => {
                        tracing::debug!(token = %single.token, error = %e, "FCM send failed");
                        SendResponse::failure(e)
                    }
                }
            }
        });

        let batch = BatchResponse::new(futures::future::join_all(sends).await);

        tracing::info!(
            success_count = batch.success_count,
            failure_count = batch.failure_count,
            "FCM multicast sent"
        );

        Ok(batch)
    }
}
