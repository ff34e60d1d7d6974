//! OAuth2 access tokens for the FCM API.

use chrono::{DateTime, Duration, Utc};
use color_eyre::eyre::WrapErr as _;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use tokio::sync::RwLock;

use crate::ServiceAccount;

const MESSAGING_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Tokens this close to expiry are refreshed before use.
const REFRESH_MARGIN_SECS: i64 = 60;

#[derive(serde::Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(serde::Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(serde::Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

struct AccessToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(REFRESH_MARGIN_SECS) > now
    }
}

/// Cached access token for one service account.
pub(crate) struct TokenCache {
    current: RwLock<Option<AccessToken>>,
}

impl TokenCache {
    pub(crate) fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    /// Return a valid access token, exchanging a fresh JWT assertion if needed.
    pub(crate) async fn get(
        &self,
        http: &reqwest::Client,
        account: &ServiceAccount,
    ) -> color_eyre::eyre::Result<String> {
        if let Some(token) = self.current.read().await.as_ref()
            && token.is_fresh(Utc::now())
        {
            return Ok(token.token.clone());
        }

        let mut current = self.current.write().await;

        // Another request may have refreshed while we waited for the lock.
        if let Some(token) = current.as_ref()
            && token.is_fresh(Utc::now())
        {
            return Ok(token.token.clone());
        }

        let token = exchange(http, account).await?;
        let value = token.token.clone();
        *current = Some(token);

        Ok(value)
    }
}

fn sign_assertion(account: &ServiceAccount, now: DateTime<Utc>) -> color_eyre::eyre::Result<String> {
    let iat = now.timestamp();
    let claims = Claims {
        iss: &account.client_email,
        scope: MESSAGING_SCOPE,
        aud: &account.token_uri,
        iat,
        exp: iat + ASSERTION_LIFETIME_SECS,
    };

    let key = EncodingKey::from_rsa_pem(account.private_key.as_bytes())
        .wrap_err("invalid service account private key")?;

    jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)
        .wrap_err("failed to sign service account assertion")
}

async fn exchange(
    http: &reqwest::Client,
    account: &ServiceAccount,
) -> color_eyre::eyre::Result<AccessToken> {
    let now = Utc::now();
    let assertion = sign_assertion(account, now)?;

    let response = http
        .post(&account.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", &assertion)])
        .send()
        .await
        .wrap_err("failed to reach OAuth2 token endpoint")?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<TokenErrorResponse>(&body) {
            Ok(TokenErrorResponse {
                error,
                error_description: Some(description),
            }) => format!("{error}: {description}"),
            Ok(TokenErrorResponse { error, .. }) => error,
            Err(_) => format!("token endpoint returned {status}: {body}"),
        };
        color_eyre::eyre::bail!("failed to obtain FCM access token: {message}");
    }

    let token: TokenResponse = response
        .json()
        .await
        .wrap_err("failed to decode OAuth2 token response")?;

    tracing::debug!(expires_in = token.expires_in, "obtained FCM access token");

    Ok(AccessToken {
        token: token.access_token,
        expires_at: now + Duration::seconds(token.expires_in),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_near_expiry_are_stale() {
        let now = Utc::now();
        let fresh = AccessToken {
            token: "a".into(),
            expires_at: now + Duration::seconds(3600),
        };
        let stale = AccessToken {
            token: "b".into(),
            expires_at: now + Duration::seconds(30),
        };

        assert!(fresh.is_fresh(now));
        assert!(!stale.is_fresh(now));
    }

    #[test]
    fn malformed_private_key_is_rejected() {
        let account = ServiceAccount {
            project_id: "p".into(),
            client_email: "e".into(),
            private_key: "not a key".into(),
            token_uri: crate::DEFAULT_TOKEN_URI.into(),
        };

        let err = sign_assertion(&account, Utc::now()).unwrap_err();
        assert_eq!(err.to_string(), "invalid service account private key");
    }
}
