//! Inbound send-push requests.

use crate::Message;

/// `type` value that selects the daily reminder broadcast.
pub const DAILY_REMINDER: &str = "daily_reminder";

/// Title used for test sends that don't carry one.
pub const DEFAULT_TEST_TITLE: &str = "Test";

/// Body used for test sends that don't carry one.
pub const DEFAULT_TEST_BODY: &str = "Test Notification";

/// Request body exactly as callers send it.
///
/// Every field is optional; [`NotificationRequest`] decides which operation,
/// if any, the combination selects. Fields holding anything other than a
/// string are treated as absent.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct RawRequest {
    #[serde(default, deserialize_with = "string_or_none")]
    pub fcm_token: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub body: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "string_or_none")]
    pub kind: Option<String>,
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = <Option<serde_json::Value> as serde::Deserialize>::deserialize(deserializer)?;

    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}

/// The body selects neither a test send nor a broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid request")]
pub struct InvalidRequest;

/// A validated send-push request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationRequest {
    /// Send one notification to a single device token.
    TestSend {
        token: String,
        title: Option<String>,
        body: Option<String>,
    },
    /// Send the daily reading reminder to every registered device.
    BroadcastReminder,
}

impl NotificationRequest {
    /// Validate a decoded JSON body.
    ///
    /// Bodies that are not JSON objects select no operation.
    pub fn from_json(value: serde_json::Value) -> Result<Self, InvalidRequest> {
        let raw: RawRequest = serde_json::from_value(value).map_err(|_| InvalidRequest)?;
        Self::try_from(raw)
    }

    /// Build the single-recipient message for a test send.
    ///
    /// Returns `None` for broadcasts.
    pub fn test_message(&self) -> Option<Message> {
        match self {
            Self::TestSend { token, title, body } => Some(Message::new(
                token.clone(),
                title.clone().unwrap_or_else(|| DEFAULT_TEST_TITLE.to_string()),
                body.clone().unwrap_or_else(|| DEFAULT_TEST_BODY.to_string()),
            )),
            Self::BroadcastReminder => None,
        }
    }
}

impl TryFrom<RawRequest> for NotificationRequest {
    type Error = InvalidRequest;

    fn try_from(raw: RawRequest) -> Result<Self, Self::Error> {
        // Empty strings count as absent, so "" never wins over `type`.
        if let Some(token) = non_empty(raw.fcm_token) {
            return Ok(Self::TestSend {
                token,
                title: non_empty(raw.title),
                body: non_empty(raw.body),
            });
        }

        match raw.kind.as_deref() {
            Some(DAILY_REMINDER) => Ok(Self::BroadcastReminder),
            _ => Err(InvalidRequest),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
