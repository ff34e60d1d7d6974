//! Outbound push messages and provider batch results.

use std::collections::BTreeMap;

/// Largest token list a single multicast send accepts.
pub const MAX_MULTICAST_TOKENS: usize = 500;

/// Daily reminder title.
pub const REMINDER_TITLE: &str = "📖 Time to Read";

/// Daily reminder body.
pub const REMINDER_BODY: &str = "Keep your streak alive! Take a moment to read a chapter today.";

/// In-app route opened when the reminder is tapped.
pub const REMINDER_ROUTE: &str = "/home";

/// Visible notification content.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

/// Message addressed to a single device token.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub token: String,
    pub notification: Notification,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, String>>,
}

impl Message {
    /// Create a notification-only message.
    pub fn new(token: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            notification: Notification {
                title: title.into(),
                body: body.into(),
            },
            data: None,
        }
    }
}

/// One message addressed to many device tokens.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MulticastMessage {
    pub tokens: Vec<String>,
    pub notification: Notification,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, String>>,
}

impl MulticastMessage {
    /// The "Time to Read" reminder for the given tokens.
    pub fn daily_reminder(tokens: Vec<String>) -> Self {
        let data = BTreeMap::from([("route".to_string(), REMINDER_ROUTE.to_string())]);

        Self {
            tokens,
            notification: Notification {
                title: REMINDER_TITLE.to_string(),
                body: REMINDER_BODY.to_string(),
            },
            data: Some(data),
        }
    }

    /// The single-recipient message sent to `token`.
    pub fn for_token(&self, token: &str) -> Message {
        Message {
            token: token.to_string(),
            notification: self.notification.clone(),
            data: self.data.clone(),
        }
    }

    /// Split into messages of at most `size` tokens, preserving token order.
    pub fn batches(&self, size: usize) -> impl Iterator<Item = MulticastMessage> + '_ {
        self.tokens.chunks(size.max(1)).map(|tokens| MulticastMessage {
            tokens: tokens.to_vec(),
            notification: self.notification.clone(),
            data: self.data.clone(),
        })
    }
}

/// Outcome of sending to one token of a multicast.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SendResponse {
    /// Create a successful send response.
    pub fn success(message_id: impl Into<String>) -> Self {
        Self {
            success: true,
            message_id: Some(message_id.into()),
            error: None,
        }
    }

    /// Create a failed send response.
    pub fn failure(error: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            message_id: None,
            error: Some(error.to_string()),
        }
    }
}

/// Per-token results of a multicast send, in token order.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    pub success_count: usize,
    pub failure_count: usize,
    pub responses: Vec<SendResponse>,
}

impl BatchResponse {
    /// Tally per-token responses.
    pub fn new(responses: Vec<SendResponse>) -> Self {
        let success_count = responses.iter().filter(|r| r.success).count();

        Self {
            success_count,
            failure_count: responses.len() - success_count,
            responses,
        }
    }
}
