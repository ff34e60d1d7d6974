//! Response bodies returned to send-push callers.

/// Message returned when a broadcast finds no registered devices.
pub const NO_USERS_FOUND: &str = "No users found";

/// Outcome of one send-push request.
///
/// Only the fields relevant to the outcome are serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DispatchResult {
    /// A test send was accepted by the provider.
    pub fn sent() -> Self {
        Self {
            success: Some(true),
            ..Default::default()
        }
    }

    /// A broadcast completed with the provider's counts.
    pub fn broadcast(success_count: usize, failure_count: usize) -> Self {
        Self {
            success: Some(true),
            success_count: Some(success_count),
            failure_count: Some(failure_count),
            ..Default::default()
        }
    }

    /// A broadcast found nobody to send to.
    pub fn no_users() -> Self {
        Self {
            message: Some(NO_USERS_FOUND.to_string()),
            ..Default::default()
        }
    }

    /// The request failed.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn bodies_omit_unset_fields() {
        assert_eq!(
            serde_json::to_value(DispatchResult::sent()).unwrap(),
            json!({ "success": true })
        );
        assert_eq!(
            serde_json::to_value(DispatchResult::no_users()).unwrap(),
            json!({ "message": "No users found" })
        );
        assert_eq!(
            serde_json::to_value(DispatchResult::broadcast(2, 0)).unwrap(),
            json!({ "success": true, "successCount": 2, "failureCount": 0 })
        );
        assert_eq!(
            serde_json::to_value(DispatchResult::error("Invalid request")).unwrap(),
            json!({ "error": "Invalid request" })
        );
    }
}
