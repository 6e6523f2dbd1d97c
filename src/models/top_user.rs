use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::quota::lenient_quota;

/// One leaderboard entry as reported by the usage service.
///
/// `remaining_quota`/`total_quota` are the lifetime account balance;
/// `used_quota` is consumption inside the queried window. The two are
/// independent and never derived from each other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopUserRecord {
    #[serde(default)]
    pub username: String,
    #[serde(default, deserialize_with = "lenient_quota")]
    pub remaining_quota: i64,
    #[serde(default, deserialize_with = "lenient_quota")]
    pub total_quota: i64,
    #[serde(default, rename = "used_quota", deserialize_with = "lenient_quota")]
    pub used_quota_in_window: i64,
}

/// `{success, message, data}` wrapper used by every service response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl ApiEnvelope {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}
