use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::AppError;

/// Parameters sent to the top-users endpoint. Absent fields are never
/// transmitted; the service reads absence as "unbounded" or "server default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl QueryParams {
    pub fn is_empty(&self) -> bool {
        self.start_timestamp.is_none() && self.end_timestamp.is_none() && self.limit.is_none()
    }

    /// Populated fields as `(name, value)` pairs in wire order.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(start) = self.start_timestamp {
            pairs.push(("start_timestamp", start.to_string()));
        }
        if let Some(end) = self.end_timestamp {
            pairs.push(("end_timestamp", end.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }

    pub fn to_query_string(&self) -> String {
        self.to_pairs()
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// How many users the leaderboard shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TopLimit {
    #[default]
    Top10,
    Top20,
    Top30,
}

impl TopLimit {
    pub const ALL: [TopLimit; 3] = [TopLimit::Top10, TopLimit::Top20, TopLimit::Top30];

    pub fn get(self) -> u32 {
        match self {
            TopLimit::Top10 => 10,
            TopLimit::Top20 => 20,
            TopLimit::Top30 => 30,
        }
    }
}

impl TryFrom<u32> for TopLimit {
    type Error = AppError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            10 => Ok(TopLimit::Top10),
            20 => Ok(TopLimit::Top20),
            30 => Ok(TopLimit::Top30),
            other => Err(AppError::InvalidLimit(other)),
        }
    }
}

impl From<TopLimit> for u32 {
    fn from(limit: TopLimit) -> Self {
        limit.get()
    }
}

impl fmt::Display for TopLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Top {}", self.get())
    }
}
