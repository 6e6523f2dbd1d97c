use crate::models::{QueryParams, TimeWindow};

/// Canonical request parameters for a window and limit. Non-positive values
/// are left out entirely.
pub fn build_query(window: &TimeWindow, limit: u32) -> QueryParams {
    QueryParams {
        start_timestamp: window.start_secs(),
        end_timestamp: window.end_secs(),
        limit: (limit > 0).then_some(limit),
    }
}
