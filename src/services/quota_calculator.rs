use serde::Serialize;

use crate::models::TopUserRecord;

/// Balance breakdown shown next to each user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuotaUsage {
    /// `total - remaining`, not clamped: negative when the service reports
    /// more remaining than total, while `percent_remaining` stays at 100.
    pub used: i64,
    pub remaining: i64,
    pub total: i64,
    /// Share of `total` still available, saturated to `[0, 100]`. Zero when
    /// `total` is not positive.
    pub percent_remaining: f64,
}

pub struct QuotaUsageCalculator;

impl QuotaUsageCalculator {
    pub fn compute(record: &TopUserRecord) -> QuotaUsage {
        Self::from_balance(record.remaining_quota, record.total_quota)
    }

    pub fn from_balance(remaining: i64, total: i64) -> QuotaUsage {
        let percent_remaining = if total > 0 {
            (remaining as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };

        QuotaUsage {
            used: total.saturating_sub(remaining),
            remaining,
            total,
            percent_remaining,
        }
    }
}
