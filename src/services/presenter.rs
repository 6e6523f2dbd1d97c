use serde::Serialize;

use crate::models::TopUserRecord;
use crate::services::quota_calculator::QuotaUsageCalculator;

/// How quota amounts are rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuotaDisplay {
    /// Integer quota units.
    Raw,
    /// `$` amount, `per_unit` quota units per dollar.
    Currency { per_unit: f64 },
}

impl Default for QuotaDisplay {
    fn default() -> Self {
        QuotaDisplay::Currency { per_unit: 500_000.0 }
    }
}

pub fn render_quota(quota: i64, display: QuotaDisplay) -> String {
    match display {
        QuotaDisplay::Raw => quota.to_string(),
        QuotaDisplay::Currency { per_unit } => {
            let amount = quota as f64 / per_unit;
            let sign = if quota < 0 { "-" } else { "" };
            let formatted = format!("{:.2}", amount.abs());
            // Tiny balances would otherwise read as empty.
            if quota > 0 && formatted == "0.00" {
                return "$0.01".to_string();
            }
            format!("{}${}", sign, formatted)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub username: String,
    pub remaining: i64,
    pub total: i64,
    pub used: i64,
    pub percent_remaining: f64,
    pub used_in_window: i64,
    /// `"remaining / total"`.
    pub balance_label: String,
    pub percent_label: String,
    pub used_label: String,
    pub used_in_window_label: String,
}

pub struct ResultPresenter {
    display: QuotaDisplay,
}

impl ResultPresenter {
    pub fn new(display: QuotaDisplay) -> Self {
        Self { display }
    }

    /// One row per record, ranked by position.
    pub fn present(&self, records: &[TopUserRecord]) -> Vec<LeaderboardRow> {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| self.row(index + 1, record))
            .collect()
    }

    fn row(&self, rank: usize, record: &TopUserRecord) -> LeaderboardRow {
        let usage = QuotaUsageCalculator::compute(record);
        let render = |quota| render_quota(quota, self.display);

        LeaderboardRow {
            rank,
            username: record.username.clone(),
            remaining: usage.remaining,
            total: usage.total,
            used: usage.used,
            percent_remaining: usage.percent_remaining,
            used_in_window: record.used_quota_in_window,
            balance_label: format!("{} / {}", render(usage.remaining), render(usage.total)),
            percent_label: format!("{:.0}%", usage.percent_remaining),
            used_label: render(usage.used),
            used_in_window_label: render(record.used_quota_in_window),
        }
    }
}

impl Default for ResultPresenter {
    fn default() -> Self {
        Self::new(QuotaDisplay::default())
    }
}
