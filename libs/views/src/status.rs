//! Claims-by-status breakdown

use rxboard_models::{ClaimStatus, StatusCount};
use serde::Serialize;

use crate::format::{format_count, format_percent, ratio};

/// Display tone of a status value.
///
/// Statuses the client does not recognise get [`StatusTone::Other`] and the
/// default chart color instead of failing the whole chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Paid,
    Approved,
    Pending,
    Denied,
    Reversed,
    Other,
}

impl StatusTone {
    pub fn from_status(status: &str) -> Self {
        match status.parse::<ClaimStatus>() {
            Ok(ClaimStatus::Paid) => StatusTone::Paid,
            Ok(ClaimStatus::Approved) => StatusTone::Approved,
            Ok(ClaimStatus::Pending) => StatusTone::Pending,
            Ok(ClaimStatus::Denied) => StatusTone::Denied,
            Ok(ClaimStatus::Reversed) => StatusTone::Reversed,
            Err(_) => StatusTone::Other,
        }
    }

    /// Hex chart color
    pub fn color(&self) -> &'static str {
        match self {
            StatusTone::Paid => "#10b981",
            StatusTone::Approved => "#3b82f6",
            StatusTone::Pending => "#f59e0b",
            StatusTone::Denied => "#ef4444",
            StatusTone::Reversed => "#6b7280",
            StatusTone::Other => "#8884d8",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSlice {
    /// Status as reported by the server
    pub status: String,
    pub count: u64,
    /// Share of all counted claims, 0..=100
    pub percent: f64,
    pub tone: StatusTone,
}

impl StatusSlice {
    /// `3 (75.0%)`
    pub fn tooltip(&self) -> String {
        format!(
            "{} ({})",
            format_count(self.count),
            format_percent(self.percent, 1)
        )
    }

    /// `paid: 75%`
    pub fn label(&self) -> String {
        format!("{}: {}", self.status, format_percent(self.percent, 0))
    }
}

pub fn status_breakdown(rows: &[StatusCount]) -> Vec<StatusSlice> {
    let total: u64 = rows.iter().map(|r| r.count).sum();

    rows.iter()
        .map(|r| StatusSlice {
            status: r.status.clone(),
            count: r.count,
            percent: ratio(r.count as f64, total as f64) * 100.0,
            tone: StatusTone::from_status(&r.status),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(status: &str, count: u64) -> StatusCount {
        StatusCount {
            status: status.to_string(),
            count,
        }
    }

    #[test]
    fn test_percentages() {
        let slices = status_breakdown(&[count("paid", 3), count("pending", 1)]);

        assert_eq!(slices[0].percent, 75.0);
        assert_eq!(slices[1].percent, 25.0);
        assert_eq!(slices[0].tooltip(), "3 (75.0%)");
        assert_eq!(slices[1].label(), "pending: 25%");
        assert_eq!(slices[0].tone, StatusTone::Paid);
    }

    #[test]
    fn test_unknown_status_uses_default_tone() {
        let slices = status_breakdown(&[count("on_hold", 2), count("DENIED", 2)]);

        assert_eq!(slices[0].tone, StatusTone::Other);
        assert_eq!(slices[0].tone.color(), "#8884d8");
        assert_eq!(slices[1].tone, StatusTone::Denied);
        assert_eq!(slices[0].percent, 50.0);
    }

    #[test]
    fn test_zero_counts() {
        let slices = status_breakdown(&[count("paid", 0)]);
        assert_eq!(slices[0].percent, 0.0);
        assert_eq!(slices[0].tooltip(), "0 (0.0%)");
    }

    #[test]
    fn test_empty_input() {
        assert!(status_breakdown(&[]).is_empty());
    }
}
