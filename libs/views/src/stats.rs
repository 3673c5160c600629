//! Dashboard headline cards

use rxboard_models::DashboardSummary;
use serde::Serialize;

use crate::format::{format_count, format_currency};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub description: String,
}

/// Claims per day over the window, 0 for an empty window
pub fn daily_average(total_claims: u64, period_days: u32) -> f64 {
    if period_days == 0 {
        0.0
    } else {
        total_claims as f64 / f64::from(period_days)
    }
}

pub fn stats_cards(summary: &DashboardSummary, period_days: u32) -> Vec<StatCard> {
    vec![
        StatCard {
            title: "Total Claims",
            value: format_count(summary.total_claims),
            description: format!("Last {period_days} days"),
        },
        StatCard {
            title: "Total Cost",
            value: format_currency(summary.total_cost),
            description: "All claims processed".to_string(),
        },
        StatCard {
            title: "Average Cost",
            value: format_currency(summary.average_cost),
            description: "Per claim".to_string(),
        },
        StatCard {
            title: "Daily Average",
            value: format!("{:.0}", daily_average(summary.total_claims, period_days)),
            description: "Claims per day".to_string(),
        },
    ]
}
