//! Cost trend chart rows

use chrono::NaiveDate;
use rxboard_models::TrendPoint;
use serde::Serialize;

use crate::series::TrendSeries;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPointView {
    pub date: NaiveDate,
    /// Short en-US label, e.g. `Jan 5`
    pub label: String,
    pub claims: u64,
    pub cost: f64,
    pub moving_avg_claims: f64,
    pub moving_avg_cost: f64,
}

impl TrendPointView {
    pub fn value(&self, series: TrendSeries) -> f64 {
        match series {
            TrendSeries::Cost => self.cost,
            TrendSeries::MovingAvgCost => self.moving_avg_cost,
            TrendSeries::Claims => self.claims as f64,
            TrendSeries::MovingAvgClaims => self.moving_avg_claims,
        }
    }
}

pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Label every point; order is kept as served
pub fn format_trends(points: &[TrendPoint]) -> Vec<TrendPointView> {
    points
        .iter()
        .map(|p| TrendPointView {
            date: p.date,
            label: short_date(p.date),
            claims: p.claims,
            cost: p.cost,
            moving_avg_claims: p.moving_avg_claims,
            moving_avg_cost: p.moving_avg_cost,
        })
        .collect()
}
