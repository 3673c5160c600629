//! Typed chart series
//!
//! Each chart enumerates the series it plots. A series knows its data key,
//! its legend label and how to format its values, so tooltips and axes never
//! dispatch on series-name strings.

use serde::Serialize;

use crate::format::{currency_tick, format_count, format_currency, thousands_tick};

pub trait ChartSeries: Copy + 'static {
    /// Every series of the chart, in legend order
    const ALL: &'static [Self];

    /// Field name in the underlying data
    fn key(&self) -> &'static str;

    /// Legend label
    fn label(&self) -> &'static str;

    /// Tooltip value
    fn format_value(&self, value: f64) -> String;

    /// Axis tick; same as the tooltip unless the axis is compacted
    fn format_tick(&self, value: f64) -> String {
        self.format_value(value)
    }
}

fn whole(value: f64) -> String {
    if value.is_finite() && value >= 0.0 {
        format_count(value.round() as u64)
    } else {
        format!("{value:.0}")
    }
}

/// Lines of the cost trend chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendSeries {
    Cost,
    MovingAvgCost,
    Claims,
    MovingAvgClaims,
}

impl TrendSeries {
    /// Cost lines share the left axis; claim counts use the right one
    pub fn is_cost(&self) -> bool {
        matches!(self, TrendSeries::Cost | TrendSeries::MovingAvgCost)
    }
}

impl ChartSeries for TrendSeries {
    const ALL: &'static [Self] = &[
        TrendSeries::Cost,
        TrendSeries::MovingAvgCost,
        TrendSeries::Claims,
        TrendSeries::MovingAvgClaims,
    ];

    fn key(&self) -> &'static str {
        match self {
            TrendSeries::Cost => "cost",
            TrendSeries::MovingAvgCost => "moving_avg_cost",
            TrendSeries::Claims => "claims",
            TrendSeries::MovingAvgClaims => "moving_avg_claims",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            TrendSeries::Cost => "Daily Cost",
            TrendSeries::MovingAvgCost => "7-Day Avg Cost",
            TrendSeries::Claims => "Daily Claims",
            TrendSeries::MovingAvgClaims => "7-Day Avg Claims",
        }
    }

    fn format_value(&self, value: f64) -> String {
        if self.is_cost() {
            format_currency(value)
        } else {
            whole(value)
        }
    }

    fn format_tick(&self, value: f64) -> String {
        if self.is_cost() {
            currency_tick(value)
        } else {
            whole(value)
        }
    }
}

/// Measures of the generic-vs-brand split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMeasure {
    Claims,
    Cost,
}

impl ChartSeries for SplitMeasure {
    const ALL: &'static [Self] = &[SplitMeasure::Claims, SplitMeasure::Cost];

    fn key(&self) -> &'static str {
        match self {
            SplitMeasure::Claims => "claims",
            SplitMeasure::Cost => "cost",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            SplitMeasure::Claims => "Claims",
            SplitMeasure::Cost => "Cost",
        }
    }

    fn format_value(&self, value: f64) -> String {
        match self {
            SplitMeasure::Claims => whole(value),
            SplitMeasure::Cost => format_currency(value),
        }
    }
}

/// Bars of the top drugs chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TopDrugSeries {
    TotalCost,
    Claims,
}

impl ChartSeries for TopDrugSeries {
    const ALL: &'static [Self] = &[TopDrugSeries::TotalCost, TopDrugSeries::Claims];

    fn key(&self) -> &'static str {
        match self {
            TopDrugSeries::TotalCost => "total_cost",
            TopDrugSeries::Claims => "claims",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            TopDrugSeries::TotalCost => "Total Cost",
            TopDrugSeries::Claims => "Claims",
        }
    }

    fn format_value(&self, value: f64) -> String {
        match self {
            TopDrugSeries::TotalCost => format_currency(value),
            TopDrugSeries::Claims => whole(value),
        }
    }

    fn format_tick(&self, value: f64) -> String {
        match self {
            TopDrugSeries::TotalCost => thousands_tick(value),
            TopDrugSeries::Claims => whole(value),
        }
    }
}
