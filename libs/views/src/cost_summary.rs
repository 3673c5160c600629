//! Cost summary report tables

use chrono::NaiveDate;
use rxboard_models::CostSummaryReport;
use serde::Serialize;

use crate::format::{format_count, format_currency};
use crate::status::StatusTone;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthRow {
    /// e.g. `Mar 2024`
    pub label: String,
    pub claims: String,
    pub cost: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCostRow {
    pub status: String,
    pub tone: StatusTone,
    pub claims: String,
    pub cost: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostSummaryView {
    /// `2024-01-01 to 2024-03-31`
    pub period: String,
    pub total_claims: String,
    pub total_cost: String,
    pub plan_paid: String,
    pub member_paid: String,
    pub average_cost: String,
    pub by_status: Vec<StatusCostRow>,
    pub months: Vec<MonthRow>,
}

pub fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|| format!("{year}-{month:02}"))
}

pub fn cost_summary_view(report: &CostSummaryReport) -> CostSummaryView {
    let overall = &report.overall_summary;

    CostSummaryView {
        period: format!(
            "{} to {}",
            report.report_period.start_date, report.report_period.end_date
        ),
        total_claims: format_count(overall.total_claims),
        total_cost: format_currency(overall.total_cost),
        plan_paid: format_currency(overall.plan_paid),
        member_paid: format_currency(overall.member_paid),
        average_cost: format_currency(overall.average_cost),
        by_status: report
            .by_status
            .iter()
            .map(|s| StatusCostRow {
                status: s.status.clone(),
                tone: StatusTone::from_status(&s.status),
                claims: format_count(s.claims),
                cost: format_currency(s.cost),
            })
            .collect(),
        months: report
            .monthly_breakdown
            .iter()
            .map(|m| MonthRow {
                label: month_label(m.year, m.month),
                claims: format_count(m.claims),
                cost: format_currency(m.cost),
            })
            .collect(),
    }
}
