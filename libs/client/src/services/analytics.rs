//! Analytics and report endpoints
//!
//! Every report covers a trailing window of `days` ending today (server
//! time). Passing `None` selects the dashboard's default window for that
//! report.

use rxboard_models::{
    CostSummaryReport, DashboardStats, DateRange, GenericSavings, HighUtilizers, MemberSummary,
    PharmacyPerformance, TherapeuticClassBreakdown, TrendReport,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::validate_id;
use crate::error::{Error, Result};
use crate::gateway::ApiClient;

pub const DASHBOARD_DAYS: u32 = 30;
pub const TRENDS_DAYS: u32 = 90;
pub const HIGH_UTILIZER_DAYS: u32 = 90;
pub const HIGH_UTILIZER_MIN_CLAIMS: u32 = 5;
pub const GENERIC_SAVINGS_DAYS: u32 = 90;
pub const MEMBER_SUMMARY_DAYS: u32 = 365;
pub const PHARMACY_PERFORMANCE_DAYS: u32 = 90;
pub const THERAPEUTIC_CLASS_DAYS: u32 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct Window {
    pub days: u32,
}

impl Window {
    pub(crate) fn new(days: Option<u32>, default: u32) -> Result<Self> {
        Ok(Self {
            days: validate_days(days.unwrap_or(default))?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct UtilizerWindow {
    pub days: u32,
    pub min_claims: u32,
}

pub(crate) fn validate_days(days: u32) -> Result<u32> {
    if days == 0 {
        return Err(Error::Validation(
            "report window must cover at least one day".to_string(),
        ));
    }
    Ok(days)
}

pub(crate) fn validate_range(range: Option<&DateRange>) -> Result<()> {
    match range {
        Some(range) if range.end_date < range.start_date => Err(Error::Validation(format!(
            "cost summary range ends ({}) before it starts ({})",
            range.end_date, range.start_date
        ))),
        _ => Ok(()),
    }
}

/// Read-only access to the server-side aggregates
#[derive(Debug, Clone)]
pub struct AnalyticsService {
    api: ApiClient,
}

impl AnalyticsService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    async fn report<T, P>(&self, path: &str, params: &P) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.api.get(path, params).await
    }

    /// Summary, generic/brand split, top drugs and status breakdown
    pub async fn dashboard(&self, days: Option<u32>) -> Result<DashboardStats> {
        let window = Window::new(days, DASHBOARD_DAYS)?;
        self.report("/api/analytics/dashboard", &window).await
    }

    /// Daily volume with 7-day moving averages
    pub async fn trends(&self, days: Option<u32>) -> Result<TrendReport> {
        let window = Window::new(days, TRENDS_DAYS)?;
        self.report("/api/analytics/trends", &window).await
    }

    pub async fn high_utilizers(
        &self,
        days: Option<u32>,
        min_claims: Option<u32>,
    ) -> Result<HighUtilizers> {
        let window = UtilizerWindow {
            days: Window::new(days, HIGH_UTILIZER_DAYS)?.days,
            min_claims: min_claims.unwrap_or(HIGH_UTILIZER_MIN_CLAIMS),
        };
        self.report("/api/analytics/high-utilizers", &window).await
    }

    pub async fn generic_savings(&self, days: Option<u32>) -> Result<GenericSavings> {
        let window = Window::new(days, GENERIC_SAVINGS_DAYS)?;
        self.report("/api/reports/generic-savings", &window).await
    }

    /// Cost totals for `range`; without one the server reports the last 90 days
    pub async fn cost_summary(&self, range: Option<DateRange>) -> Result<CostSummaryReport> {
        validate_range(range.as_ref())?;
        self.report("/api/reports/cost-summary", &range).await
    }

    /// Fails with [`Error::NotFound`] when the member does not exist
    pub async fn member_summary(&self, member_id: i64, days: Option<u32>) -> Result<MemberSummary> {
        validate_id("members", member_id)?;
        let window = Window::new(days, MEMBER_SUMMARY_DAYS)?;
        self.report(&format!("/api/reports/member-summary/{member_id}"), &window)
            .await
            .map_err(|e| e.for_record("members", member_id))
    }

    pub async fn pharmacy_performance(&self, days: Option<u32>) -> Result<PharmacyPerformance> {
        let window = Window::new(days, PHARMACY_PERFORMANCE_DAYS)?;
        self.report("/api/analytics/pharmacy-performance", &window)
            .await
    }

    pub async fn therapeutic_classes(
        &self,
        days: Option<u32>,
    ) -> Result<TherapeuticClassBreakdown> {
        let window = Window::new(days, THERAPEUTIC_CLASS_DAYS)?;
        self.report("/api/analytics/therapeutic-class", &window).await
    }
}
