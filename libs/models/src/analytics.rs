//! Aggregate payloads from the analytics and reports endpoints
//!
//! All aggregation happens server-side. These types are read-only snapshots;
//! list order is the server's order (cost-descending for top drugs, high
//! utilizers and savings, chronological for trends).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::claim::Claim;
use crate::common::DateRange;
use crate::member::Member;

/// `GET /api/analytics/dashboard`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub period_days: u32,
    pub start_date: Option<NaiveDate>,
    pub summary: DashboardSummary,
    pub generic_vs_brand: Vec<GenericBrandRow>,
    pub top_drugs: Vec<TopDrug>,
    pub status_breakdown: Vec<StatusCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSummary {
    pub total_claims: u64,
    pub total_cost: f64,
    pub average_cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrugCategory {
    Generic,
    Brand,
}

impl DrugCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrugCategory::Generic => "Generic",
            DrugCategory::Brand => "Brand",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericBrandRow {
    #[serde(rename = "type")]
    pub category: DrugCategory,
    #[serde(default)]
    pub claims: u64,
    #[serde(default)]
    pub cost: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopDrug {
    pub name: String,
    pub is_generic: bool,
    pub claims: u64,
    pub total_cost: f64,
}

/// Claim count for one status value.
///
/// `status` stays a plain string: the breakdown is rendered even when the
/// backend reports a status this client does not know.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusCount {
    pub status: String,
    pub count: u64,
}

/// `GET /api/analytics/trends`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendReport {
    pub period_days: u32,
    pub trends: Vec<TrendPoint>,
}

/// One day of claim volume with 7-day moving averages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    #[serde(default)]
    pub claims: u64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub moving_avg_claims: f64,
    #[serde(default)]
    pub moving_avg_cost: f64,
}

/// `GET /api/analytics/high-utilizers`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighUtilizers {
    pub period_days: u32,
    pub min_claims: u32,
    pub high_utilizers: Vec<HighUtilizer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighUtilizer {
    pub member_id: String,
    pub name: String,
    pub claim_count: u64,
    pub total_cost: f64,
    pub avg_cost_per_claim: f64,
}

/// `GET /api/reports/generic-savings`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenericSavings {
    pub period_days: u32,
    pub total_potential_savings: f64,
    pub opportunities: Vec<SavingsOpportunity>,
}

/// Brand drug with a cheaper generic equivalent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavingsOpportunity {
    pub brand_name: String,
    pub generic_name: String,
    pub brand_claims: u64,
    pub avg_brand_cost: f64,
    pub avg_generic_cost: f64,
    pub potential_savings: f64,
    pub savings_per_claim: f64,
}

/// `GET /api/reports/cost-summary`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummaryReport {
    pub report_period: DateRange,
    #[serde(default)]
    pub overall_summary: CostOverview,
    #[serde(default)]
    pub by_status: Vec<StatusCost>,
    #[serde(default)]
    pub monthly_breakdown: Vec<MonthlyCost>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostOverview {
    pub total_claims: u64,
    pub total_cost: f64,
    pub plan_paid: f64,
    pub member_paid: f64,
    pub average_cost: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusCost {
    pub status: String,
    pub claims: u64,
    pub cost: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlyCost {
    pub year: i32,
    pub month: u32,
    pub claims: u64,
    pub cost: f64,
}

/// `GET /api/reports/member-summary/{member_id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberSummary {
    pub member: Member,
    pub period_days: u32,
    pub summary: MemberClaimSummary,
    pub most_used_drugs: Vec<MemberDrugUsage>,
    pub recent_claims: Vec<Claim>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberClaimSummary {
    pub total_claims: u64,
    pub total_cost: f64,
    pub total_copay: f64,
    pub avg_cost_per_claim: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberDrugUsage {
    pub name: String,
    pub is_generic: bool,
    pub fills: u64,
    pub total_cost: f64,
}

/// `GET /api/analytics/pharmacy-performance`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PharmacyPerformance {
    pub period_days: u32,
    pub pharmacies: Vec<PharmacyPerformanceRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PharmacyPerformanceRow {
    pub name: String,
    pub chain: Option<String>,
    pub network_tier: Option<String>,
    pub claims: u64,
    pub total_cost: f64,
    pub avg_cost: f64,
    pub denied_claims: u64,
    /// Percentage, already rounded by the server
    pub denial_rate: f64,
}

/// `GET /api/analytics/therapeutic-class`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TherapeuticClassBreakdown {
    pub period_days: u32,
    pub therapeutic_classes: Vec<TherapeuticClassRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TherapeuticClassRow {
    #[serde(rename = "class")]
    pub class_name: String,
    pub claims: u64,
    pub total_cost: f64,
    pub unique_members: u64,
    pub avg_cost_per_claim: f64,
}
