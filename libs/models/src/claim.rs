//! Pharmacy claim records

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::page::{PageRequest, PagedQuery};

/// Adjudication status of a claim
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    #[default]
    Pending,
    Approved,
    Paid,
    Denied,
    Reversed,
}

impl ClaimStatus {
    pub const ALL: [ClaimStatus; 5] = [
        ClaimStatus::Pending,
        ClaimStatus::Approved,
        ClaimStatus::Paid,
        ClaimStatus::Denied,
        ClaimStatus::Reversed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Paid => "paid",
            ClaimStatus::Denied => "denied",
            ClaimStatus::Reversed => "reversed",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClaimStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidFieldValue(format!("unknown claim status '{s}'")))
    }
}

/// Prescribing provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prescriber {
    pub npi: Option<String>,
    pub name: Option<String>,
}

/// Pricing components of a claim.
///
/// `total_cost` is the authoritative figure; it is never derived from the
/// other components on the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pricing {
    pub submitted_amount: Option<f64>,
    pub ingredient_cost: Option<f64>,
    pub dispensing_fee: Option<f64>,
    pub sales_tax: Option<f64>,
    pub plan_paid_amount: Option<f64>,
    pub member_copay: Option<f64>,
    pub member_coinsurance: Option<f64>,
    pub deductible_applied: Option<f64>,
    pub total_cost: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimFlags {
    pub is_generic_substitution: bool,
    pub requires_prior_auth: bool,
    pub is_compound: bool,
    pub is_specialty: bool,
}

/// A pharmacy claim event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Claim {
    pub id: i64,
    pub claim_number: String,
    pub rx_number: Option<String>,
    pub member_id: i64,
    /// Denormalized display fields added by the backend
    pub member_name: Option<String>,
    pub drug_id: i64,
    pub drug_name: Option<String>,
    pub drug_generic_name: Option<String>,
    pub is_generic: Option<bool>,
    pub pharmacy_id: i64,
    pub fill_date: Option<NaiveDate>,
    pub quantity: Option<f64>,
    pub days_supply: Option<i32>,
    pub refills_authorized: Option<i32>,
    pub refill_number: Option<i32>,
    pub prescriber: Prescriber,
    pub pricing: Pricing,
    pub status: ClaimStatus,
    pub rejection_code: Option<String>,
    pub rejection_reason: Option<String>,
    pub flags: ClaimFlags,
    pub submitted_at: Option<NaiveDateTime>,
    pub processed_at: Option<NaiveDateTime>,
    pub paid_at: Option<NaiveDateTime>,
}

impl Claim {
    /// Rejection code and reason, only meaningful on denied claims
    pub fn rejection(&self) -> Option<(&str, &str)> {
        if self.status != ClaimStatus::Denied {
            return None;
        }
        Some((
            self.rejection_code.as_deref().unwrap_or(""),
            self.rejection_reason.as_deref().unwrap_or(""),
        ))
    }

    pub fn total_cost(&self) -> f64 {
        self.pricing.total_cost.unwrap_or(0.0)
    }
}

/// Filters for `GET /api/claims`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimQuery {
    #[serde(flatten)]
    pub page: PageRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ClaimStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl ClaimQuery {
    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_member(mut self, member_id: i64) -> Self {
        self.member_id = Some(member_id);
        self
    }

    pub fn with_fill_dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }
}

impl PagedQuery for ClaimQuery {
    fn page_request(&self) -> PageRequest {
        self.page
    }

    fn set_page(&mut self, page: u32) {
        self.page.set_page(page);
    }
}

/// Partial claim payload for create and update.
///
/// The write side of the backend takes pricing, prescriber and flag fields
/// flat rather than nested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rx_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drug_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pharmacy_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_supply: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refills_authorized: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refill_number: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prescriber_npi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prescriber_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredient_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispensing_fee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_tax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_paid_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_copay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_coinsurance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deductible_applied: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ClaimStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_generic_substitution: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_prior_auth: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_compound: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_specialty: Option<bool>,
}

impl ClaimDraft {
    /// Draft that only changes the status
    pub fn status(status: ClaimStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}
