//! High-utilizer risk bucketing

use rxboard_models::HighUtilizer;
use serde::Serialize;

use crate::format::format_currency;

/// Total cost above which a member is high risk
pub const HIGH_RISK_COST: f64 = 5000.0;

/// Total cost above which a member is medium risk
pub const MEDIUM_RISK_COST: f64 = 2000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Both thresholds are exclusive
    pub fn from_total_cost(total_cost: f64) -> Self {
        if total_cost > HIGH_RISK_COST {
            RiskLevel::High
        } else if total_cost > MEDIUM_RISK_COST {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Badge text
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtilizerRow {
    pub member_id: String,
    pub name: String,
    pub claim_count: u64,
    pub total_cost: String,
    pub avg_cost_per_claim: String,
    pub risk: RiskLevel,
}

pub fn utilizer_rows(utilizers: &[HighUtilizer]) -> Vec<UtilizerRow> {
    utilizers
        .iter()
        .map(|u| UtilizerRow {
            member_id: u.member_id.clone(),
            name: u.name.clone(),
            claim_count: u.claim_count,
            total_cost: format_currency(u.total_cost),
            avg_cost_per_claim: format_currency(u.avg_cost_per_claim),
            risk: RiskLevel::from_total_cost(u.total_cost),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, RiskLevel::Low)]
    #[case(2000.0, RiskLevel::Low)]
    #[case(2001.0, RiskLevel::Medium)]
    #[case(5000.0, RiskLevel::Medium)]
    #[case(5001.0, RiskLevel::High)]
    #[case(5000.01, RiskLevel::High)]
    fn test_risk_boundaries(#[case] total_cost: f64, #[case] expected: RiskLevel) {
        assert_eq!(RiskLevel::from_total_cost(total_cost), expected);
    }

    #[test]
    fn test_rows_keep_server_order() {
        let rows = utilizer_rows(&[
            HighUtilizer {
                member_id: "M0007".into(),
                name: "Ada Lovelace".into(),
                claim_count: 14,
                total_cost: 6200.0,
                avg_cost_per_claim: 442.857,
            },
            HighUtilizer {
                member_id: "M0003".into(),
                name: "Alan Turing".into(),
                claim_count: 6,
                total_cost: 900.0,
                avg_cost_per_claim: 150.0,
            },
        ]);

        assert_eq!(rows[0].risk, RiskLevel::High);
        assert_eq!(rows[0].risk.as_str(), "HIGH");
        assert_eq!(rows[0].avg_cost_per_claim, "$442.86");
        assert_eq!(rows[1].risk, RiskLevel::Low);
        assert_eq!(rows[1].total_cost, "$900.00");
    }

    #[test]
    fn test_empty_input() {
        assert!(utilizer_rows(&[]).is_empty());
    }

    #[test]
    fn test_row_serializes_risk_in_snake_case() {
        let rows = utilizer_rows(&[HighUtilizer {
            member_id: "M0001".into(),
            total_cost: 2500.0,
            ..Default::default()
        }]);

        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["risk"], "medium");
        assert_eq!(json["total_cost"], "$2,500.00");
    }
}
