//! Generic substitution savings

use rxboard_models::GenericSavings;
use serde::Serialize;

use crate::format::{format_count, format_currency};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsRow {
    pub brand_name: String,
    pub generic_name: String,
    pub brand_claims: String,
    pub avg_brand_cost: String,
    pub avg_generic_cost: String,
    pub potential_savings: String,
    pub savings_per_claim: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsOverview {
    pub period_days: u32,
    pub total_potential_savings: String,
    pub opportunity_count: usize,
    pub rows: Vec<SavingsRow>,
}

/// Server values formatted as-is; nothing is recomputed
pub fn savings_overview(report: &GenericSavings) -> SavingsOverview {
    let rows = report
        .opportunities
        .iter()
        .map(|o| SavingsRow {
            brand_name: o.brand_name.clone(),
            generic_name: o.generic_name.clone(),
            brand_claims: format_count(o.brand_claims),
            avg_brand_cost: format_currency(o.avg_brand_cost),
            avg_generic_cost: format_currency(o.avg_generic_cost),
            potential_savings: format_currency(o.potential_savings),
            savings_per_claim: format_currency(o.savings_per_claim),
        })
        .collect::<Vec<_>>();

    SavingsOverview {
        period_days: report.period_days,
        total_potential_savings: format_currency(report.total_potential_savings),
        opportunity_count: rows.len(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rxboard_models::SavingsOpportunity;

    #[test]
    fn test_pass_through_formatting() {
        let overview = savings_overview(&GenericSavings {
            period_days: 90,
            total_potential_savings: 12_480.5,
            opportunities: vec![SavingsOpportunity {
                brand_name: "Lipitor".into(),
                generic_name: "Atorvastatin".into(),
                brand_claims: 1200,
                avg_brand_cost: 250.0,
                avg_generic_cost: 12.5,
                potential_savings: 12_480.5,
                // Not derived from the averages
                savings_per_claim: 10.4,
            }],
        });

        assert_eq!(overview.total_potential_savings, "$12,480.50");
        assert_eq!(overview.opportunity_count, 1);
        let row = &overview.rows[0];
        assert_eq!(row.brand_claims, "1,200");
        assert_eq!(row.avg_generic_cost, "$12.50");
        assert_eq!(row.savings_per_claim, "$10.40");
    }

    #[test]
    fn test_empty_report() {
        let overview = savings_overview(&GenericSavings::default());
        assert_eq!(overview.opportunity_count, 0);
        assert_eq!(overview.total_potential_savings, "$0.00");
        assert!(overview.rows.is_empty());
    }
}
