//! Generic-vs-brand split

use rxboard_models::{DrugCategory, GenericBrandRow};
use serde::Serialize;

use crate::format::{format_count, format_currency, format_percent, ratio};
use crate::series::SplitMeasure;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitSlice {
    pub category: DrugCategory,
    pub claims: u64,
    pub cost: f64,
    /// Fraction of all claims, 0..=1
    pub claim_share: f64,
    /// Fraction of total cost, 0..=1
    pub cost_share: f64,
}

impl SplitSlice {
    pub fn value(&self, measure: SplitMeasure) -> f64 {
        match measure {
            SplitMeasure::Claims => self.claims as f64,
            SplitMeasure::Cost => self.cost,
        }
    }

    pub fn share(&self, measure: SplitMeasure) -> f64 {
        match measure {
            SplitMeasure::Claims => self.claim_share,
            SplitMeasure::Cost => self.cost_share,
        }
    }

    /// Pie label, e.g. `Generic: 67%`
    pub fn label(&self, measure: SplitMeasure) -> String {
        format!(
            "{}: {}",
            self.category.as_str(),
            format_percent(self.share(measure) * 100.0, 0)
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenericBrandSplit {
    pub total_claims: u64,
    pub total_cost: f64,
    pub slices: Vec<SplitSlice>,
}

impl GenericBrandSplit {
    /// `15 total claims | $300.00 total cost`
    pub fn caption(&self) -> String {
        format!(
            "{} total claims | {} total cost",
            format_count(self.total_claims),
            format_currency(self.total_cost)
        )
    }

    pub fn slice(&self, category: DrugCategory) -> Option<&SplitSlice> {
        self.slices.iter().find(|s| s.category == category)
    }
}

/// Totals and per-category shares; a missing category is simply absent
pub fn split_generic_brand(rows: &[GenericBrandRow]) -> GenericBrandSplit {
    let total_claims: u64 = rows.iter().map(|r| r.claims).sum();
    let total_cost: f64 = rows.iter().map(|r| r.cost).sum();

    let slices = rows
        .iter()
        .map(|r| SplitSlice {
            category: r.category,
            claims: r.claims,
            cost: r.cost,
            claim_share: ratio(r.claims as f64, total_claims as f64),
            cost_share: ratio(r.cost, total_cost),
        })
        .collect();

    GenericBrandSplit {
        total_claims,
        total_cost,
        slices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(category: DrugCategory, claims: u64, cost: f64) -> GenericBrandRow {
        GenericBrandRow {
            category,
            claims,
            cost,
        }
    }

    #[test]
    fn test_totals_and_shares() {
        let split = split_generic_brand(&[
            row(DrugCategory::Generic, 10, 100.0),
            row(DrugCategory::Brand, 5, 200.0),
        ]);

        assert_eq!(split.total_claims, 15);
        assert_eq!(split.total_cost, 300.0);
        assert_eq!(split.caption(), "15 total claims | $300.00 total cost");

        let generic = split.slice(DrugCategory::Generic).unwrap();
        assert_eq!(generic.label(SplitMeasure::Claims), "Generic: 67%");
        assert_eq!(generic.label(SplitMeasure::Cost), "Generic: 33%");
        assert_eq!(generic.value(SplitMeasure::Cost), 100.0);
    }

    #[test]
    fn test_single_category() {
        let split = split_generic_brand(&[row(DrugCategory::Brand, 4, 80.0)]);
        assert!(split.slice(DrugCategory::Generic).is_none());
        assert_eq!(split.slices[0].claim_share, 1.0);
    }

    #[test]
    fn test_zero_totals_report_zero_share() {
        let split = split_generic_brand(&[
            row(DrugCategory::Generic, 0, 0.0),
            row(DrugCategory::Brand, 0, 0.0),
        ]);
        assert!(split.slices.iter().all(|s| s.claim_share == 0.0 && s.cost_share == 0.0));
        assert_eq!(split.slices[0].label(SplitMeasure::Claims), "Generic: 0%");
    }

    #[test]
    fn test_empty_input() {
        let split = split_generic_brand(&[]);
        assert_eq!(split, GenericBrandSplit::default());
        assert_eq!(split.caption(), "0 total claims | $0.00 total cost");
    }
}
