//! Top drugs by cost

use rxboard_models::TopDrug;
use serde::Serialize;

use crate::series::TopDrugSeries;

pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopDrugRow {
    /// 1-based position in the server's ordering
    pub rank: usize,
    pub name: String,
    pub is_generic: bool,
    pub claims: u64,
    pub total_cost: f64,
}

impl TopDrugRow {
    pub fn value(&self, series: TopDrugSeries) -> f64 {
        match series {
            TopDrugSeries::TotalCost => self.total_cost,
            TopDrugSeries::Claims => self.claims as f64,
        }
    }

    /// Tooltip heading
    pub fn title(&self) -> String {
        format!("Drug: {}", self.name)
    }

    pub fn kind(&self) -> &'static str {
        if self.is_generic {
            "Generic"
        } else {
            "Brand"
        }
    }
}

/// First `limit` drugs; the list is already sorted by cost
pub fn top_drugs(drugs: &[TopDrug], limit: usize) -> Vec<TopDrugRow> {
    drugs
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, d)| TopDrugRow {
            rank: i + 1,
            name: d.name.clone(),
            is_generic: d.is_generic,
            claims: d.claims,
            total_cost: d.total_cost,
        })
        .collect()
}
