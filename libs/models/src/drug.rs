//! Drug catalog records

use serde::{Deserialize, Serialize};

use crate::page::{PageRequest, PagedQuery};

/// Catalog entry keyed by NDC
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Drug {
    pub id: i64,
    /// National Drug Code, unique per product
    pub ndc: String,
    pub name: String,
    pub generic_name: Option<String>,
    pub brand_name: Option<String>,
    pub is_generic: bool,
    pub therapeutic_class: Option<String>,
    pub drug_class: Option<String>,
    pub strength: Option<String>,
    pub dosage_form: Option<String>,
    pub route: Option<String>,
    pub manufacturer: Option<String>,
    /// Average Wholesale Price
    pub awp: Option<f64>,
    pub package_size: Option<f64>,
    pub is_active: bool,
}

/// Filters for `GET /api/drugs`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrugQuery {
    #[serde(flatten)]
    pub page: PageRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_generic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub therapeutic_class: Option<String>,
}

impl DrugQuery {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_generic(mut self, is_generic: bool) -> Self {
        self.is_generic = Some(is_generic);
        self
    }

    pub fn with_therapeutic_class(mut self, class: impl Into<String>) -> Self {
        self.therapeutic_class = Some(class.into());
        self
    }
}

impl PagedQuery for DrugQuery {
    fn page_request(&self) -> PageRequest {
        self.page
    }

    fn set_page(&mut self, page: u32) {
        self.page.set_page(page);
    }
}

/// Partial drug payload for create and update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrugDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ndc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generic_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_generic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub therapeutic_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drug_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage_form: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub awp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Response of `GET /api/drugs/search`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrugSearchResults {
    pub query: String,
    pub results: Vec<Drug>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_drug_defaults_for_sparse_json() {
        let drug: Drug = serde_json::from_value(json!({
            "id": 11,
            "ndc": "00093-7146-56",
            "name": "Atorvastatin 20mg",
            "is_generic": true,
            "awp": 12.5
        }))
        .unwrap();
        assert_eq!(drug.ndc, "00093-7146-56");
        assert_eq!(drug.awp, Some(12.5));
        assert!(drug.brand_name.is_none());
        assert!(!drug.is_active);
    }

    #[test]
    fn test_drug_query_builder() {
        let query = DrugQuery::default()
            .with_generic(false)
            .with_therapeutic_class("Statins");
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(
            value,
            json!({"page": 1, "per_page": 20, "is_generic": false, "therapeutic_class": "Statins"})
        );
    }
}
