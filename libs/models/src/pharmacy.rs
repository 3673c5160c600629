//! Pharmacy network records

use serde::{Deserialize, Serialize};

use crate::common::{Address, Location};
use crate::page::{PageRequest, PagedQuery};

/// Network pharmacy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pharmacy {
    pub id: i64,
    pub ncpdp_id: String,
    pub npi: Option<String>,
    pub name: String,
    pub chain_name: Option<String>,
    pub phone: Option<String>,
    pub address: Address,
    pub location: Location,
    pub pharmacy_type: Option<String>,
    pub is_24_hours: bool,
    pub in_network: bool,
    pub network_tier: Option<String>,
    pub is_active: bool,
}

/// Filters for `GET /api/pharmacies`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PharmacyQuery {
    #[serde(flatten)]
    pub page: PageRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_network: Option<bool>,
}

impl PharmacyQuery {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_in_network(mut self, in_network: bool) -> Self {
        self.in_network = Some(in_network);
        self
    }
}

impl PagedQuery for PharmacyQuery {
    fn page_request(&self) -> PageRequest {
        self.page
    }

    fn set_page(&mut self, page: u32) {
        self.page.set_page(page);
    }
}

/// Partial pharmacy payload for create and update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PharmacyDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ncpdp_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub npi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pharmacy_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_24_hours: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_network: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_tier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pharmacy_location_nulls() {
        let pharmacy: Pharmacy = serde_json::from_value(json!({
            "id": 4,
            "ncpdp_id": "1234567",
            "name": "Corner Drug",
            "location": {"latitude": null, "longitude": -97.74},
            "in_network": true,
            "network_tier": "preferred"
        }))
        .unwrap();
        assert!(pharmacy.location.latitude.is_none());
        assert_eq!(pharmacy.location.longitude, Some(-97.74));
        assert!(pharmacy.in_network);
    }
}
