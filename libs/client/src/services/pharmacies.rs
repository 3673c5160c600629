//! Pharmacy network service

use rxboard_models::{Pharmacy, PharmacyDraft, PharmacyQuery};

use super::{Resource, ResourceService};

pub type PharmacyService = ResourceService<Pharmacy>;

impl Resource for Pharmacy {
    const NAME: &'static str = "pharmacies";
    const COLLECTION_KEY: &'static str = "pharmacies";

    type Query = PharmacyQuery;
    type Draft = PharmacyDraft;

    fn id(&self) -> i64 {
        self.id
    }
}
