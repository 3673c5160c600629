//! Claims service

use rxboard_models::{Claim, ClaimDraft, ClaimQuery, ClaimStatus};

use super::{Resource, ResourceService};
use crate::error::Result;

pub type ClaimService = ResourceService<Claim>;

impl Resource for Claim {
    const NAME: &'static str = "claims";
    const COLLECTION_KEY: &'static str = "claims";

    type Query = ClaimQuery;
    type Draft = ClaimDraft;

    fn id(&self) -> i64 {
        self.id
    }
}

impl ResourceService<Claim> {
    /// Move a claim to `status`; the server stamps processed/paid times
    pub async fn update_status(&self, id: i64, status: ClaimStatus) -> Result<Claim> {
        self.update(id, &ClaimDraft::status(status)).await
    }
}
