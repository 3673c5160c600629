//! Drug catalog service

use rxboard_models::{Drug, DrugDraft, DrugQuery, DrugSearchResults};
use serde::Serialize;

use super::{Resource, ResourceService};
use crate::error::{Error, Result};

pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

pub type DrugService = ResourceService<Drug>;

impl Resource for Drug {
    const NAME: &'static str = "drugs";
    const COLLECTION_KEY: &'static str = "drugs";

    type Query = DrugQuery;
    type Draft = DrugDraft;

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SearchParams<'a> {
    pub q: &'a str,
    pub limit: u32,
}

impl<'a> SearchParams<'a> {
    pub(crate) fn new(query: &'a str, limit: Option<u32>) -> Result<Self> {
        let q = query.trim();
        if q.is_empty() {
            return Err(Error::Validation("drug search query is required".to_string()));
        }
        Ok(Self {
            q,
            limit: limit.unwrap_or(DEFAULT_SEARCH_LIMIT).max(1),
        })
    }
}

impl ResourceService<Drug> {
    /// Name search across brand and generic names, active drugs only
    pub async fn search(&self, query: &str, limit: Option<u32>) -> Result<Vec<Drug>> {
        let params = SearchParams::new(query, limit)?;
        let results: DrugSearchResults = self
            .api()
            .get(&format!("{}/search", Self::collection_path()), &params)
            .await?;
        Ok(results.results)
    }
}
