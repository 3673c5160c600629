//! Resource services
//!
//! One service per backend resource. Each maps the resource's REST routes to
//! typed operations and normalizes list envelopes into [`Page`], so nothing
//! downstream needs to know which array key a resource uses.
//!
//! Services are uncached; [`RxClient`](crate::RxClient) layers the query
//! cache on top of them.

pub mod analytics;
pub mod claims;
pub mod drugs;
pub mod members;
pub mod pharmacies;

use std::fmt;
use std::marker::PhantomData;

use rxboard_models::{Page, PagedQuery};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::gateway::ApiClient;

pub use analytics::AnalyticsService;
pub use claims::ClaimService;
pub use drugs::DrugService;
pub use members::MemberService;
pub use pharmacies::PharmacyService;

/// Per-resource adapter between the REST routes and the typed record
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// URL segment under `/api` and cache partition name
    const NAME: &'static str;

    /// Array key used by the list envelope
    const COLLECTION_KEY: &'static str;

    /// List filters
    type Query: Serialize + PagedQuery + Clone + fmt::Debug + Send + Sync + 'static;

    /// Partial write payload
    type Draft: Serialize + fmt::Debug + Send + Sync;

    /// Server-assigned id; keys the cached detail entry
    fn id(&self) -> i64;
}

/// CRUD operations shared by every resource
pub struct ResourceService<R> {
    api: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R> fmt::Debug for ResourceService<R>
where
    R: Resource,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceService")
            .field("resource", &R::NAME)
            .finish()
    }
}

impl<R: Resource> ResourceService<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    pub(crate) fn api(&self) -> &ApiClient {
        &self.api
    }

    pub(crate) fn collection_path() -> String {
        format!("/api/{}", R::NAME)
    }

    pub(crate) fn record_path(id: i64) -> String {
        format!("/api/{}/{}", R::NAME, id)
    }

    /// One page of records matching `query`
    pub async fn list(&self, query: &R::Query) -> Result<Page<R>> {
        let body = self.api.get_value(&Self::collection_path(), query).await?;
        Ok(Page::from_envelope(
            body,
            R::COLLECTION_KEY,
            query.page_request(),
        )?)
    }

    /// Fails with [`Error::NotFound`] when the server answers 404
    pub async fn get(&self, id: i64) -> Result<R> {
        validate_id(R::NAME, id)?;
        self.api
            .get(&Self::record_path(id), &())
            .await
            .map_err(|e| e.for_record(R::NAME, id))
    }

    pub async fn create(&self, draft: &R::Draft) -> Result<R> {
        self.api.post(&Self::collection_path(), draft).await
    }

    pub async fn update(&self, id: i64, draft: &R::Draft) -> Result<R> {
        validate_id(R::NAME, id)?;
        self.api
            .put(&Self::record_path(id), draft)
            .await
            .map_err(|e| e.for_record(R::NAME, id))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        validate_id(R::NAME, id)?;
        self.api
            .delete(&Self::record_path(id))
            .await
            .map_err(|e| e.for_record(R::NAME, id))
    }
}

/// Record ids are positive integers assigned by the server
pub(crate) fn validate_id(resource: &str, id: i64) -> Result<()> {
    if id <= 0 {
        return Err(Error::Validation(format!(
            "{resource} id must be a positive integer, got {id}"
        )));
    }
    Ok(())
}
