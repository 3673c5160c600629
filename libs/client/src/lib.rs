//! PBM backend client
//!
//! Data layer of the PBM administrative dashboard: a typed gateway to the
//! REST backend, one service per resource, and a de-duplicating query cache
//! that keeps reads consistent after writes.
//!
//! # Layers
//!
//! - [`gateway`]: [`ApiClient`] and the [`Transport`] seam, with
//!   [`HttpTransport`] as the `reqwest` implementation
//! - [`services`]: uncached CRUD for claims, members, drugs and pharmacies,
//!   plus the read-only analytics reports
//! - [`query`]: [`QueryCache`], keys, invalidation and the stale-response
//!   guard used by list screens
//! - [`RxClient`]: the cached facade the presentation layer uses
//!
//! # Example
//!
//! ```rust,no_run
//! use rxboard_client::{ApiConfig, CacheConfig, RxClient};
//! use rxboard_models::{ClaimQuery, ClaimStatus};
//!
//! # async fn run() -> rxboard_client::Result<()> {
//! let client = RxClient::new(&ApiConfig::default(), &CacheConfig::default())?;
//!
//! let denied = client
//!     .claims()
//!     .list(&ClaimQuery::default().with_status(ClaimStatus::Denied))
//!     .await?;
//! println!("{} denied claims", denied.total);
//!
//! // Invalidates cached claims and analytics
//! client.claims().update_status(42, ClaimStatus::Paid).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod query;
pub mod services;

pub use client::{CachedAnalytics, CachedResource, RxClient};
pub use config::{ApiConfig, CacheConfig, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use gateway::{ApiClient, ApiRequest, Method, QueryParams, RequestOptions, Transport};
pub use http::HttpTransport;
pub use query::{
    ListController, PendingList, QueryCache, QueryKey, QueryState, RequestTracker, Ticket,
    ViewPhase, ViewState,
};
pub use services::{
    AnalyticsService, ClaimService, DrugService, MemberService, PharmacyService, Resource,
    ResourceService,
};
