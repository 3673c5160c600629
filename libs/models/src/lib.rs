//! PBM data models
//!
//! Strongly-typed Rust structures for the records and aggregates served by the
//! PBM administrative backend.
//!
//! # Module Organization
//!
//! - `member`, `drug`, `pharmacy`, `claim`: record types, list filters and
//!   partial write payloads for each resource
//! - `page`: the uniform paginated envelope and paging parameters
//! - `analytics`: read-only aggregate payloads (dashboard, trends, reports)
//!
//! The backend emits `null` for most optional columns, so nearly every field
//! of a record is an `Option`. Server-authoritative values (for example
//! `Pricing::total_cost`) are carried as-is and never recomputed.
//!
//! # Example
//!
//! ```rust
//! use rxboard_models::{Claim, ClaimStatus, Page, PageRequest};
//! use serde_json::json;
//!
//! let body = json!({
//!     "claims": [{"id": 7, "claim_number": "CLM-7", "status": "paid"}],
//!     "total": 1,
//!     "pages": 1,
//!     "current_page": 1
//! });
//!
//! let page: Page<Claim> = Page::from_envelope(body, "claims", PageRequest::default()).unwrap();
//! assert_eq!(page.items[0].status, ClaimStatus::Paid);
//! assert_eq!(page.pages, 1);
//! ```

pub mod analytics;
pub mod claim;
pub mod common;
pub mod drug;
pub mod error;
pub mod member;
pub mod page;
pub mod pharmacy;

// Re-export commonly used types
pub use analytics::*;
pub use claim::*;
pub use common::{Address, DateRange, Location};
pub use drug::*;
pub use error::{Error, Result};
pub use member::*;
pub use page::{page_count, Page, PageRequest, PagedQuery, DEFAULT_PAGE, DEFAULT_PER_PAGE};
pub use pharmacy::*;
