//! Query layer: keyed caching, invalidation and stale-response guarding

pub mod cache;
pub mod invalidation;
pub mod key;
pub mod tracker;
pub mod view;

pub use cache::{QueryCache, QueryState};
pub use key::QueryKey;
pub use tracker::{RequestTracker, Ticket};
pub use view::{ListController, PendingList, ViewPhase, ViewState};
