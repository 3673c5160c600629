//! Paginated envelope and paging parameters
//!
//! Every list endpoint answers with the same envelope, except that the array
//! sits under a resource-specific key (`claims`, `members`, `drugs`,
//! `pharmacies`). [`Page::from_envelope`] takes that key and produces the
//! uniform [`Page`] shape.
//!
//! The normalized contract is `pages == max(1, ceil(total / per_page))` and
//! `1 <= current_page <= pages`. The backend's own `pages` value is not
//! trusted: it reports `0` for an empty result set.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Page number and size sent with every list request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    /// Both values are raised to at least 1
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    pub fn first(per_page: u32) -> Self {
        Self::new(DEFAULT_PAGE, per_page)
    }
}

/// List filters that carry a [`PageRequest`]
pub trait PagedQuery {
    fn page_request(&self) -> PageRequest;

    fn set_page(&mut self, page: u32);
}

impl PagedQuery for PageRequest {
    fn page_request(&self) -> PageRequest {
        *self
    }

    fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }
}

/// Number of pages for `total` items, never less than one
pub fn page_count(total: u64, per_page: u32) -> u32 {
    let per_page = u64::from(per_page.max(1));
    let pages = total.div_ceil(per_page).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Uniform paginated result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub pages: u32,
    pub current_page: u32,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            pages: 1,
            current_page: 1,
        }
    }

    /// Build a page that satisfies the envelope invariants.
    ///
    /// `items` beyond `per_page` are dropped and `current_page` is clamped
    /// into `1..=pages`.
    pub fn normalize(mut items: Vec<T>, total: u64, per_page: u32, current_page: u32) -> Self {
        let per_page = per_page.max(1);
        let pages = page_count(total, per_page);
        items.truncate(per_page as usize);

        Self {
            items,
            total,
            pages,
            current_page: current_page.clamp(1, pages),
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            pages: self.pages,
            current_page: self.current_page,
        }
    }
}

impl<T: DeserializeOwned> Page<T> {
    /// Normalize a raw list response.
    ///
    /// The array is read from `collection_key`, falling back to `items` for
    /// endpoints that already use the uniform name. A missing `total` is
    /// taken as the number of items received and a missing `current_page` as
    /// the requested page.
    pub fn from_envelope(body: Value, collection_key: &str, request: PageRequest) -> Result<Self> {
        let Value::Object(mut envelope) = body else {
            return Err(Error::InvalidFieldValue(format!(
                "paginated '{collection_key}' response is not a JSON object"
            )));
        };

        let raw_items = envelope
            .remove(collection_key)
            .or_else(|| envelope.remove("items"))
            .ok_or_else(|| Error::MissingField(collection_key.to_string()))?;
        let items: Vec<T> = serde_json::from_value(raw_items)?;

        let total = envelope
            .get("total")
            .and_then(Value::as_u64)
            .unwrap_or(items.len() as u64);
        let current_page = envelope
            .get("current_page")
            .and_then(Value::as_u64)
            .map(|page| u32::try_from(page).unwrap_or(u32::MAX))
            .unwrap_or(request.page);

        Ok(Self::normalize(items, total, request.per_page, current_page))
    }
}
