//! Presentation-side request state
//!
//! [`ViewState`] is what a screen renders from: the last applied data, the
//! last error and whether a request is outstanding. [`ListController`] drives
//! a paginated list: it owns the current filters and hands out the query to
//! run next together with the ticket its result must present.

use std::sync::Arc;

use rxboard_models::{Page, PagedQuery};

use super::tracker::{RequestTracker, Ticket};
use crate::error::{Error, Result};
use crate::services::Resource;

/// What to render for one view
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewPhase<'a, T> {
    /// Nothing requested yet
    Idle,
    /// First load in progress
    Loading,
    Failed(&'a Error),
    Ready(&'a T),
}

#[derive(Debug)]
pub struct ViewState<T> {
    data: Option<Arc<T>>,
    error: Option<Error>,
    loading: bool,
    tracker: RequestTracker,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            loading: false,
            tracker: RequestTracker::new(),
        }
    }
}

impl<T> ViewState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request; its result must be applied with the returned ticket
    pub fn begin(&mut self) -> Ticket {
        self.loading = true;
        self.tracker.issue()
    }

    /// Apply a result if `ticket` is still the latest request.
    ///
    /// Returns `false` when the result was superseded and discarded. A failed
    /// request keeps the previously loaded data next to the error.
    pub fn apply(&mut self, ticket: Ticket, result: Result<Arc<T>>) -> bool {
        if !self.tracker.is_current(ticket) {
            tracing::debug!(
                ticket = ticket.sequence(),
                "Discarding superseded response"
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(error) => self.error = Some(error),
        }
        true
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_deref()
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn phase(&self) -> ViewPhase<'_, T> {
        if let Some(error) = &self.error {
            return ViewPhase::Failed(error);
        }
        match (&self.data, self.loading) {
            (Some(data), _) => ViewPhase::Ready(data),
            (None, true) => ViewPhase::Loading,
            (None, false) => ViewPhase::Idle,
        }
    }
}

/// A list query waiting to be run
#[derive(Debug, Clone, PartialEq)]
pub struct PendingList<Q> {
    pub ticket: Ticket,
    pub query: Q,
}

/// Paging and filtering state of one resource list
#[derive(Debug)]
pub struct ListController<R: Resource> {
    query: R::Query,
    view: ViewState<Page<R>>,
}

impl<R: Resource> ListController<R> {
    pub fn new(query: R::Query) -> Self {
        Self {
            query,
            view: ViewState::new(),
        }
    }

    pub fn query(&self) -> &R::Query {
        &self.query
    }

    pub fn view(&self) -> &ViewState<Page<R>> {
        &self.view
    }

    fn pending(&mut self) -> PendingList<R::Query> {
        PendingList {
            ticket: self.view.begin(),
            query: self.query.clone(),
        }
    }

    /// Reload the current page with the current filters
    pub fn refresh(&mut self) -> PendingList<R::Query> {
        self.pending()
    }

    pub fn go_to_page(&mut self, page: u32) -> PendingList<R::Query> {
        self.query.set_page(page);
        self.pending()
    }

    /// Next page, if the last loaded page says there is one
    pub fn next_page(&mut self) -> Option<PendingList<R::Query>> {
        let current = self.view.data()?;
        if !current.has_next() {
            return None;
        }
        let page = current.current_page + 1;
        Some(self.go_to_page(page))
    }

    pub fn previous_page(&mut self) -> Option<PendingList<R::Query>> {
        let current = self.view.data()?;
        if !current.has_previous() {
            return None;
        }
        let page = current.current_page - 1;
        Some(self.go_to_page(page))
    }

    /// Change filters; the list restarts at page 1
    pub fn update_filter(&mut self, change: impl FnOnce(&mut R::Query)) -> PendingList<R::Query> {
        change(&mut self.query);
        self.query.set_page(1);
        self.pending()
    }

    pub fn apply(&mut self, ticket: Ticket, result: Result<Arc<Page<R>>>) -> bool {
        self.view.apply(ticket, result)
    }
}
