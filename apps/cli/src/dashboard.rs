//! Analytics dashboard screen
//!
//! Every panel has its own [`ViewState`], so one failing report shows an
//! inline error while the others still render.

use std::sync::Arc;

use rxboard_client::{Result, RxClient, Ticket, ViewState};
use rxboard_models::{DashboardStats, GenericSavings, HighUtilizers, TrendReport};

use crate::render::render_view;
use crate::reports;

#[derive(Debug, Default)]
pub struct DashboardScreen {
    pub stats: ViewState<DashboardStats>,
    pub trends: ViewState<TrendReport>,
    pub utilizers: ViewState<HighUtilizers>,
    pub savings: ViewState<GenericSavings>,
}

/// Raw results of one dashboard load
pub struct DashboardData {
    pub stats: Result<Arc<DashboardStats>>,
    pub trends: Result<Arc<TrendReport>>,
    pub utilizers: Result<Arc<HighUtilizers>>,
    pub savings: Result<Arc<GenericSavings>>,
}

/// Tickets for one round of panel requests
#[derive(Debug, Clone, Copy)]
pub struct DashboardTickets {
    stats: Ticket,
    trends: Ticket,
    utilizers: Ticket,
    savings: Ticket,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request all panels concurrently and apply whatever comes back
    pub async fn load(&mut self, client: &RxClient, days: Option<u32>) {
        let tickets = self.begin();

        let analytics = client.analytics();
        let (stats, trends, utilizers, savings) = futures::join!(
            analytics.dashboard(days),
            analytics.trends(days),
            analytics.high_utilizers(days, None),
            analytics.generic_savings(days),
        );

        self.apply(
            tickets,
            DashboardData {
                stats,
                trends,
                utilizers,
                savings,
            },
        );
    }

    /// Mark every panel loading; results must come back with these tickets
    pub fn begin(&mut self) -> DashboardTickets {
        DashboardTickets {
            stats: self.stats.begin(),
            trends: self.trends.begin(),
            utilizers: self.utilizers.begin(),
            savings: self.savings.begin(),
        }
    }

    /// Apply one round of results; panels reloaded since `tickets` were
    /// issued keep their newer state. Returns the number of panels applied.
    pub fn apply(&mut self, tickets: DashboardTickets, data: DashboardData) -> usize {
        [
            self.stats.apply(tickets.stats, data.stats),
            self.trends.apply(tickets.trends, data.trends),
            self.utilizers.apply(tickets.utilizers, data.utilizers),
            self.savings.apply(tickets.savings, data.savings),
        ]
        .into_iter()
        .filter(|applied| *applied)
        .count()
    }

    /// Number of panels that failed to load
    pub fn failures(&self) -> usize {
        [
            self.stats.error().is_some(),
            self.trends.error().is_some(),
            self.utilizers.error().is_some(),
            self.savings.error().is_some(),
        ]
        .into_iter()
        .filter(|failed| *failed)
        .count()
    }

    pub fn render(&self) -> String {
        let sections = [
            render_view("Summary", &self.stats, reports::stats_section),
            render_view("Claims by Status", &self.stats, |s| {
                reports::status_section(&s.status_breakdown)
            }),
            render_view("Generic vs Brand", &self.stats, |s| {
                reports::split_section(&s.generic_vs_brand)
            }),
            render_view("Top Drugs by Cost", &self.stats, |s| {
                reports::top_drugs_section(&s.top_drugs)
            }),
            render_view("Cost Trends", &self.trends, reports::trends_section),
            render_view("High Utilizers", &self.utilizers, reports::utilizers_section),
            render_view("Generic Savings", &self.savings, reports::savings_section),
        ];
        sections.join("\n")
    }
}
