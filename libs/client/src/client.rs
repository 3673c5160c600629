//! Cached facade over the resource services
//!
//! [`RxClient`] is what the presentation layer talks to. Reads go through the
//! shared [`QueryCache`]; successful mutations invalidate the mutated
//! resource and every partition derived from it.

use std::future::Future;
use std::sync::Arc;

use rxboard_models::{
    Claim, ClaimStatus, CostSummaryReport, DashboardStats, DateRange, Drug, GenericSavings,
    HighUtilizers, Member, MemberSummary, Page, PageRequest, Pharmacy, PharmacyPerformance,
    TherapeuticClassBreakdown, TrendReport,
};

use crate::config::{ApiConfig, CacheConfig};
use crate::error::Result;
use crate::gateway::ApiClient;
use crate::query::invalidation::{self, ANALYTICS};
use crate::query::{QueryCache, QueryKey};
use crate::services::analytics::{
    validate_range, UtilizerWindow, Window, DASHBOARD_DAYS, GENERIC_SAVINGS_DAYS,
    HIGH_UTILIZER_DAYS, HIGH_UTILIZER_MIN_CLAIMS, MEMBER_SUMMARY_DAYS,
    PHARMACY_PERFORMANCE_DAYS, THERAPEUTIC_CLASS_DAYS, TRENDS_DAYS,
};
use crate::services::drugs::SearchParams;
use crate::services::{validate_id, AnalyticsService, Resource, ResourceService};

/// Entry point for the dashboard's data needs
#[derive(Debug, Clone)]
pub struct RxClient {
    api: ApiClient,
    cache: QueryCache,
}

impl RxClient {
    pub fn new(api: &ApiConfig, cache: &CacheConfig) -> Result<Self> {
        Ok(Self::with_parts(ApiClient::new(api)?, QueryCache::new(cache)))
    }

    pub fn with_parts(api: ApiClient, cache: QueryCache) -> Self {
        Self { api, cache }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn claims(&self) -> CachedResource<Claim> {
        self.resource()
    }

    pub fn members(&self) -> CachedResource<Member> {
        self.resource()
    }

    pub fn drugs(&self) -> CachedResource<Drug> {
        self.resource()
    }

    pub fn pharmacies(&self) -> CachedResource<Pharmacy> {
        self.resource()
    }

    pub fn analytics(&self) -> CachedAnalytics {
        CachedAnalytics {
            service: AnalyticsService::new(self.api.clone()),
            cache: self.cache.clone(),
        }
    }

    /// Forget every cached read
    pub async fn reset(&self) {
        self.cache.clear().await;
    }

    fn resource<R: Resource>(&self) -> CachedResource<R> {
        CachedResource {
            service: ResourceService::new(self.api.clone()),
            cache: self.cache.clone(),
        }
    }
}

/// Cached reads and invalidating writes for one resource
#[derive(Debug, Clone)]
pub struct CachedResource<R: Resource> {
    service: ResourceService<R>,
    cache: QueryCache,
}

impl<R: Resource> CachedResource<R> {
    /// The uncached service underneath
    pub fn service(&self) -> &ResourceService<R> {
        &self.service
    }

    pub fn list_key(query: &R::Query) -> Result<QueryKey> {
        QueryKey::with_params(R::NAME, "list", query)
    }

    pub fn detail_key(id: i64) -> QueryKey {
        QueryKey::new(R::NAME, "detail").param("id", id)
    }

    pub async fn list(&self, query: &R::Query) -> Result<Arc<Page<R>>> {
        let key = Self::list_key(query)?;
        let service = self.service.clone();
        let query = query.clone();
        self.cache
            .fetch(key, move || async move { service.list(&query).await })
            .await
    }

    /// Reload a list even if the cached copy is fresh
    pub async fn refresh_list(&self, query: &R::Query) -> Result<Arc<Page<R>>> {
        let key = Self::list_key(query)?;
        let service = self.service.clone();
        let query = query.clone();
        self.cache
            .refetch(key, move || async move { service.list(&query).await })
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Arc<R>> {
        validate_id(R::NAME, id)?;
        let service = self.service.clone();
        self.cache
            .fetch(Self::detail_key(id), move || async move {
                service.get(id).await
            })
            .await
    }

    /// Create a record; the returned record is cached as its detail entry
    pub async fn create(&self, draft: &R::Draft) -> Result<R> {
        let created = self.service.create(draft).await?;
        self.written(&created).await;
        Ok(created)
    }

    pub async fn update(&self, id: i64, draft: &R::Draft) -> Result<R> {
        let updated = self.service.update(id, draft).await?;
        self.written(&updated).await;
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.service.delete(id).await?;
        self.invalidate().await;
        Ok(())
    }

    async fn invalidate(&self) {
        for resource in invalidation::affected(R::NAME) {
            self.cache.invalidate(resource).await;
        }
    }

    /// Invalidate after a write, then seed the detail entry with the record
    /// the server answered with
    async fn written(&self, record: &R) {
        self.invalidate().await;
        let id = record.id();
        self.cache.insert(Self::detail_key(id), record.clone()).await;
        tracing::debug!(resource = R::NAME, id, "Cached written record");
    }
}

impl CachedResource<Claim> {
    pub async fn update_status(&self, id: i64, status: ClaimStatus) -> Result<Claim> {
        let updated = self.service.update_status(id, status).await?;
        self.written(&updated).await;
        Ok(updated)
    }
}

impl CachedResource<Member> {
    /// A member's claims; cached in the claims partition so claim writes
    /// refresh it
    pub async fn claims(&self, member_id: i64, page: PageRequest) -> Result<Arc<Page<Claim>>> {
        validate_id(Member::NAME, member_id)?;
        let key = QueryKey::with_params(Claim::NAME, "by-member", &page)?.param("member_id", member_id);
        let service = self.service.clone();
        self.cache
            .fetch(key, move || async move { service.claims(member_id, page).await })
            .await
    }
}

impl CachedResource<Drug> {
    pub async fn search(&self, query: &str, limit: Option<u32>) -> Result<Arc<Vec<Drug>>> {
        let params = SearchParams::new(query, limit)?;
        let key = QueryKey::with_params(Drug::NAME, "search", &params)?;
        let service = self.service.clone();
        let (q, limit) = (params.q.to_string(), params.limit);
        self.cache
            .fetch(key, move || async move { service.search(&q, Some(limit)).await })
            .await
    }
}

/// Cached analytics and report reads, all in the `analytics` partition
#[derive(Debug, Clone)]
pub struct CachedAnalytics {
    service: AnalyticsService,
    cache: QueryCache,
}

impl CachedAnalytics {
    async fn report<T, F, Fut>(&self, key: QueryKey, load: F) -> Result<Arc<T>>
    where
        T: Send + Sync + 'static,
        F: FnOnce(AnalyticsService) -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let service = self.service.clone();
        self.cache.fetch(key, move || load(service)).await
    }

    pub async fn dashboard(&self, days: Option<u32>) -> Result<Arc<DashboardStats>> {
        let window = Window::new(days, DASHBOARD_DAYS)?;
        let key = QueryKey::with_params(ANALYTICS, "dashboard", &window)?;
        self.report(key, move |s| async move { s.dashboard(Some(window.days)).await })
            .await
    }

    pub async fn trends(&self, days: Option<u32>) -> Result<Arc<TrendReport>> {
        let window = Window::new(days, TRENDS_DAYS)?;
        let key = QueryKey::with_params(ANALYTICS, "trends", &window)?;
        self.report(key, move |s| async move { s.trends(Some(window.days)).await })
            .await
    }

    pub async fn high_utilizers(
        &self,
        days: Option<u32>,
        min_claims: Option<u32>,
    ) -> Result<Arc<HighUtilizers>> {
        let window = UtilizerWindow {
            days: Window::new(days, HIGH_UTILIZER_DAYS)?.days,
            min_claims: min_claims.unwrap_or(HIGH_UTILIZER_MIN_CLAIMS),
        };
        let key = QueryKey::with_params(ANALYTICS, "high-utilizers", &window)?;
        self.report(key, move |s| async move {
            s.high_utilizers(Some(window.days), Some(window.min_claims))
                .await
        })
        .await
    }

    pub async fn generic_savings(&self, days: Option<u32>) -> Result<Arc<GenericSavings>> {
        let window = Window::new(days, GENERIC_SAVINGS_DAYS)?;
        let key = QueryKey::with_params(ANALYTICS, "generic-savings", &window)?;
        self.report(key, move |s| async move {
            s.generic_savings(Some(window.days)).await
        })
        .await
    }

    pub async fn cost_summary(&self, range: Option<DateRange>) -> Result<Arc<CostSummaryReport>> {
        validate_range(range.as_ref())?;
        let key = QueryKey::with_params(ANALYTICS, "cost-summary", &range)?;
        self.report(key, move |s| async move { s.cost_summary(range).await })
            .await
    }

    pub async fn member_summary(
        &self,
        member_id: i64,
        days: Option<u32>,
    ) -> Result<Arc<MemberSummary>> {
        validate_id(Member::NAME, member_id)?;
        let window = Window::new(days, MEMBER_SUMMARY_DAYS)?;
        let key = QueryKey::with_params(ANALYTICS, "member-summary", &window)?
            .param("member_id", member_id);
        self.report(key, move |s| async move {
            s.member_summary(member_id, Some(window.days)).await
        })
        .await
    }

    pub async fn pharmacy_performance(
        &self,
        days: Option<u32>,
    ) -> Result<Arc<PharmacyPerformance>> {
        let window = Window::new(days, PHARMACY_PERFORMANCE_DAYS)?;
        let key = QueryKey::with_params(ANALYTICS, "pharmacy-performance", &window)?;
        self.report(key, move |s| async move {
            s.pharmacy_performance(Some(window.days)).await
        })
        .await
    }

    pub async fn therapeutic_classes(
        &self,
        days: Option<u32>,
    ) -> Result<Arc<TherapeuticClassBreakdown>> {
        let window = Window::new(days, THERAPEUTIC_CLASS_DAYS)?;
        let key = QueryKey::with_params(ANALYTICS, "therapeutic-class", &window)?;
        self.report(key, move |s| async move {
            s.therapeutic_classes(Some(window.days)).await
        })
        .await
    }
}
