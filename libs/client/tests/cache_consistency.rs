#[allow(unused)]
mod support;

use rxboard_client::{CacheConfig, ListController, QueryState};
use rxboard_models::{Claim, ClaimQuery, ClaimStatus, PageRequest};
use support::StubBackend;

#[tokio::test]
async fn concurrent_identical_reads_issue_one_request() -> anyhow::Result<()> {
    let backend = StubBackend::spawn().await?;
    let client = backend.client()?;

    // Same parameters, built in a different order
    let a = ClaimQuery::default().with_status(ClaimStatus::Pending);
    let b = ClaimQuery {
        status: Some(ClaimStatus::Pending),
        page: PageRequest::new(1, 20),
        ..Default::default()
    };

    let claims = client.claims();
    let (first, second) = tokio::join!(claims.list(&a), claims.list(&b));
    let (first, second) = (first?, second?);

    assert_eq!(backend.hits("GET /api/claims"), 1);
    assert_eq!(first, second);
    assert_eq!(first.total, 20);
    assert_eq!(first.pages, 1);
    Ok(())
}

#[tokio::test]
async fn claim_update_refreshes_claims_and_analytics() -> anyhow::Result<()> {
    let backend = StubBackend::spawn().await?;
    let client = backend.client()?;
    let query = ClaimQuery::default().with_status(ClaimStatus::Paid);

    let before = client.claims().list(&query).await?;
    assert_eq!(before.total, 0);
    let dashboard = client.analytics().dashboard(None).await?;
    assert!(dashboard.status_breakdown.iter().all(|s| s.status != "paid"));

    // Cached reads do not reach the backend
    client.claims().list(&query).await?;
    client.analytics().dashboard(None).await?;
    assert_eq!(backend.hits("GET /api/claims"), 1);
    assert_eq!(backend.hits("GET /api/analytics/dashboard"), 1);

    let updated = client.claims().update_status(3, ClaimStatus::Paid).await?;
    assert_eq!(updated.status, ClaimStatus::Paid);

    let key = rxboard_client::CachedResource::<Claim>::list_key(&query)?;
    assert_eq!(client.cache().state(&key).await, QueryState::Stale);

    let after = client.claims().list(&query).await?;
    assert_eq!(after.total, 1);
    assert_eq!(after.items[0].id, 3);
    assert_eq!(backend.hits("GET /api/claims"), 2);

    let dashboard = client.analytics().dashboard(None).await?;
    let paid = dashboard
        .status_breakdown
        .iter()
        .find(|s| s.status == "paid")
        .map(|s| s.count);
    assert_eq!(paid, Some(1));
    assert_eq!(backend.hits("GET /api/analytics/dashboard"), 2);
    Ok(())
}

#[tokio::test]
async fn member_write_leaves_claims_cached() -> anyhow::Result<()> {
    let backend = StubBackend::spawn().await?;
    let client = backend.client()?;

    client.claims().list(&ClaimQuery::default()).await?;
    client
        .members()
        .create(&rxboard_models::MemberDraft {
            member_id: Some("M0002".into()),
            first_name: Some("Grace".into()),
            last_name: Some("Hopper".into()),
            ..Default::default()
        })
        .await?;
    client.claims().list(&ClaimQuery::default()).await?;

    assert_eq!(backend.hits("GET /api/claims"), 1);
    Ok(())
}

#[tokio::test]
async fn superseded_page_response_is_not_applied() -> anyhow::Result<()> {
    let backend = StubBackend::spawn().await?;
    let client = backend.client()?;
    let claims = client.claims();
    let mut list: ListController<Claim> = ListController::new(ClaimQuery::default());

    let page_one = list.refresh();
    let page_two = list.go_to_page(2);

    // Page 2 lands first, then the slower page 1 response
    let second = claims.list(&page_two.query).await;
    assert!(list.apply(page_two.ticket, second));
    let first = claims.list(&page_one.query).await;
    assert!(!list.apply(page_one.ticket, first));

    let shown = list.view().data().expect("page two applied");
    assert_eq!(shown.current_page, 2);
    assert_eq!(shown.items.len(), 5);
    assert_eq!(shown.items[0].claim_number, "CLM-0021");
    Ok(())
}

#[tokio::test]
async fn stale_after_zero_refetches_every_read() -> anyhow::Result<()> {
    let backend = StubBackend::spawn().await?;
    let client = backend.client_with_cache(&CacheConfig {
        stale_after_seconds: 0,
        ..Default::default()
    })?;

    client.members().list(&Default::default()).await?;
    client.members().list(&Default::default()).await?;
    assert_eq!(backend.hits("GET /api/members"), 2);
    Ok(())
}

#[tokio::test]
async fn written_record_replaces_cached_detail() -> anyhow::Result<()> {
    let backend = StubBackend::spawn().await?;
    let client = backend.client()?;
    let claims = client.claims();

    let before = claims.get(3).await?;
    assert_ne!(before.status, ClaimStatus::Denied);

    claims.update_status(3, ClaimStatus::Denied).await?;

    let key = rxboard_client::CachedResource::<Claim>::detail_key(3);
    assert_eq!(client.cache().state(&key).await, QueryState::Fresh);

    // Served from the record the update returned
    let after = claims.get(3).await?;
    assert_eq!(after.status, ClaimStatus::Denied);
    assert_eq!(backend.hits("GET /api/claims/:id"), 1);
    Ok(())
}
