//! Catalog reads, paging and cancellation against the fake TMDB.

mod support;

use anyhow::{Context, Result};
use futures::StreamExt;
use marquee_core::model::MediaType;
use marquee_core::{
    ApiError, FetchPhase, LoadParams, LoadResult, MovieRepository, Pager,
    PagingSource,
};
use support::{DISCOVER_PAGES, FakeTmdb};

#[tokio::test]
async fn details_id_matches_request() -> Result<()> {
    let fake = FakeTmdb::new();
    let repo = fake.repository();

    for (media_type, id) in [(MediaType::Movie, 550), (MediaType::Tv, 1399)] {
        let details = repo
            .details(media_type, id)
            .outcome()
            .await
            .context("cancelled")??;
        assert_eq!(details.id(), id);
        assert_eq!(details.media.display_title(), format!("Title {id}"));
        assert!(details.credits.is_some());
    }
    Ok(())
}

#[tokio::test]
async fn missing_title_is_http_404() -> Result<()> {
    let fake = FakeTmdb::new();
    let err = fake
        .repository()
        .movie_details(0)
        .outcome()
        .await
        .context("cancelled")?
        .expect_err("id 0 does not exist");

    assert!(matches!(err, ApiError::Http { status: 404, .. }));
    Ok(())
}

#[tokio::test]
async fn discovery_pages_until_total() -> Result<()> {
    let fake = FakeTmdb::new();
    let source = fake.repository().discovery_paging_source(MediaType::Movie);

    let first = source.load(LoadParams::first()).await;
    assert!(matches!(
        first,
        LoadResult::Page { prev_key: None, next_key: Some(2), .. }
    ));
    let last = source.load(LoadParams::page(DISCOVER_PAGES)).await;
    assert!(matches!(
        last,
        LoadResult::Page { prev_key: Some(2), next_key: None, .. }
    ));

    let pages: Vec<_> = Pager::new(source).stream().collect().await;
    assert_eq!(pages.len(), DISCOVER_PAGES as usize);
    assert!(pages.iter().all(|page| page.is_ok()));
    assert_eq!(
        fake.requests_to("discover/movie").await,
        DISCOVER_PAGES as usize + 2
    );
    Ok(())
}

#[tokio::test]
async fn blank_search_sends_nothing() -> Result<()> {
    let fake = FakeTmdb::new();
    let source = fake.repository().search_paging_source("");

    let pages: Vec<_> = Pager::new(source).stream().collect().await;
    assert_eq!(pages.len(), 1);
    assert!(pages[0].as_ref().is_ok_and(|items| items.is_empty()));
    assert_eq!(fake.request_count().await, 0);
    Ok(())
}

#[tokio::test]
async fn cancelled_fetch_emits_nothing_and_sends_nothing() -> Result<()> {
    let fake = FakeTmdb::new();
    let repo = fake.repository();

    let mut fetch = repo.movie_images(550);
    fetch.cancel();

    assert_eq!(fetch.next().await, None);
    assert_eq!(fetch.phase(), FetchPhase::Cancelled);
    assert_eq!(fake.request_count().await, 0);
    Ok(())
}

#[tokio::test]
async fn each_subscription_issues_its_own_request() -> Result<()> {
    let fake = FakeTmdb::new();
    let repo = fake.repository();

    let (a, b) = tokio::join!(
        repo.tv_details(1399).outcome(),
        repo.tv_details(1399).outcome()
    );
    assert_eq!(a.context("cancelled")??.id(), 1399);
    assert_eq!(b.context("cancelled")??.id(), 1399);
    assert_eq!(fake.requests_to("tv/1399").await, 2);
    Ok(())
}
