//! Page-at-a-time loading for discovery and search.

use async_trait::async_trait;
use futures::stream::{self, Stream};
use marquee_model::{MediaItem, MediaType, PagedResponse, SearchItem};
use tracing::debug;

use crate::client::TmdbClient;
use crate::error::{ApiError, ApiResult};

/// Which page to load. `key: None` means the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadParams {
    pub key: Option<u32>,
    /// Hint only; TMDB page size is fixed by the server.
    pub load_size: u32,
}

impl LoadParams {
    pub fn first() -> Self {
        Self::page(1)
    }

    pub fn page(page: u32) -> Self {
        Self {
            key: Some(page),
            load_size: 20,
        }
    }

    pub fn page_number(&self) -> u32 {
        self.key.unwrap_or(1).max(1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadResult<V> {
    Page {
        data: Vec<V>,
        prev_key: Option<u32>,
        next_key: Option<u32>,
    },
    Error(ApiError),
}

impl<V> LoadResult<V> {
    /// Page keyed by what the server reported, not what was asked for.
    pub fn from_response(response: PagedResponse<V>) -> Self {
        let page = response.page;
        LoadResult::Page {
            prev_key: (page > 1).then(|| page - 1),
            next_key: response.next_page(),
            data: response.results,
        }
    }

    pub fn empty() -> Self {
        LoadResult::Page {
            data: Vec::new(),
            prev_key: None,
            next_key: None,
        }
    }

    pub fn next_key(&self) -> Option<u32> {
        match self {
            LoadResult::Page { next_key, .. } => *next_key,
            LoadResult::Error(_) => None,
        }
    }

    pub fn into_result(self) -> ApiResult<Vec<V>> {
        match self {
            LoadResult::Page { data, .. } => Ok(data),
            LoadResult::Error(err) => Err(err),
        }
    }
}

impl<V> From<ApiResult<PagedResponse<V>>> for LoadResult<V> {
    fn from(result: ApiResult<PagedResponse<V>>) -> Self {
        match result {
            Ok(response) => LoadResult::from_response(response),
            Err(err) => LoadResult::Error(err),
        }
    }
}

/// Loads one page per call and reports the neighbouring keys.
#[async_trait]
pub trait PagingSource: Send + Sync {
    type Value: Send;

    async fn load(&self, params: LoadParams) -> LoadResult<Self::Value>;

    /// Key to restart from after an invalidation.
    fn refresh_key(&self) -> Option<u32> {
        None
    }
}

/// Unfiltered `discover/{movie,tv}` listing.
#[derive(Debug, Clone)]
pub struct DiscoveryPagingSource {
    client: TmdbClient,
    media_type: MediaType,
}

impl DiscoveryPagingSource {
    pub fn new(client: TmdbClient, media_type: MediaType) -> Self {
        Self { client, media_type }
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }
}

#[async_trait]
impl PagingSource for DiscoveryPagingSource {
    type Value = MediaItem;

    async fn load(&self, params: LoadParams) -> LoadResult<MediaItem> {
        let page = params.page_number();
        debug!(media_type = %self.media_type, page, "loading discovery page");

        let media_type = self.media_type;
        let result = self.client.discover(media_type, page).await.map(
            |mut response| {
                // discover results omit media_type
                for item in &mut response.results {
                    item.media_type.get_or_insert(media_type);
                }
                response
            },
        );
        result.into()
    }
}

/// `search/multi` for one query string.
#[derive(Debug, Clone)]
pub struct SearchPagingSource {
    client: TmdbClient,
    query: String,
}

impl SearchPagingSource {
    pub fn new(client: TmdbClient, query: impl Into<String>) -> Self {
        Self {
            client,
            query: query.into(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

#[async_trait]
impl PagingSource for SearchPagingSource {
    type Value = SearchItem;

    async fn load(&self, params: LoadParams) -> LoadResult<SearchItem> {
        let query = self.query.trim();
        if query.is_empty() {
            return LoadResult::empty();
        }

        let page = params.page_number();
        debug!(query, page, "loading search page");
        self.client.search_multi(query, page).await.into()
    }
}

/// Drives a [`PagingSource`] forward from the first page.
#[derive(Debug)]
pub struct Pager<S> {
    source: S,
    max_pages: Option<u32>,
}

impl<S> Pager<S>
where
    S: PagingSource + 'static,
{
    pub fn new(source: S) -> Self {
        Self {
            source,
            max_pages: None,
        }
    }

    /// Stop after `pages` pages even if the server reports more.
    pub fn max_pages(mut self, pages: u32) -> Self {
        self.max_pages = Some(pages);
        self
    }

    /// One item per loaded page. Ends after the page with no next key, after
    /// an error, or at the page limit. A page whose next key does not move
    /// past the requested key is reported as a decode error.
    pub fn stream(self) -> impl Stream<Item = ApiResult<Vec<S::Value>>> {
        let Pager { source, max_pages } = self;
        stream::unfold(
            (source, Some(1u32), 0u32),
            move |(source, key, loaded)| async move {
                let key = key?;
                if max_pages.is_some_and(|max| loaded >= max) {
                    return None;
                }

                match source.load(LoadParams::page(key)).await {
                    LoadResult::Page {
                        next_key: Some(next),
                        ..
                    } if next <= key => {
                        let err = ApiError::Decode(format!(
                            "next page {next} does not follow requested page {key}"
                        ));
                        Some((Err(err), (source, None, loaded + 1)))
                    }
                    LoadResult::Page { data, next_key, .. } => {
                        Some((Ok(data), (source, next_key, loaded + 1)))
                    }
                    LoadResult::Error(err) => {
                        Some((Err(err), (source, None, loaded + 1)))
                    }
                }
            },
        )
    }
}
