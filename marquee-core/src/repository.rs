//! Repository surface consumed by UI and CLI layers.
//!
//! Each remote read or mutation is exposed as a [`Fetch`]: lazy, single
//! result, cancellable. Configuration and session state are observable
//! through [`ConfigStore`] and [`SessionStore`].

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use marquee_model::{
    AccountState, DarkThemeMode, FavoriteRequest, ImagesData, MediaItem,
    MediaType, MovieDetails, PagedResponse, People, PeopleCredits,
    PeopleDetails, RequestTokenInfo, TmdbConfig, TmdbConfiguration,
    WatchlistRequest,
};
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::client::TmdbClient;
use crate::error::{ApiError, ApiResult, PreferencesError};
use crate::fetch::Fetch;
use crate::paging::{DiscoveryPagingSource, SearchPagingSource};
use crate::session::{SessionStore, UserSession};
use crate::settings::ConfigStore;
use crate::transport::Transport;

/// Movie, TV, people and account operations against TMDB.
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Current configuration, then every change.
    fn config_stream(&self) -> WatchStream<TmdbConfig>;

    async fn update_dark_theme(
        &self,
        mode: DarkThemeMode,
    ) -> Result<(), PreferencesError>;

    async fn update_dynamic_theme(
        &self,
        enabled: bool,
    ) -> Result<(), PreferencesError>;

    /// Fetch the remote configuration and merge its image section into
    /// [`config_stream`](Self::config_stream).
    async fn tmdb_configuration(&self) -> ApiResult<TmdbConfiguration>;

    fn movies_trending(&self) -> Fetch<Vec<MediaItem>>;
    fn tv_trending(&self) -> Fetch<Vec<MediaItem>>;
    fn people_trending(&self) -> Fetch<Vec<People>>;
    fn popular_people(&self) -> Fetch<Vec<People>>;

    fn movies_now_playing(&self, page: u32) -> Fetch<Vec<MediaItem>>;
    fn tv_airing_today(&self, page: u32) -> Fetch<Vec<MediaItem>>;
    fn movies_popular(&self, page: u32) -> Fetch<Vec<MediaItem>>;
    fn tv_popular(&self, page: u32) -> Fetch<Vec<MediaItem>>;

    fn discovery_paging_source(
        &self,
        media_type: MediaType,
    ) -> DiscoveryPagingSource;

    fn movie_details(&self, id: u64) -> Fetch<MovieDetails>;
    fn tv_details(&self, id: u64) -> Fetch<MovieDetails>;
    fn movie_images(&self, id: u64) -> Fetch<ImagesData>;
    fn tv_images(&self, id: u64) -> Fetch<ImagesData>;
    fn people_details(&self, id: u64) -> Fetch<PeopleDetails>;
    fn people_credits(&self, id: u64) -> Fetch<PeopleCredits>;

    fn search_paging_source(&self, query: &str) -> SearchPagingSource;

    /// Token for the user to approve at
    /// [`approval_url`](RequestTokenInfo::approval_url).
    fn request_token(&self) -> Fetch<RequestTokenInfo>;

    /// Create a session from an approved token, load the account and store
    /// both in [`session`](Self::session).
    fn refresh_user_data(&self, request_token: &str) -> Fetch<bool>;

    fn sign_out(&self, session_id: &str) -> Fetch<bool>;

    fn account_state(
        &self,
        id: u64,
        session_id: &str,
        media_type: MediaType,
    ) -> Fetch<AccountState>;

    fn mark_as_favorite(
        &self,
        account_id: u64,
        session_id: &str,
        media_type: MediaType,
        media_id: u64,
        favorite: bool,
    ) -> Fetch<bool>;

    fn add_to_watchlist(
        &self,
        account_id: u64,
        session_id: &str,
        media_type: MediaType,
        media_id: u64,
        watchlist: bool,
    ) -> Fetch<bool>;

    fn session(&self) -> &SessionStore;
}

/// [`MovieRepository`] backed by a [`TmdbClient`].
#[derive(Debug, Clone)]
pub struct TmdbRepository {
    client: TmdbClient,
    config: ConfigStore,
    session: SessionStore,
    scope: CancellationToken,
}

impl TmdbRepository {
    pub fn new(
        client: TmdbClient,
        config: ConfigStore,
        session: SessionStore,
    ) -> Self {
        Self {
            client,
            config,
            session,
            scope: CancellationToken::new(),
        }
    }

    /// Repository with in-memory configuration and no session.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self::new(
            TmdbClient::new(transport),
            ConfigStore::in_memory(),
            SessionStore::new(),
        )
    }

    pub fn client(&self) -> &TmdbClient {
        &self.client
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Cancel every fetch created by this repository that has not finished.
    pub fn shutdown(&self) {
        self.scope.cancel();
    }

    /// Details for a movie or TV title.
    pub fn details(&self, media_type: MediaType, id: u64) -> Fetch<MovieDetails> {
        self.fetch("details", move |client| async move {
            client.details(media_type, id).await
        })
    }

    pub fn images(&self, media_type: MediaType, id: u64) -> Fetch<ImagesData> {
        self.fetch("images", move |client| async move {
            client.images(media_type, id).await
        })
    }

    fn fetch<T, F, Fut>(&self, label: &'static str, work: F) -> Fetch<T>
    where
        T: Send + 'static,
        F: FnOnce(TmdbClient) -> Fut,
        Fut: Future<Output = ApiResult<T>> + Send + 'static,
    {
        Fetch::with_token(
            label,
            self.scope.child_token(),
            work(self.client.clone()),
        )
    }

    fn results<T, F, Fut>(&self, label: &'static str, work: F) -> Fetch<Vec<T>>
    where
        T: Send + 'static,
        F: FnOnce(TmdbClient) -> Fut,
        Fut: Future<Output = ApiResult<PagedResponse<T>>> + Send + 'static,
    {
        let future = work(self.client.clone());
        Fetch::with_token(label, self.scope.child_token(), async move {
            future.await.map(|page| page.results)
        })
    }
}

#[async_trait]
impl MovieRepository for TmdbRepository {
    fn config_stream(&self) -> WatchStream<TmdbConfig> {
        self.config.subscribe()
    }

    async fn update_dark_theme(
        &self,
        mode: DarkThemeMode,
    ) -> Result<(), PreferencesError> {
        self.config.set_dark_theme(mode).await
    }

    async fn update_dynamic_theme(
        &self,
        enabled: bool,
    ) -> Result<(), PreferencesError> {
        self.config.set_dynamic_theme(enabled).await
    }

    async fn tmdb_configuration(&self) -> ApiResult<TmdbConfiguration> {
        let configuration = self.client.configuration().await?;
        self.config.apply_remote(configuration.images.clone());
        Ok(configuration)
    }

    fn movies_trending(&self) -> Fetch<Vec<MediaItem>> {
        self.results("movies_trending", |client| async move {
            client.movies_trending().await
        })
    }

    fn tv_trending(&self) -> Fetch<Vec<MediaItem>> {
        self.results("tv_trending", |client| async move {
            client.tv_trending().await
        })
    }

    fn people_trending(&self) -> Fetch<Vec<People>> {
        self.results("people_trending", |client| async move {
            client.people_trending().await
        })
    }

    fn popular_people(&self) -> Fetch<Vec<People>> {
        self.results("popular_people", |client| async move {
            client.popular_people().await
        })
    }

    fn movies_now_playing(&self, page: u32) -> Fetch<Vec<MediaItem>> {
        self.results("movies_now_playing", move |client| async move {
            client.movies_now_playing(page).await
        })
    }

    fn tv_airing_today(&self, page: u32) -> Fetch<Vec<MediaItem>> {
        self.results("tv_airing_today", move |client| async move {
            client.tv_airing_today(page).await
        })
    }

    fn movies_popular(&self, page: u32) -> Fetch<Vec<MediaItem>> {
        self.results("movies_popular", move |client| async move {
            client.movies_popular(page).await
        })
    }

    fn tv_popular(&self, page: u32) -> Fetch<Vec<MediaItem>> {
        self.results("tv_popular", move |client| async move {
            client.tv_popular(page).await
        })
    }

    fn discovery_paging_source(
        &self,
        media_type: MediaType,
    ) -> DiscoveryPagingSource {
        DiscoveryPagingSource::new(self.client.clone(), media_type)
    }

    fn movie_details(&self, id: u64) -> Fetch<MovieDetails> {
        self.fetch("movie_details", move |client| async move {
            client.movie_details(id).await
        })
    }

    fn tv_details(&self, id: u64) -> Fetch<MovieDetails> {
        self.fetch("tv_details", move |client| async move {
            client.tv_details(id).await
        })
    }

    fn movie_images(&self, id: u64) -> Fetch<ImagesData> {
        self.fetch("movie_images", move |client| async move {
            client.movie_images(id).await
        })
    }

    fn tv_images(&self, id: u64) -> Fetch<ImagesData> {
        self.fetch("tv_images", move |client| async move {
            client.tv_images(id).await
        })
    }

    fn people_details(&self, id: u64) -> Fetch<PeopleDetails> {
        self.fetch("people_details", move |client| async move {
            client.person_details(id).await
        })
    }

    fn people_credits(&self, id: u64) -> Fetch<PeopleCredits> {
        self.fetch("people_credits", move |client| async move {
            client.person_credits(id).await
        })
    }

    fn search_paging_source(&self, query: &str) -> SearchPagingSource {
        SearchPagingSource::new(self.client.clone(), query)
    }

    fn request_token(&self) -> Fetch<RequestTokenInfo> {
        self.fetch("request_token", |client| async move {
            client.request_token().await
        })
    }

    fn refresh_user_data(&self, request_token: &str) -> Fetch<bool> {
        let request_token = request_token.to_string();
        let session = self.session.clone();
        self.fetch("refresh_user_data", move |client| async move {
            let created = client.create_session(&request_token).await?;
            if !created.success || created.session_id.trim().is_empty() {
                warn!("TMDB refused to create a session");
                return Ok(false);
            }

            let user = client.account(&created.session_id).await?;
            info!(account_id = user.id, username = %user.username, "signed in");
            session.set(UserSession {
                session_id: created.session_id,
                user,
            });
            Ok(true)
        })
    }

    fn sign_out(&self, session_id: &str) -> Fetch<bool> {
        let session_id = session_id.to_string();
        let session = self.session.clone();
        self.fetch("sign_out", move |client| async move {
            let result = client.delete_session(&session_id).await?;
            if !result.is_success() {
                return Ok(false);
            }
            session.clear_if(session_id.trim());
            info!("signed out");
            Ok(true)
        })
    }

    fn account_state(
        &self,
        id: u64,
        session_id: &str,
        media_type: MediaType,
    ) -> Fetch<AccountState> {
        let session_id = session_id.to_string();
        self.fetch("account_state", move |client| async move {
            client.account_state(media_type, id, &session_id).await
        })
    }

    fn mark_as_favorite(
        &self,
        account_id: u64,
        session_id: &str,
        media_type: MediaType,
        media_id: u64,
        favorite: bool,
    ) -> Fetch<bool> {
        let session_id = session_id.to_string();
        let body = FavoriteRequest {
            media_type,
            media_id,
            favorite,
        };
        self.fetch("mark_as_favorite", move |client| async move {
            let result =
                client.mark_as_favorite(account_id, &session_id, &body).await?;
            Ok(result.is_success())
        })
    }

    fn add_to_watchlist(
        &self,
        account_id: u64,
        session_id: &str,
        media_type: MediaType,
        media_id: u64,
        watchlist: bool,
    ) -> Fetch<bool> {
        let session_id = session_id.to_string();
        let body = WatchlistRequest {
            media_type,
            media_id,
            watchlist,
        };
        self.fetch("add_to_watchlist", move |client| async move {
            let result =
                client.add_to_watchlist(account_id, &session_id, &body).await?;
            Ok(result.is_success())
        })
    }

    fn session(&self) -> &SessionStore {
        &self.session
    }
}

/// `Err(Unauthenticated)` unless a session is stored.
pub fn require_signed_in(session: &SessionStore) -> ApiResult<UserSession> {
    session.current().ok_or(ApiError::Unauthenticated)
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;
    use serde_json::json;

    use super::*;
    use crate::fetch::FetchPhase;
    use crate::request::RequestDefaults;
    use crate::transport::{HttpResponse, MockTransport};

    fn repository(transport: MockTransport) -> TmdbRepository {
        TmdbRepository::new(
            TmdbClient::with_defaults(
                Arc::new(transport),
                RequestDefaults {
                    language: "en-US".into(),
                },
            ),
            ConfigStore::in_memory(),
            SessionStore::new(),
        )
    }

    #[tokio::test]
    async fn list_fetch_emits_results() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|req| req.path == "trending/movie/day")
            .times(1)
            .returning(|_| {
                Ok(HttpResponse::json(
                    200,
                    &json!({"page": 1, "total_pages": 1, "results": [
                        {"id": 1, "title": "One"}, {"id": 2, "title": "Two"}
                    ]}),
                ))
            });

        let items = repository(transport)
            .movies_trending()
            .outcome()
            .await
            .unwrap()
            .unwrap();
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn dropped_fetch_sends_nothing() {
        let mut transport = MockTransport::new();
        transport.expect_send().never();

        let repo = repository(transport);
        let fetch = repo.movie_details(550);
        assert_eq!(fetch.phase(), FetchPhase::Idle);
        drop(fetch);
    }

    #[tokio::test]
    async fn shutdown_cancels_outstanding_fetches() {
        let mut transport = MockTransport::new();
        transport.expect_send().never();

        let repo = repository(transport);
        let mut fetch = repo.tv_popular(1);
        repo.shutdown();
        assert_eq!(fetch.next().await, None);
        assert_eq!(fetch.phase(), FetchPhase::Cancelled);
    }

    #[tokio::test]
    async fn tmdb_configuration_updates_config_stream() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(1).returning(|_| {
            Ok(HttpResponse::json(
                200,
                &json!({"images": {
                    "base_url": "http://image.tmdb.org/t/p/",
                    "secure_base_url": "https://image.tmdb.org/t/p/",
                    "poster_sizes": ["w92", "w342", "original"]
                }}),
            ))
        });

        let repo = repository(transport);
        let mut stream = repo.config_stream();
        let initial = stream.next().await.unwrap();
        assert!(initial.images.secure_base_url.is_empty());

        repo.tmdb_configuration().await.unwrap();
        let updated = stream.next().await.unwrap();
        assert_eq!(updated.images.secure_base_url, "https://image.tmdb.org/t/p/");
    }

    #[tokio::test]
    async fn person_is_not_a_title() {
        let mut transport = MockTransport::new();
        transport.expect_send().never();

        let repo = repository(transport);
        let err = repo
            .details(MediaType::Person, 287)
            .outcome()
            .await
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));

        let err = repo
            .mark_as_favorite(1, "session", MediaType::Person, 287, true)
            .outcome()
            .await
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[test]
    fn signed_in_guard() {
        let session = SessionStore::new();
        assert_eq!(
            require_signed_in(&session).unwrap_err(),
            ApiError::Unauthenticated
        );
    }
}
