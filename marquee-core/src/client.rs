use std::fmt;
use std::sync::Arc;

use marquee_model::{
    AccountState, FavoriteRequest, ImagesData, MediaItem, MediaType,
    MovieDetails, PagedResponse, People, PeopleCredits, PeopleDetails,
    RequestToken, RequestTokenInfo, ResponseResult, SearchItem, Session,
    SessionData, TmdbConfiguration, UserData, WatchlistRequest,
};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use crate::request::{RequestBuilder, RequestDefaults};
use crate::routes::{self, Route};
use crate::transport::{HttpResponse, Transport};

/// Typed TMDB client: resolves routes, sends them through a [`Transport`]
/// and maps the response into `ApiResult<T>`.
#[derive(Clone)]
pub struct TmdbClient {
    transport: Arc<dyn Transport>,
    defaults: RequestDefaults,
}

impl fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbClient")
            .field("language", &self.defaults.language)
            .finish_non_exhaustive()
    }
}

impl TmdbClient {
    /// Client using the device locale for `language`.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_defaults(transport, RequestDefaults::default())
    }

    pub fn with_defaults(
        transport: Arc<dyn Transport>,
        defaults: RequestDefaults,
    ) -> Self {
        Self {
            transport,
            defaults,
        }
    }

    /// Copy of this client that sends `language` by default.
    pub fn with_language(&self, language: impl Into<String>) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            defaults: RequestDefaults {
                language: language.into(),
            },
        }
    }

    pub fn language(&self) -> &str {
        &self.defaults.language
    }

    /// Send one request and decode the response body as `T`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder<T>,
    ) -> ApiResult<T> {
        let route = *request.route();
        let request = request.build(&self.defaults)?;
        debug!(method = %request.method, path = %request.path, "TMDB request");

        let response = self.transport.send(request).await.map_err(|err| {
            warn!(route = %route, error = %err, "TMDB request failed");
            ApiError::from(err)
        })?;

        decode_response(&route, response)
    }

    pub async fn configuration(&self) -> ApiResult<TmdbConfiguration> {
        self.execute(routes::configuration::GET.request()).await
    }

    pub async fn movies_trending(&self) -> ApiResult<PagedResponse<MediaItem>> {
        self.execute(routes::trending::MOVIES.request()).await
    }

    pub async fn tv_trending(&self) -> ApiResult<PagedResponse<MediaItem>> {
        self.execute(routes::trending::TV.request()).await
    }

    pub async fn people_trending(&self) -> ApiResult<PagedResponse<People>> {
        self.execute(routes::trending::PEOPLE.request()).await
    }

    pub async fn popular_people(&self) -> ApiResult<PagedResponse<People>> {
        self.execute(routes::person::POPULAR.request()).await
    }

    pub async fn movies_now_playing(
        &self,
        page: u32,
    ) -> ApiResult<PagedResponse<MediaItem>> {
        self.paged(routes::movie::NOW_PLAYING, page).await
    }

    pub async fn tv_airing_today(
        &self,
        page: u32,
    ) -> ApiResult<PagedResponse<MediaItem>> {
        self.paged(routes::tv::AIRING_TODAY, page).await
    }

    pub async fn movies_popular(
        &self,
        page: u32,
    ) -> ApiResult<PagedResponse<MediaItem>> {
        self.paged(routes::movie::POPULAR, page).await
    }

    pub async fn tv_popular(
        &self,
        page: u32,
    ) -> ApiResult<PagedResponse<MediaItem>> {
        self.paged(routes::tv::POPULAR, page).await
    }

    /// Unfiltered discovery for movies or TV.
    pub async fn discover(
        &self,
        media_type: MediaType,
        page: u32,
    ) -> ApiResult<PagedResponse<MediaItem>> {
        let route = match media_type {
            MediaType::Movie => routes::discover::MOVIE,
            MediaType::Tv => routes::discover::TV,
            MediaType::Person => return Err(not_a_title(media_type)),
        };
        self.paged(route, page).await
    }

    pub async fn movie_details(&self, id: u64) -> ApiResult<MovieDetails> {
        self.execute(routes::movie::DETAILS.request().path("id", id))
            .await
    }

    pub async fn tv_details(&self, id: u64) -> ApiResult<MovieDetails> {
        self.execute(routes::tv::DETAILS.request().path("id", id)).await
    }

    pub async fn details(
        &self,
        media_type: MediaType,
        id: u64,
    ) -> ApiResult<MovieDetails> {
        match media_type {
            MediaType::Movie => self.movie_details(id).await,
            MediaType::Tv => self.tv_details(id).await,
            MediaType::Person => Err(not_a_title(media_type)),
        }
    }

    pub async fn movie_images(&self, id: u64) -> ApiResult<ImagesData> {
        self.execute(routes::movie::IMAGES.request().path("id", id))
            .await
    }

    pub async fn tv_images(&self, id: u64) -> ApiResult<ImagesData> {
        self.execute(routes::tv::IMAGES.request().path("id", id)).await
    }

    pub async fn images(
        &self,
        media_type: MediaType,
        id: u64,
    ) -> ApiResult<ImagesData> {
        match media_type {
            MediaType::Movie => self.movie_images(id).await,
            MediaType::Tv => self.tv_images(id).await,
            MediaType::Person => Err(not_a_title(media_type)),
        }
    }

    pub async fn person_details(&self, id: u64) -> ApiResult<PeopleDetails> {
        self.execute(routes::person::DETAILS.request().path("id", id))
            .await
    }

    pub async fn person_credits(&self, id: u64) -> ApiResult<PeopleCredits> {
        self.execute(routes::person::COMBINED_CREDITS.request().path("id", id))
            .await
    }

    pub async fn search_multi(
        &self,
        query: &str,
        page: u32,
    ) -> ApiResult<PagedResponse<SearchItem>> {
        self.execute(
            routes::search::MULTI
                .request()
                .query("query", query)
                .query("page", page.to_string()),
        )
        .await
    }

    /// Step one of sign-in: a token the user approves on the TMDB site.
    pub async fn request_token(&self) -> ApiResult<RequestTokenInfo> {
        self.execute(routes::authentication::NEW_TOKEN.request())
            .await
    }

    /// Exchange an approved request token for a session id.
    pub async fn create_session(
        &self,
        request_token: &str,
    ) -> ApiResult<SessionData> {
        if request_token.trim().is_empty() {
            return Err(ApiError::InvalidRequest(
                "request token must not be blank".into(),
            ));
        }
        let body = RequestToken {
            request_token: request_token.to_string(),
        };
        self.execute(routes::authentication::NEW_SESSION.request().json(&body))
            .await
    }

    pub async fn delete_session(
        &self,
        session_id: &str,
    ) -> ApiResult<ResponseResult> {
        let session_id = require_session(session_id)?;
        let body = Session {
            session_id: session_id.to_string(),
        };
        self.execute(
            routes::authentication::DELETE_SESSION.request().json(&body),
        )
        .await
    }

    pub async fn account(&self, session_id: &str) -> ApiResult<UserData> {
        let session_id = require_session(session_id)?;
        self.execute(
            routes::account::DETAILS
                .request()
                .query("session_id", session_id),
        )
        .await
    }

    pub async fn account_state(
        &self,
        media_type: MediaType,
        id: u64,
        session_id: &str,
    ) -> ApiResult<AccountState> {
        let session_id = require_session(session_id)?;
        let route = match media_type {
            MediaType::Movie => routes::movie::ACCOUNT_STATES,
            MediaType::Tv => routes::tv::ACCOUNT_STATES,
            MediaType::Person => return Err(not_a_title(media_type)),
        };
        self.execute(
            route
                .request()
                .path("id", id)
                .query("session_id", session_id),
        )
        .await
    }

    pub async fn mark_as_favorite(
        &self,
        account_id: u64,
        session_id: &str,
        body: &FavoriteRequest,
    ) -> ApiResult<ResponseResult> {
        let session_id = require_session(session_id)?;
        if !body.media_type.is_title() {
            return Err(not_a_title(body.media_type));
        }
        self.execute(
            routes::account::FAVORITE
                .request()
                .path("account_id", account_id)
                .query("session_id", session_id)
                .json(body),
        )
        .await
    }

    pub async fn add_to_watchlist(
        &self,
        account_id: u64,
        session_id: &str,
        body: &WatchlistRequest,
    ) -> ApiResult<ResponseResult> {
        let session_id = require_session(session_id)?;
        if !body.media_type.is_title() {
            return Err(not_a_title(body.media_type));
        }
        self.execute(
            routes::account::WATCHLIST
                .request()
                .path("account_id", account_id)
                .query("session_id", session_id)
                .json(body),
        )
        .await
    }

    async fn paged<T: DeserializeOwned>(
        &self,
        route: Route<PagedResponse<T>>,
        page: u32,
    ) -> ApiResult<PagedResponse<T>> {
        self.execute(route.request().query("page", page.max(1).to_string()))
            .await
    }
}

/// Account-scoped calls never reach the network without a session.
fn require_session(session_id: &str) -> ApiResult<&str> {
    let session_id = session_id.trim();
    if session_id.is_empty() {
        return Err(ApiError::Unauthenticated);
    }
    Ok(session_id)
}

fn not_a_title(media_type: MediaType) -> ApiError {
    ApiError::InvalidRequest(format!(
        "`{media_type}` is not a movie or TV show"
    ))
}

fn decode_response<T: DeserializeOwned>(
    route: &Route<T>,
    response: HttpResponse,
) -> ApiResult<T> {
    match response.status {
        200..=299 => serde_json::from_slice(&response.body).map_err(|err| {
            warn!(route = %route, error = %err, "TMDB response did not decode");
            ApiError::Decode(err.to_string())
        }),
        401 => {
            warn!(route = %route, "TMDB rejected credentials or session");
            Err(ApiError::Unauthenticated)
        }
        status => {
            let message = error_message(&response);
            warn!(route = %route, status, %message, "TMDB request failed");
            Err(ApiError::Http { status, message })
        }
    }
}

/// TMDB error bodies carry a `status_message`; fall back to the reason phrase.
fn error_message(response: &HttpResponse) -> String {
    serde_json::from_slice::<ResponseResult>(&response.body)
        .ok()
        .and_then(|result| result.status_message)
        .filter(|message| !message.trim().is_empty())
        .or_else(|| {
            reqwest::StatusCode::from_u16(response.status)
                .ok()
                .and_then(|status| status.canonical_reason())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("HTTP {}", response.status))
}

#[cfg(test)]
mod tests {
    use mockall::predicate::*;
    use serde_json::json;

    use super::*;
    use crate::error::{ErrorKind, TransportError};
    use crate::routes::Method;
    use crate::transport::MockTransport;

    fn client(transport: MockTransport) -> TmdbClient {
        TmdbClient::with_defaults(
            Arc::new(transport),
            RequestDefaults {
                language: "en-US".into(),
            },
        )
    }

    #[tokio::test]
    async fn details_decode_and_keep_requested_id() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|req| {
                req.method == Method::Get
                    && req.path == "movie/550"
                    && req.query_value("append_to_response")
                        == Some("credits,videos")
            })
            .times(1)
            .returning(|_| {
                Ok(HttpResponse::json(
                    200,
                    &json!({"id": 550, "title": "Fight Club", "runtime": 139}),
                ))
            });

        let details = client(transport).movie_details(550).await.unwrap();
        assert_eq!(details.id(), 550);
        assert_eq!(details.media.display_title(), "Fight Club");
    }

    #[tokio::test]
    async fn unauthorized_maps_to_unauthenticated() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(1).returning(|_| {
            Ok(HttpResponse::json(
                401,
                &json!({"status_code": 3, "status_message": "Authentication failed"}),
            ))
        });

        let err = client(transport).account("stale").await.unwrap_err();
        assert_eq!(err, ApiError::Unauthenticated);
    }

    #[tokio::test]
    async fn http_errors_use_status_message() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(1).returning(|_| {
            Ok(HttpResponse::json(
                404,
                &json!({"status_code": 34, "status_message": "The resource you requested could not be found."}),
            ))
        });

        let err = client(transport).tv_details(0).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 404,
                message: "The resource you requested could not be found."
                    .into()
            }
        );
    }

    #[tokio::test]
    async fn http_errors_without_body_use_reason_phrase() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .returning(|_| Ok(HttpResponse::new(503, Vec::new())));

        let err = client(transport).configuration().await.unwrap_err();
        assert!(
            matches!(err, ApiError::Http { status: 503, ref message } if message == "Service Unavailable")
        );
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .returning(|_| Ok(HttpResponse::new(200, "{\"results\": 12}")));

        let err = client(transport).movies_popular(1).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn timeouts_are_network_errors() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .returning(|_| Err(TransportError::Timeout));

        let err = client(transport).movies_trending().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[tokio::test]
    async fn blank_session_never_reaches_transport() {
        let mut transport = MockTransport::new();
        transport.expect_send().never();
        let client = client(transport);

        assert_eq!(
            client.account("  ").await.unwrap_err(),
            ApiError::Unauthenticated
        );
        assert_eq!(
            client
                .account_state(MediaType::Movie, 550, "")
                .await
                .unwrap_err(),
            ApiError::Unauthenticated
        );
        let favorite = FavoriteRequest {
            media_type: MediaType::Movie,
            media_id: 550,
            favorite: true,
        };
        assert_eq!(
            client.mark_as_favorite(1, "", &favorite).await.unwrap_err(),
            ApiError::Unauthenticated
        );
        assert_eq!(
            client.delete_session("").await.unwrap_err(),
            ApiError::Unauthenticated
        );
    }

    #[tokio::test]
    async fn language_override_is_sent() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|req| req.query_value("language") == Some("ja-JP"))
            .times(1)
            .returning(|_| Ok(HttpResponse::json(200, &json!({"page": 1}))));

        let client = client(transport).with_language("ja-JP");
        let page = client.tv_popular(1).await.unwrap();
        assert!(page.results.is_empty());
        assert!(!page.has_next_page());
    }

    #[tokio::test]
    async fn search_sends_query_and_page() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .with(function(|req: &crate::transport::HttpRequest| {
                req.path == "search/multi"
                    && req.query_value("query") == Some("dune")
                    && req.query_value("page") == Some("3")
            }))
            .times(1)
            .returning(|_| {
                Ok(HttpResponse::json(
                    200,
                    &json!({"page": 3, "total_pages": 3, "results": [
                        {"id": 438631, "media_type": "movie", "title": "Dune"}
                    ]}),
                ))
            });

        let page = client(transport).search_multi("dune", 3).await.unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.next_page(), None);
    }
}
