//! TMDB v3 endpoint table.
//!
//! Every remote capability is a [`Route`] constant: method, path template
//! with `{placeholders}`, the query parameters it accepts and the type its
//! response decodes into. [`TmdbClient::execute`](crate::client::TmdbClient::execute)
//! is the only interpreter of this table.

use std::fmt;
use std::marker::PhantomData;

use marquee_model::{
    AccountState, ImagesData, MediaItem, MovieDetails, PagedResponse,
    PeopleCredits, PeopleDetails, People, RequestTokenInfo, ResponseResult,
    SearchItem, SessionData, TmdbConfiguration, UserData,
};

use crate::request::RequestBuilder;

/// Base URL of the public TMDB v3 API
pub const API_BASE_URL: &str = "https://api.themoviedb.org/3/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value used for a query parameter the caller did not supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryDefault {
    /// Caller must supply it.
    Required,
    /// Omitted from the request when not supplied.
    Optional,
    /// The client's configured language.
    Language,
    /// First page.
    Page,
    Fixed(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryParam {
    pub name: &'static str,
    pub default: QueryDefault,
}

impl QueryParam {
    pub const fn new(name: &'static str, default: QueryDefault) -> Self {
        Self { name, default }
    }
}

/// Describes one endpoint; `T` is the decoded response type.
pub struct Route<T> {
    pub method: Method,
    pub path: &'static str,
    pub params: &'static [QueryParam],
    /// Whether the endpoint takes a JSON body.
    pub body: bool,
    response: PhantomData<fn() -> T>,
}

impl<T> Route<T> {
    const fn new(method: Method, path: &'static str) -> Self {
        Self {
            method,
            path,
            params: &[],
            body: false,
            response: PhantomData,
        }
    }

    pub const fn get(path: &'static str) -> Self {
        Self::new(Method::Get, path)
    }

    pub const fn post(path: &'static str) -> Self {
        Self::new(Method::Post, path)
    }

    pub const fn delete(path: &'static str) -> Self {
        Self::new(Method::Delete, path)
    }

    pub const fn with_query(self, params: &'static [QueryParam]) -> Self {
        Self {
            method: self.method,
            path: self.path,
            params,
            body: self.body,
            response: PhantomData,
        }
    }

    pub const fn with_body(self) -> Self {
        Self {
            method: self.method,
            path: self.path,
            params: self.params,
            body: true,
            response: PhantomData,
        }
    }

    pub fn param(&self, name: &str) -> Option<&'static QueryParam> {
        self.params.iter().find(|param| param.name == name)
    }

    /// Start building a request against this route.
    pub fn request(&self) -> RequestBuilder<T> {
        RequestBuilder::new(*self)
    }
}

impl<T> Clone for Route<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Route<T> {}

impl<T> fmt::Debug for Route<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("params", &self.params)
            .field("body", &self.body)
            .finish()
    }
}

impl<T> fmt::Display for Route<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

const LANGUAGE: QueryParam = QueryParam::new("language", QueryDefault::Language);
const PAGE: QueryParam = QueryParam::new("page", QueryDefault::Page);
const SESSION_ID: QueryParam =
    QueryParam::new("session_id", QueryDefault::Required);

const LOCALIZED: &[QueryParam] = &[LANGUAGE];
const PAGED: &[QueryParam] = &[PAGE, LANGUAGE];
const SESSION: &[QueryParam] = &[SESSION_ID];
const TITLE_DETAILS: &[QueryParam] = &[
    LANGUAGE,
    QueryParam::new(
        "append_to_response",
        QueryDefault::Fixed("credits,videos"),
    ),
];

const PERSON_DETAILS: &[QueryParam] = &[
    LANGUAGE,
    QueryParam::new("append_to_response", QueryDefault::Fixed("images")),
];
const SEARCH: &[QueryParam] = &[
    QueryParam::new("query", QueryDefault::Required),
    PAGE,
    LANGUAGE,
];

type Page<T> = PagedResponse<T>;

/// Image base URLs and size buckets
pub mod configuration {
    use super::*;

    pub const GET: Route<TmdbConfiguration> = Route::get("configuration");
}

/// Daily trending lists
pub mod trending {
    use super::*;

    pub const MOVIES: Route<Page<MediaItem>> =
        Route::get("trending/movie/day").with_query(LOCALIZED);
    pub const TV: Route<Page<MediaItem>> =
        Route::get("trending/tv/day").with_query(LOCALIZED);
    pub const PEOPLE: Route<Page<People>> =
        Route::get("trending/person/day").with_query(LOCALIZED);
}

/// Movie lists, details and per-account state
pub mod movie {
    use super::*;

    pub const NOW_PLAYING: Route<Page<MediaItem>> =
        Route::get("movie/now_playing").with_query(PAGED);
    pub const POPULAR: Route<Page<MediaItem>> =
        Route::get("movie/popular").with_query(PAGED);
    /// Details with credits and videos appended
    pub const DETAILS: Route<MovieDetails> =
        Route::get("movie/{id}").with_query(TITLE_DETAILS);
    pub const IMAGES: Route<ImagesData> =
        Route::get("movie/{id}/images").with_query(LOCALIZED);
    pub const ACCOUNT_STATES: Route<AccountState> =
        Route::get("movie/{id}/account_states").with_query(SESSION);
}

/// TV lists, details and per-account state
pub mod tv {
    use super::*;

    pub const AIRING_TODAY: Route<Page<MediaItem>> =
        Route::get("tv/airing_today").with_query(PAGED);
    pub const POPULAR: Route<Page<MediaItem>> =
        Route::get("tv/popular").with_query(PAGED);
    pub const DETAILS: Route<MovieDetails> =
        Route::get("tv/{id}").with_query(TITLE_DETAILS);
    pub const IMAGES: Route<ImagesData> =
        Route::get("tv/{id}/images").with_query(LOCALIZED);
    pub const ACCOUNT_STATES: Route<AccountState> =
        Route::get("tv/{id}/account_states").with_query(SESSION);
}

pub mod person {
    use super::*;

    pub const POPULAR: Route<Page<People>> =
        Route::get("person/popular").with_query(LOCALIZED);
    /// Details with profile images appended
    pub const DETAILS: Route<PeopleDetails> =
        Route::get("person/{id}").with_query(PERSON_DETAILS);
    pub const COMBINED_CREDITS: Route<PeopleCredits> =
        Route::get("person/{id}/combined_credits").with_query(LOCALIZED);
}

/// Paged discovery, no filters
pub mod discover {
    use super::*;

    pub const MOVIE: Route<Page<MediaItem>> =
        Route::get("discover/movie").with_query(PAGED);
    pub const TV: Route<Page<MediaItem>> =
        Route::get("discover/tv").with_query(PAGED);
}

pub mod search {
    use super::*;

    /// Movies, shows and people in one result list
    pub const MULTI: Route<Page<SearchItem>> =
        Route::get("search/multi").with_query(SEARCH);
}

/// Request token / session flow
pub mod authentication {
    use super::*;

    pub const NEW_TOKEN: Route<RequestTokenInfo> =
        Route::get("authentication/token/new");
    /// Exchange an approved request token for a session id
    pub const NEW_SESSION: Route<SessionData> =
        Route::post("authentication/session/new").with_body();
    pub const DELETE_SESSION: Route<ResponseResult> =
        Route::delete("authentication/session").with_body();
}

/// Endpoints scoped to the signed-in user
pub mod account {
    use super::*;

    pub const DETAILS: Route<UserData> =
        Route::get("account").with_query(SESSION);
    pub const FAVORITE: Route<ResponseResult> =
        Route::post("account/{account_id}/favorite")
            .with_query(SESSION)
            .with_body();
    pub const WATCHLIST: Route<ResponseResult> =
        Route::post("account/{account_id}/watchlist")
            .with_query(SESSION)
            .with_body();
}
