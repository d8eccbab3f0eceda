//! TMDB client and repository layer.
//!
//! Requests are described once in [`routes`] and executed by
//! [`client::TmdbClient`] over a pluggable [`transport::Transport`].
//! [`repository::TmdbRepository`] exposes every operation as a cancellable
//! single-shot [`fetch::Fetch`], with observable configuration
//! ([`settings::ConfigStore`]) and session ([`session::SessionStore`]) state.
#![allow(missing_docs)]

pub use marquee_model as model;

pub mod client;
pub mod error;
pub mod fetch;
pub mod locale;
pub mod paging;
pub mod repository;
pub mod request;
pub mod routes;
pub mod session;
pub mod settings;
pub mod transport;

pub use client::TmdbClient;
pub use error::{ApiError, ApiResult, ErrorKind, PreferencesError, TransportError};
pub use fetch::{Fetch, FetchPhase};
pub use paging::{
    DiscoveryPagingSource, LoadParams, LoadResult, Pager, PagingSource,
    SearchPagingSource,
};
pub use repository::{MovieRepository, TmdbRepository};
pub use request::{RequestBuilder, RequestDefaults};
pub use session::{SessionStore, UserSession};
pub use settings::{
    ConfigStore, JsonPreferencesStore, MemoryPreferencesStore, PreferencesStore,
};
pub use transport::{
    Credentials, HttpRequest, HttpResponse, ReqwestTransport, Transport,
    TransportOptions,
};
