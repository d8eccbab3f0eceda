//! Data transfer records mirroring the TMDB v3 JSON payloads.
//!
//! Everything here is a plain value: records are constructed by decoding a
//! response and replaced wholesale on the next fetch, never mutated in place.
#![allow(missing_docs)]

pub use ::chrono;

pub mod account;
pub mod configuration;
pub mod details;
pub mod image;
pub mod media;
pub mod media_type;
pub mod prelude;
pub mod video;

// Intentionally curated re-exports for downstream consumers.
pub use account::{
    AccountState, Avatar, FavoriteRequest, RequestToken, RequestTokenInfo,
    ResponseResult, Session, SessionData, UserData, WatchlistRequest,
};
pub use configuration::{
    DarkThemeMode, ImageConfiguration, ThemePreferences, TmdbConfig,
    TmdbConfiguration,
};
pub use details::{
    CastMember, CreditItem, Credits, CrewMember, Genre, MovieDetails,
    PeopleCredits, PeopleDetails, PeopleImages, ProductionCompany,
};
pub use image::{
    BackdropSize, DEFAULT_IMAGE_BASE_URL, ImageSize, ImagesData, LogoSize,
    MovieImage, PosterSize, ProfileSize, StillSize, UnknownImageSize,
    build_image_url,
};
pub use media::{MediaItem, PagedResponse, People, SearchItem};
pub use media_type::{MediaType, UnknownMediaType};
pub use video::{Video, Videos};
