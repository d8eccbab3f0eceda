//! Consumer focused snapshot of the model surface.
//! Prefer importing from this module in UI and CLI layers.

pub use super::account::{
    AccountState, RequestTokenInfo, ResponseResult, UserData,
};
pub use super::configuration::{
    DarkThemeMode, ImageConfiguration, ThemePreferences, TmdbConfig,
    TmdbConfiguration,
};
pub use super::details::{
    Credits, MovieDetails, PeopleCredits, PeopleDetails,
};
pub use super::image::{ImageSize, ImagesData, MovieImage, build_image_url};
pub use super::media::{MediaItem, PagedResponse, People, SearchItem};
pub use super::media_type::MediaType;
pub use super::video::Video;
