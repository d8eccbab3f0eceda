use serde::{Deserialize, Serialize};

use crate::image::{DEFAULT_IMAGE_BASE_URL, ImageSize, build_image_url};

/// Image CDN description delivered by `GET configuration`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfiguration {
    pub base_url: String,
    pub secure_base_url: String,
    pub backdrop_sizes: Vec<String>,
    pub logo_sizes: Vec<String>,
    pub poster_sizes: Vec<String>,
    pub profile_sizes: Vec<String>,
    pub still_sizes: Vec<String>,
}

impl ImageConfiguration {
    /// HTTPS base URL, falling back to the public CDN before the remote
    /// configuration has been loaded.
    pub fn effective_base_url(&self) -> &str {
        [&self.secure_base_url, &self.base_url]
            .into_iter()
            .map(|url| url.trim())
            .find(|url| !url.is_empty())
            .unwrap_or(DEFAULT_IMAGE_BASE_URL)
    }

    pub fn url(&self, size: ImageSize, path: Option<&str>) -> Option<String> {
        build_image_url(self.effective_base_url(), size, path)
    }

    /// Whether the remote configuration lists `size` for its kind. An empty
    /// list (configuration not loaded) accepts every bucket.
    pub fn supports(&self, size: ImageSize) -> bool {
        let listed = match size {
            ImageSize::Poster(_) => &self.poster_sizes,
            ImageSize::Backdrop(_) => &self.backdrop_sizes,
            ImageSize::Profile(_) => &self.profile_sizes,
            ImageSize::Logo(_) => &self.logo_sizes,
            ImageSize::Still(_) => &self.still_sizes,
        };
        listed.is_empty() || listed.iter().any(|s| s == size.as_str())
    }
}

/// Payload of `GET configuration`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbConfiguration {
    pub images: ImageConfiguration,
    pub change_keys: Vec<String>,
}

/// Which palette the client renders with.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DarkThemeMode {
    #[default]
    FollowSystem = 0,
    Light = 1,
    Dark = 2,
}

impl DarkThemeMode {
    pub const fn code(&self) -> i32 {
        *self as i32
    }

    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::FollowSystem),
            1 => Some(Self::Light),
            2 => Some(Self::Dark),
            _ => None,
        }
    }
}

/// User preferences persisted on the device.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(default)]
pub struct ThemePreferences {
    pub dark_theme: DarkThemeMode,
    pub use_dynamic_theme: bool,
}

/// Snapshot of the client configuration: remote image settings combined
/// with the local theme preferences.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    pub images: ImageConfiguration,
    pub dark_theme: DarkThemeMode,
    pub use_dynamic_theme: bool,
}

impl TmdbConfig {
    pub fn from_parts(
        images: ImageConfiguration,
        preferences: ThemePreferences,
    ) -> Self {
        Self {
            images,
            dark_theme: preferences.dark_theme,
            use_dynamic_theme: preferences.use_dynamic_theme,
        }
    }

    pub fn preferences(&self) -> ThemePreferences {
        ThemePreferences {
            dark_theme: self.dark_theme,
            use_dynamic_theme: self.use_dynamic_theme,
        }
    }

    pub fn image_url(
        &self,
        size: ImageSize,
        path: Option<&str>,
    ) -> Option<String> {
        self.images.url(size, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::PosterSize;

    #[test]
    fn prefers_secure_base_url() {
        let images: ImageConfiguration = serde_json::from_str(
            r#"{"base_url": "http://image.tmdb.org/t/p/",
                "secure_base_url": "https://image.tmdb.org/t/p/",
                "poster_sizes": ["w92", "w500", "original"]}"#,
        )
        .unwrap();
        assert_eq!(
            images
                .url(ImageSize::Poster(PosterSize::W500), Some("/a.jpg"))
                .as_deref(),
            Some("https://image.tmdb.org/t/p/w500/a.jpg")
        );
        assert!(images.supports(ImageSize::Poster(PosterSize::Original)));
        assert!(!images.supports(ImageSize::Poster(PosterSize::W342)));
    }

    #[test]
    fn unloaded_configuration_uses_public_cdn() {
        let config = TmdbConfig::default();
        assert_eq!(config.images.effective_base_url(), DEFAULT_IMAGE_BASE_URL);
        assert!(config.images.supports(ImageSize::logo()));
    }

    #[test]
    fn theme_codes_round_trip() {
        for mode in
            [DarkThemeMode::FollowSystem, DarkThemeMode::Light, DarkThemeMode::Dark]
        {
            assert_eq!(DarkThemeMode::from_code(mode.code()), Some(mode));
        }
        assert_eq!(DarkThemeMode::from_code(9), None);
    }
}
