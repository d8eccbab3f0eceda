use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::media_type::MediaType;

/// A movie or tv entry as it appears in list, trending and search payloads.
///
/// TMDB uses `title`/`release_date` for movies and `name`/`first_air_date`
/// for tv; both spellings are kept so one record serves both.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaItem {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_language: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: f32,
    pub vote_count: u32,
    pub popularity: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
    pub genre_ids: Vec<u32>,
    pub adult: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
}

impl MediaItem {
    /// Movie title or tv name, whichever the payload carried.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .or(self.original_title.as_deref())
            .or(self.original_name.as_deref())
            .unwrap_or_default()
    }

    /// Release date for movies, first air date for tv.
    pub fn display_date(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .or(self.first_air_date.as_deref())
            .filter(|date| !date.is_empty())
    }

    pub fn release_year(&self) -> Option<i32> {
        self.display_date()
            .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
            .map(|date| date.year())
    }

    /// List endpoints such as `movie/popular` omit `media_type`; callers know
    /// which route they hit and pass it as the fallback.
    pub fn media_type_or(&self, fallback: MediaType) -> MediaType {
        self.media_type.unwrap_or(fallback)
    }
}

/// A person entry from trending/popular people payloads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct People {
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    pub profile_path: Option<String>,
    pub known_for_department: Option<String>,
    pub popularity: f32,
    pub gender: u8,
    pub adult: bool,
    pub known_for: Vec<MediaItem>,
}

/// One entry of `search/multi`: a title or a person, tagged by `media_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchItem {
    pub media_type: MediaType,
    #[serde(flatten)]
    pub media: MediaItem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub known_for_department: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub known_for: Vec<MediaItem>,
}

impl SearchItem {
    pub fn is_person(&self) -> bool {
        self.media_type == MediaType::Person
    }

    /// The title view of this result with its discriminant filled in.
    pub fn as_media_item(&self) -> MediaItem {
        MediaItem {
            media_type: Some(self.media_type),
            ..self.media.clone()
        }
    }

    /// Poster for titles, profile picture for people.
    pub fn image_path(&self) -> Option<&str> {
        if self.is_person() {
            self.profile_path.as_deref()
        } else {
            self.media.poster_path.as_deref()
        }
    }
}

/// Paged list envelope shared by every list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResponse<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

fn first_page() -> u32 {
    1
}

impl<T> Default for PagedResponse<T> {
    fn default() -> Self {
        Self {
            page: 1,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }
}

impl<T> PagedResponse<T> {
    /// More pages exist while the reported page is below the reported total.
    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn next_page(&self) -> Option<u32> {
        self.has_next_page().then(|| self.page + 1)
    }
}
