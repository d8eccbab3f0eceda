use serde::{Deserialize, Serialize};

/// One image entry from an `images` payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieImage {
    pub aspect_ratio: f32,
    pub file_path: Option<String>,
    pub height: u32,
    pub width: u32,
    pub iso_639_1: Option<String>,
    pub vote_average: f32,
    pub vote_count: u32,
}

/// Images for one movie or tv show, grouped by kind in server order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesData {
    pub id: u64,
    pub backdrops: Vec<MovieImage>,
    pub posters: Vec<MovieImage>,
    pub logos: Vec<MovieImage>,
}

impl ImagesData {
    pub fn is_empty(&self) -> bool {
        self.backdrops.is_empty()
            && self.posters.is_empty()
            && self.logos.is_empty()
    }

    /// First logo tagged with `language`, else the first untagged logo.
    pub fn logo_for(&self, language: &str) -> Option<&MovieImage> {
        let wanted = language.split('-').next().unwrap_or(language);
        self.logos
            .iter()
            .find(|logo| logo.iso_639_1.as_deref() == Some(wanted))
            .or_else(|| self.logos.iter().find(|logo| logo.iso_639_1.is_none()))
    }
}
