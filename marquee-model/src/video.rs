use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A trailer, teaser or clip hosted on an external video site.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Video {
    pub id: Option<String>,
    pub iso_639_1: Option<String>,
    pub iso_3166_1: Option<String>,
    pub key: Option<String>,
    pub name: Option<String>,
    pub site: Option<String>,
    pub size: u32,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub official: bool,
    pub published_at: Option<DateTime<Utc>>,
}

impl Video {
    pub fn is_trailer(&self) -> bool {
        matches!(self.kind.as_deref(), Some("Trailer") | Some("Teaser"))
    }

    /// Public watch page for the sites TMDB links to.
    pub fn watch_url(&self) -> Option<String> {
        let key = self.key.as_deref().filter(|key| !key.is_empty())?;
        match self.site.as_deref() {
            Some("YouTube") => {
                Some(format!("https://www.youtube.com/watch?v={key}"))
            }
            Some("Vimeo") => Some(format!("https://vimeo.com/{key}")),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Videos {
    pub results: Vec<Video>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_published_timestamp_and_builds_watch_url() {
        let video: Video = serde_json::from_str(
            r#"{"iso_639_1": "en", "iso_3166_1": "US",
                "key": "BdJKm16Co6M", "site": "YouTube", "size": 1080,
                "type": "Trailer", "official": true,
                "published_at": "2014-10-10T20:33:05.000Z",
                "id": "5c9294240e0a267cd516835f"}"#,
        )
        .unwrap();
        assert!(video.is_trailer());
        assert!(video.published_at.is_some());
        assert_eq!(
            video.watch_url().as_deref(),
            Some("https://www.youtube.com/watch?v=BdJKm16Co6M")
        );
    }

    #[test]
    fn unknown_site_has_no_watch_url() {
        let video = Video {
            key: Some("abc".into()),
            site: Some("Dailymotion".into()),
            ..Default::default()
        };
        assert_eq!(video.watch_url(), None);
    }
}
