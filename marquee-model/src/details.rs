use serde::{Deserialize, Serialize};

use crate::image::MovieImage;
use crate::media::MediaItem;
use crate::video::{Video, Videos};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionCompany {
    pub id: u64,
    pub name: String,
    pub logo_path: Option<String>,
    pub origin_country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
    pub known_for_department: Option<String>,
    pub order: u32,
    pub credit_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    pub job: Option<String>,
    pub department: Option<String>,
    pub profile_path: Option<String>,
    pub credit_id: Option<String>,
}

/// Cast and crew appended to a details payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credits {
    pub cast: Vec<CastMember>,
    pub crew: Vec<CrewMember>,
}

impl Credits {
    /// Crew members credited as director.
    pub fn directors(&self) -> impl Iterator<Item = &CrewMember> {
        self.crew
            .iter()
            .filter(|member| member.job.as_deref() == Some("Director"))
    }
}

/// Full movie or tv details.
///
/// `credits` and `videos` are only present when the request asked for them
/// through `append_to_response`; otherwise they stay `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub media: MediaItem,
    pub genres: Vec<Genre>,
    pub runtime: Option<u32>,
    pub episode_run_time: Vec<u32>,
    pub tagline: Option<String>,
    pub revenue: Option<u64>,
    pub budget: Option<u64>,
    pub status: Option<String>,
    pub homepage: Option<String>,
    pub imdb_id: Option<String>,
    pub number_of_seasons: Option<u32>,
    pub number_of_episodes: Option<u32>,
    pub production_companies: Vec<ProductionCompany>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<Credits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videos: Option<Videos>,
}

impl MovieDetails {
    pub fn id(&self) -> u64 {
        self.media.id
    }

    /// Movie runtime, or the first listed episode runtime for tv.
    pub fn runtime_minutes(&self) -> Option<u32> {
        self.runtime
            .filter(|minutes| *minutes > 0)
            .or_else(|| self.episode_run_time.first().copied())
    }

    /// Trailers and teasers, official uploads first.
    pub fn trailers(&self) -> Vec<&Video> {
        let mut trailers: Vec<&Video> = self
            .videos
            .iter()
            .flat_map(|videos| videos.results.iter())
            .filter(|video| video.is_trailer())
            .collect();
        trailers.sort_by_key(|video| !video.official);
        trailers
    }
}

/// Profile images appended to person details.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PeopleImages {
    pub profiles: Vec<MovieImage>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PeopleDetails {
    pub id: u64,
    pub name: String,
    pub biography: Option<String>,
    pub birthday: Option<String>,
    pub deathday: Option<String>,
    pub place_of_birth: Option<String>,
    pub gender: u8,
    pub popularity: f32,
    pub also_known_as: Vec<String>,
    pub known_for_department: Option<String>,
    pub profile_path: Option<String>,
    pub homepage: Option<String>,
    pub imdb_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<PeopleImages>,
}

/// One title in a person's combined credits.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditItem {
    #[serde(flatten)]
    pub media: MediaItem,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_count: Option<u32>,
    pub credit_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PeopleCredits {
    pub id: u64,
    pub cast: Vec<CreditItem>,
    pub crew: Vec<CreditItem>,
}

impl PeopleCredits {
    /// Cast credits ordered by popularity, most popular first.
    pub fn known_for(&self) -> Vec<&CreditItem> {
        let mut cast: Vec<&CreditItem> = self.cast.iter().collect();
        cast.sort_by(|a, b| b.media.popularity.total_cmp(&a.media.popularity));
        cast
    }
}
