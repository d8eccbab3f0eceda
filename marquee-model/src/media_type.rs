use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Discriminant shared by the movie, tv and person endpoints.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Feature film
    #[default]
    Movie = 0,
    /// Television series
    Tv = 1,
    /// Cast or crew member
    Person = 2,
}

impl MediaType {
    pub const ALL: [MediaType; 3] = [Self::Movie, Self::Tv, Self::Person];

    /// Path segment used by TMDB routes (`movie/{id}`, `tv/{id}`, ...).
    pub const fn path_segment(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
            MediaType::Person => "person",
        }
    }

    /// Numeric code used by persisted client state.
    pub const fn code(&self) -> i32 {
        *self as i32
    }

    /// Movies and tv shows can be favorited, rated and listed; people cannot.
    pub const fn is_title(&self) -> bool {
        matches!(self, MediaType::Movie | MediaType::Tv)
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// Returned when a string or numeric code does not name a media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMediaType(pub String);

impl Display for UnknownMediaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "unknown media type: {}", self.0)
    }
}

impl std::error::Error for UnknownMediaType {}

impl FromStr for MediaType {
    type Err = UnknownMediaType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" | "movies" => Ok(MediaType::Movie),
            "tv" | "series" | "show" => Ok(MediaType::Tv),
            "person" | "people" => Ok(MediaType::Person),
            _ => Err(UnknownMediaType(s.to_string())),
        }
    }
}

impl TryFrom<i32> for MediaType {
    type Error = UnknownMediaType;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MediaType::Movie),
            1 => Ok(MediaType::Tv),
            2 => Ok(MediaType::Person),
            other => Err(UnknownMediaType(other.to_string())),
        }
    }
}
