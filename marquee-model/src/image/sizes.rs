use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Image size bucket, grouped by the kind of artwork it applies to.
///
/// The widths mirror the buckets TMDB publishes in its `configuration`
/// payload; the image CDN rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSize {
    Poster(PosterSize),
    Backdrop(BackdropSize),
    Profile(ProfileSize),
    Logo(LogoSize),
    Still(StillSize),
}

impl ImageSize {
    /// Default poster size for grids (342px)
    pub const fn poster() -> Self {
        Self::Poster(PosterSize::W342)
    }

    /// Default backdrop size for detail headers (1280px)
    pub const fn backdrop() -> Self {
        Self::Backdrop(BackdropSize::W1280)
    }

    /// Default profile size for cast rows (185px)
    pub const fn profile() -> Self {
        Self::Profile(ProfileSize::W185)
    }

    /// Default logo size (300px)
    pub const fn logo() -> Self {
        Self::Logo(LogoSize::W300)
    }

    /// Default still size (300px)
    pub const fn still() -> Self {
        Self::Still(StillSize::W300)
    }

    /// Every bucket across every kind, `original` included.
    pub fn all() -> impl Iterator<Item = ImageSize> {
        PosterSize::ALL
            .into_iter()
            .map(Self::Poster)
            .chain(BackdropSize::ALL.into_iter().map(Self::Backdrop))
            .chain(ProfileSize::ALL.into_iter().map(Self::Profile))
            .chain(LogoSize::ALL.into_iter().map(Self::Logo))
            .chain(StillSize::ALL.into_iter().map(Self::Still))
    }

    /// Artwork kind, the prefix accepted by `FromStr`.
    pub const fn kind(&self) -> &'static str {
        match self {
            ImageSize::Poster(_) => "poster",
            ImageSize::Backdrop(_) => "backdrop",
            ImageSize::Profile(_) => "profile",
            ImageSize::Logo(_) => "logo",
            ImageSize::Still(_) => "still",
        }
    }

    /// URL segment, e.g. `w500` or `original`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Poster(s) => s.as_str(),
            ImageSize::Backdrop(s) => s.as_str(),
            ImageSize::Profile(s) => s.as_str(),
            ImageSize::Logo(s) => s.as_str(),
            ImageSize::Still(s) => s.as_str(),
        }
    }

    pub const fn width(&self) -> Option<u16> {
        match self {
            ImageSize::Poster(s) => s.width(),
            ImageSize::Backdrop(s) => s.width(),
            ImageSize::Profile(s) => s.width(),
            ImageSize::Logo(s) => s.width(),
            ImageSize::Still(s) => s.width(),
        }
    }
}

/// `kind:bucket`, e.g. `profile:h632`; use [`ImageSize::as_str`] for the
/// URL segment.
impl Display for ImageSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.as_str())
    }
}

/// Returned when a size string is not a bucket of the requested kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownImageSize(pub String);

impl Display for UnknownImageSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "unknown image size: {}", self.0)
    }
}

impl std::error::Error for UnknownImageSize {}

/// Poster sizes (2:3 aspect ratio)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PosterSize {
    W92,
    W154,
    W185,
    #[default]
    W342,
    W500,
    W780,
    Original,
}

impl PosterSize {
    pub const ALL: [PosterSize; 7] = [
        Self::W92,
        Self::W154,
        Self::W185,
        Self::W342,
        Self::W500,
        Self::W780,
        Self::Original,
    ];

    pub const fn width(&self) -> Option<u16> {
        match self {
            Self::W92 => Some(92),
            Self::W154 => Some(154),
            Self::W185 => Some(185),
            Self::W342 => Some(342),
            Self::W500 => Some(500),
            Self::W780 => Some(780),
            Self::Original => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::W92 => "w92",
            Self::W154 => "w154",
            Self::W185 => "w185",
            Self::W342 => "w342",
            Self::W500 => "w500",
            Self::W780 => "w780",
            Self::Original => "original",
        }
    }
}

/// Backdrop sizes (16:9 aspect ratio)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BackdropSize {
    W300,
    W780,
    #[default]
    W1280,
    Original,
}

impl BackdropSize {
    pub const ALL: [BackdropSize; 4] =
        [Self::W300, Self::W780, Self::W1280, Self::Original];

    pub const fn width(&self) -> Option<u16> {
        match self {
            Self::W300 => Some(300),
            Self::W780 => Some(780),
            Self::W1280 => Some(1280),
            Self::Original => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::W300 => "w300",
            Self::W780 => "w780",
            Self::W1280 => "w1280",
            Self::Original => "original",
        }
    }
}

/// Person profile sizes. `h632` is bounded by height, not width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProfileSize {
    W45,
    #[default]
    W185,
    H632,
    Original,
}

impl ProfileSize {
    pub const ALL: [ProfileSize; 4] =
        [Self::W45, Self::W185, Self::H632, Self::Original];

    pub const fn width(&self) -> Option<u16> {
        match self {
            Self::W45 => Some(45),
            Self::W185 => Some(185),
            Self::H632 | Self::Original => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::W45 => "w45",
            Self::W185 => "w185",
            Self::H632 => "h632",
            Self::Original => "original",
        }
    }
}

/// Logo sizes (transparent PNG/SVG)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LogoSize {
    W45,
    W92,
    W154,
    W185,
    #[default]
    W300,
    W500,
    Original,
}

impl LogoSize {
    pub const ALL: [LogoSize; 7] = [
        Self::W45,
        Self::W92,
        Self::W154,
        Self::W185,
        Self::W300,
        Self::W500,
        Self::Original,
    ];

    pub const fn width(&self) -> Option<u16> {
        match self {
            Self::W45 => Some(45),
            Self::W92 => Some(92),
            Self::W154 => Some(154),
            Self::W185 => Some(185),
            Self::W300 => Some(300),
            Self::W500 => Some(500),
            Self::Original => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::W45 => "w45",
            Self::W92 => "w92",
            Self::W154 => "w154",
            Self::W185 => "w185",
            Self::W300 => "w300",
            Self::W500 => "w500",
            Self::Original => "original",
        }
    }
}

/// Episode still sizes (16:9 aspect ratio)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StillSize {
    W92,
    W185,
    #[default]
    W300,
    Original,
}

impl StillSize {
    pub const ALL: [StillSize; 4] =
        [Self::W92, Self::W185, Self::W300, Self::Original];

    pub const fn width(&self) -> Option<u16> {
        match self {
            Self::W92 => Some(92),
            Self::W185 => Some(185),
            Self::W300 => Some(300),
            Self::Original => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::W92 => "w92",
            Self::W185 => "w185",
            Self::W300 => "w300",
            Self::Original => "original",
        }
    }
}

fn parse_bucket<T: Copy>(
    all: &[T],
    as_str: impl Fn(&T) -> &'static str,
    s: &str,
) -> Result<T, UnknownImageSize> {
    all.iter()
        .copied()
        .find(|size| as_str(size) == s)
        .ok_or_else(|| UnknownImageSize(s.to_string()))
}

impl FromStr for PosterSize {
    type Err = UnknownImageSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_bucket(&Self::ALL, Self::as_str, s)
    }
}

impl FromStr for BackdropSize {
    type Err = UnknownImageSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_bucket(&Self::ALL, Self::as_str, s)
    }
}

impl FromStr for ProfileSize {
    type Err = UnknownImageSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_bucket(&Self::ALL, Self::as_str, s)
    }
}

impl FromStr for LogoSize {
    type Err = UnknownImageSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_bucket(&Self::ALL, Self::as_str, s)
    }
}

impl FromStr for StillSize {
    type Err = UnknownImageSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_bucket(&Self::ALL, Self::as_str, s)
    }
}

/// Parses `kind:size` pairs such as `poster:w500` or `profile:h632`.
impl FromStr for ImageSize {
    type Err = UnknownImageSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownImageSize(s.to_string());
        let (kind, size) = s.split_once(':').ok_or_else(unknown)?;
        match kind {
            "poster" => size.parse().map(Self::Poster),
            "backdrop" => size.parse().map(Self::Backdrop),
            "profile" => size.parse().map(Self::Profile),
            "logo" => size.parse().map(Self::Logo),
            "still" => size.parse().map(Self::Still),
            _ => Err(unknown()),
        }
    }
}
