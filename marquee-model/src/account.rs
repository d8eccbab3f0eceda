//! Authentication and account payloads.
//!
//! Sign-in is a three step exchange: a request token is issued, approved by
//! the user on the TMDB website, then traded for a session id; the session
//! id in turn resolves the account id that favorite/watchlist calls need.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::media_type::MediaType;

/// Website page where the user approves a request token.
pub const AUTHENTICATE_URL: &str = "https://www.themoviedb.org/authenticate";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestTokenInfo {
    pub success: bool,
    pub expires_at: Option<String>,
    pub request_token: String,
}

impl RequestTokenInfo {
    pub fn approval_url(&self) -> String {
        format!("{AUTHENTICATE_URL}/{}", self.request_token)
    }
}

/// Body of `POST authentication/session/new`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestToken {
    pub request_token: String,
}

/// Response of `POST authentication/session/new`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionData {
    pub success: bool,
    pub session_id: String,
}

/// Body of `DELETE authentication/session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Gravatar {
    pub hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbAvatar {
    pub avatar_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Avatar {
    pub gravatar: Gravatar,
    pub tmdb: TmdbAvatar,
}

/// The signed-in account (`GET account`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserData {
    pub id: u64,
    pub username: String,
    pub name: Option<String>,
    pub include_adult: bool,
    pub iso_639_1: Option<String>,
    pub iso_3166_1: Option<String>,
    pub avatar: Avatar,
}

impl UserData {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }

    /// Gravatar URL when the account has a hash.
    pub fn gravatar_url(&self) -> Option<String> {
        self.avatar
            .gravatar
            .hash
            .as_deref()
            .filter(|hash| !hash.is_empty())
            .map(|hash| format!("https://www.gravatar.com/avatar/{hash}"))
    }
}

/// Favorite/watchlist/rating flags of one title for the signed-in account.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountState {
    pub id: u64,
    pub favorite: bool,
    pub watchlist: bool,
    /// TMDB sends `false` when unrated and `{"value": 7.5}` otherwise.
    #[serde(with = "rated")]
    pub rated: Option<f32>,
}

mod rated {
    use super::*;

    #[derive(Serialize, Deserialize)]
    struct RatedValue {
        value: f32,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Rated {
        Value(RatedValue),
        Flag(bool),
    }

    pub fn serialize<S: Serializer>(
        rated: &Option<f32>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match rated {
            Some(value) => RatedValue { value: *value }.serialize(serializer),
            None => serializer.serialize_bool(false),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<f32>, D::Error> {
        Ok(match Option::<Rated>::deserialize(deserializer)? {
            Some(Rated::Value(rated)) => Some(rated.value),
            Some(Rated::Flag(_)) | None => None,
        })
    }
}

/// Status envelope returned by mutating endpoints and by TMDB errors.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseResult {
    pub success: Option<bool>,
    pub status_code: Option<i32>,
    pub status_message: Option<String>,
}

impl ResponseResult {
    /// Older endpoints omit `success`; status codes 1, 12 and 13 mean the
    /// write was applied (created, updated, deleted).
    pub fn is_success(&self) -> bool {
        self.success
            .unwrap_or_else(|| matches!(self.status_code, Some(1 | 12 | 13)))
    }
}

/// Body of `POST account/{account_id}/favorite`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRequest {
    pub media_type: MediaType,
    pub media_id: u64,
    pub favorite: bool,
}

/// Body of `POST account/{account_id}/watchlist`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistRequest {
    pub media_type: MediaType,
    pub media_id: u64,
    pub watchlist: bool,
}
