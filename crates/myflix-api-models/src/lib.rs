#![forbid(unsafe_code)]
#![deny(unused_must_use, rustdoc::broken_intra_doc_links, rustdoc::bare_urls)]
#![warn(
    missing_docs,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
//! Shared HTTP DTOs for the myFlix movie API.
//!
//! The service speaks PascalCase JSON (`Username`, `FavouriteMovies`, ...) with
//! Mongo-style `_id` identifiers. These types are re-used by the client library,
//! the CLI and the web UI so the wire contract lives in exactly one place.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of a movie in the catalog (`Movie._id`).
pub type MovieId = String;

/// Registered account as returned by the `/users` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct User {
    /// Server-side document identifier.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Unique login name; all user-scoped paths are keyed by it.
    #[serde(rename = "Username")]
    pub username: String,
    /// Password hash echoed by the server. Never written to the local cache.
    #[serde(rename = "Password", default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Contact e-mail.
    #[serde(rename = "Email", default)]
    pub email: String,
    /// Date of birth.
    #[serde(
        rename = "Birthday",
        default,
        with = "birthday",
        skip_serializing_if = "Option::is_none"
    )]
    pub birthday: Option<NaiveDate>,
    /// Favourite movie identifiers in insertion order.
    #[serde(rename = "FavouriteMovies", alias = "FavoriteMovies", default)]
    pub favourite_movies: Vec<MovieId>,
}

impl User {
    /// Copy of the user without the password field, suitable for caching.
    #[must_use]
    pub fn without_password(&self) -> Self {
        Self {
            password: None,
            ..self.clone()
        }
    }

    /// Whether `movie_id` is recorded in the favourites list.
    #[must_use]
    pub fn has_favourite(&self, movie_id: &str) -> bool {
        self.favourite_movies.iter().any(|id| id == movie_id)
    }
}

/// Genre metadata nested in a movie document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Genre {
    /// Genre name (also the lookup key for `/movies/genre/{name}`).
    #[serde(rename = "Name", default)]
    pub name: String,
    /// Free-text genre description.
    #[serde(rename = "Description", default)]
    pub description: String,
}

/// Director metadata nested in a movie document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Director {
    /// Director name (also the lookup key for `/movies/director/{name}`).
    #[serde(rename = "Name", default)]
    pub name: String,
    /// Short biography.
    #[serde(rename = "Bio", default)]
    pub bio: String,
    /// Birth year or date, as stored by the service.
    #[serde(rename = "Birth", default, skip_serializing_if = "Option::is_none")]
    pub birth: Option<String>,
    /// Death year or date, as stored by the service.
    #[serde(rename = "Death", default, skip_serializing_if = "Option::is_none")]
    pub death: Option<String>,
}

/// Catalog entry returned by the `/movies` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    /// Catalog identifier referenced by `User::favourite_movies`.
    #[serde(rename = "_id")]
    pub id: MovieId,
    /// Display title (also the lookup key for `/movies/{title}`).
    #[serde(rename = "Title")]
    pub title: String,
    /// Synopsis.
    #[serde(rename = "Description", default)]
    pub description: String,
    /// Genre the movie is filed under.
    #[serde(rename = "Genre", default)]
    pub genre: Genre,
    /// Directing credit.
    #[serde(rename = "Director", default)]
    pub director: Director,
    /// Poster URL.
    #[serde(rename = "ImagePath", default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    /// Whether the movie is featured on the landing page.
    #[serde(rename = "Featured", default)]
    pub featured: bool,
    /// Credited actors.
    #[serde(rename = "Actors", default, skip_serializing_if = "Vec::is_empty")]
    pub actors: Vec<String>,
}

/// Request body for `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    /// Account name.
    #[serde(rename = "Username")]
    pub username: String,
    /// Clear-text password.
    #[serde(rename = "Password")]
    pub password: String,
}

/// Response body for `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    /// Authenticated account.
    pub user: User,
    /// Bearer token for subsequent calls.
    pub token: String,
}

/// Request body for `POST /users`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Registration {
    /// Requested account name.
    #[serde(rename = "Username")]
    pub username: String,
    /// Clear-text password.
    #[serde(rename = "Password")]
    pub password: String,
    /// Contact e-mail.
    #[serde(rename = "Email")]
    pub email: String,
    /// Optional date of birth.
    #[serde(
        rename = "Birthday",
        default,
        with = "birthday",
        skip_serializing_if = "Option::is_none"
    )]
    pub birthday: Option<NaiveDate>,
}

/// Request body for `PUT /users/{username}`: the editable profile subset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserUpdate {
    /// New (or unchanged) account name.
    #[serde(rename = "Username")]
    pub username: String,
    /// New password; omitted to keep the current one.
    #[serde(rename = "Password", default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// New (or unchanged) e-mail.
    #[serde(rename = "Email")]
    pub email: String,
    /// New (or unchanged) date of birth.
    #[serde(
        rename = "Birthday",
        default,
        with = "birthday",
        skip_serializing_if = "Option::is_none"
    )]
    pub birthday: Option<NaiveDate>,
}

impl UserUpdate {
    /// Start an update that keeps every field of `user` as-is.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            password: None,
            email: user.email.clone(),
            birthday: user.birthday,
        }
    }
}

/// Parse a birthday as sent by the service or typed by a user.
///
/// Accepts a plain `YYYY-MM-DD` date or an RFC 3339 timestamp whose date part
/// is used (`1990-04-01T00:00:00.000Z`).
///
/// # Errors
/// Returns a message when the value is empty or not a calendar date.
pub fn parse_birthday(value: &str) -> Result<NaiveDate, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("birthday must not be empty".to_string());
    }
    let date_part = trimmed.split_once('T').map_or(trimmed, |(date, _)| date);
    NaiveDate::parse_from_str(date_part, birthday::FORMAT)
        .map_err(|err| format!("invalid birthday '{trimmed}': {err}"))
}

mod birthday {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) const FORMAT: &str = "%Y-%m-%d";

    #[allow(clippy::ref_option)]
    pub(crate) fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => super::parse_birthday(&raw)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}
