//! Typed wrapper over the myFlix REST endpoints.
//!
//! Every method issues exactly one request. Authenticated methods take the
//! bearer token explicitly; session bookkeeping lives in [`crate::Myflix`].

use myflix_api_models::{
    Credentials, Director, Genre, LoginResponse, Movie, Registration, User, UserUpdate,
};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::config::{ClientConfig, HEADER_REQUEST_ID};
use crate::error::ApiError;

/// Low-level HTTP client for the myFlix API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    /// Returns [`ApiError::Network`] when the HTTP stack cannot be initialised.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut default_headers = HeaderMap::new();
        if let Some(request_id) = &config.request_id {
            match HeaderValue::from_str(request_id) {
                Ok(value) => {
                    default_headers.insert(HEADER_REQUEST_ID, value);
                }
                Err(_) => tracing::warn!("request id contains invalid characters; omitting header"),
            }
        }

        let builder = Client::builder().default_headers(default_headers);
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.timeout);
        let http = builder
            .build()
            .map_err(|source| ApiError::Network { source })?;

        Ok(Self::with_client(http, config.base_url.clone()))
    }

    /// Wrap an existing HTTP client.
    #[must_use]
    pub const fn with_client(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `POST /users`
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn register(&self, registration: &Registration) -> Result<User, ApiError> {
        let url = self.endpoint(&["users"])?;
        self.send_json(self.http.post(url).json(registration), "register")
            .await
    }

    /// `POST /login`
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let url = self.endpoint(&["login"])?;
        self.send_json(self.http.post(url).json(credentials), "login")
            .await
    }

    /// `GET /movies`
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn movies(&self, token: &str) -> Result<Vec<Movie>, ApiError> {
        let url = self.endpoint(&["movies"])?;
        self.send_json(self.http.get(url).bearer_auth(token), "list movies")
            .await
    }

    /// `GET /movies/{title}`
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn movie(&self, token: &str, title: &str) -> Result<Movie, ApiError> {
        let url = self.endpoint(&["movies", title])?;
        self.send_json(self.http.get(url).bearer_auth(token), "get movie")
            .await
    }

    /// `GET /movies/director/{name}`
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn director(&self, token: &str, name: &str) -> Result<Director, ApiError> {
        let url = self.endpoint(&["movies", "director", name])?;
        self.send_json(self.http.get(url).bearer_auth(token), "get director")
            .await
    }

    /// `GET /movies/genre/{name}`
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn genre(&self, token: &str, name: &str) -> Result<Genre, ApiError> {
        let url = self.endpoint(&["movies", "genre", name])?;
        self.send_json(self.http.get(url).bearer_auth(token), "get genre")
            .await
    }

    /// `GET /users/{username}`
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn user(&self, token: &str, username: &str) -> Result<User, ApiError> {
        let url = self.endpoint(&["users", username])?;
        self.send_json(self.http.get(url).bearer_auth(token), "get user")
            .await
    }

    /// `PUT /users/{username}`
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn update_user(
        &self,
        token: &str,
        username: &str,
        update: &UserUpdate,
    ) -> Result<User, ApiError> {
        let url = self.endpoint(&["users", username])?;
        self.send_json(
            self.http.put(url).bearer_auth(token).json(update),
            "update user",
        )
        .await
    }

    /// `DELETE /users/{username}`
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn delete_user(&self, token: &str, username: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["users", username])?;
        self.send(self.http.delete(url).bearer_auth(token), "delete user")
            .await
            .map(drop)
    }

    /// `POST /users/{username}/movies/{movie_id}`
    ///
    /// Returns the updated user when the server echoes it.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn add_favourite(
        &self,
        token: &str,
        username: &str,
        movie_id: &str,
    ) -> Result<Option<User>, ApiError> {
        let url = self.endpoint(&["users", username, "movies", movie_id])?;
        let body = self
            .send(self.http.post(url).bearer_auth(token), "add favourite")
            .await?;
        Ok(echoed_user(&body))
    }

    /// `DELETE /users/{username}/movies/{movie_id}`
    ///
    /// Returns the updated user when the server echoes it.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn remove_favourite(
        &self,
        token: &str,
        username: &str,
        movie_id: &str,
    ) -> Result<Option<User>, ApiError> {
        let url = self.endpoint(&["users", username, "movies", movie_id])?;
        let body = self
            .send(self.http.delete(url).bearer_auth(token), "remove favourite")
            .await?;
        Ok(echoed_user(&body))
    }

    /// Append percent-encoded path segments to the base URL.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl {
                value: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &'static str,
    ) -> Result<T, ApiError> {
        let body = self.send(request, operation).await?;
        serde_json::from_str(&body).map_err(|source| {
            tracing::error!(operation, error = %source, "response body did not decode");
            ApiError::Decode { source }
        })
    }

    async fn send(
        &self,
        request: RequestBuilder,
        operation: &'static str,
    ) -> Result<String, ApiError> {
        let response = request.send().await.map_err(|source| {
            tracing::error!(operation, error = %source, "request failed");
            ApiError::Network { source }
        })?;
        let status = response.status();
        let body = response.text().await.map_err(|source| {
            tracing::error!(operation, error = %source, "response body could not be read");
            ApiError::Network { source }
        })?;

        if status.is_success() {
            tracing::debug!(operation, status = status.as_u16(), "request succeeded");
            Ok(body)
        } else {
            Err(classify_failure(operation, status, &body))
        }
    }
}

/// Map a non-success response onto an [`ApiError`].
pub(crate) fn classify_failure(operation: &str, status: StatusCode, body: &str) -> ApiError {
    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        tracing::warn!(operation, status = status.as_u16(), "request unauthorized");
        return ApiError::Unauthorized {
            status: status.as_u16(),
        };
    }
    let detail = extract_detail(body);
    tracing::warn!(
        operation,
        status = status.as_u16(),
        detail = detail.as_deref().unwrap_or(""),
        "request rejected"
    );
    ApiError::Rejected {
        status: status.as_u16(),
        detail,
    }
}

/// Pull a human-readable explanation out of an error body.
///
/// Understands validation error lists (`{"errors": [{"msg": ..}]}`),
/// `{"message": ..}` / `{"error": ..}` objects and plain text.
pub(crate) fn extract_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    let Ok(value) = serde_json::from_str::<Value>(trimmed) else {
        return Some(trimmed.to_string());
    };
    match value {
        Value::String(text) => Some(text),
        Value::Object(map) => {
            if let Some(Value::Array(errors)) = map.get("errors") {
                let messages: Vec<&str> = errors
                    .iter()
                    .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                    .collect();
                if !messages.is_empty() {
                    return Some(messages.join("; "));
                }
            }
            ["message", "error"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .map_or_else(|| Some(trimmed.to_string()), |text| Some(text.to_string()))
        }
        _ => Some(trimmed.to_string()),
    }
}

fn echoed_user(body: &str) -> Option<User> {
    serde_json::from_str::<User>(body).ok()
}
