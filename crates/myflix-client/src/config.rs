//! Client configuration.

use std::time::Duration;

use url::Url;

use crate::error::ApiError;

/// Hosted myFlix API used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "https://secret-peak-11846.herokuapp.com/";

/// Request timeout applied on native targets.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Header carrying the caller's trace identifier.
pub const HEADER_REQUEST_ID: &str = "x-request-id";

/// Settings used to build an [`crate::ApiClient`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: Url,
    /// Per-request timeout (ignored in the browser).
    pub timeout: Duration,
    /// Optional trace identifier sent as `x-request-id`.
    pub request_id: Option<String>,
}

impl ClientConfig {
    /// Build a configuration for `base_url` with default timeout.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidBaseUrl`] when the URL does not parse or
    /// cannot carry path segments (e.g. `mailto:`).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            request_id: None,
        })
    }

    /// Override the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Attach a trace identifier to every request.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_URL)
                .expect("DEFAULT_API_URL is a valid absolute URL"),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            request_id: None,
        }
    }
}

/// Parse and validate an API base URL.
///
/// # Errors
/// Returns [`ApiError::InvalidBaseUrl`] for unparsable or non-hierarchical URLs.
pub fn parse_base_url(input: &str) -> Result<Url, ApiError> {
    let url = Url::parse(input.trim()).map_err(|_| ApiError::InvalidBaseUrl {
        value: input.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidBaseUrl {
            value: input.to_string(),
        });
    }
    Ok(url)
}
