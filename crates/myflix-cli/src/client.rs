//! Shared CLI context, error types, and session file resolution.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::anyhow;
use myflix_client::{ApiClient, ApiError, ClientConfig, FileBackend, Myflix};
use url::Url;

use crate::cli::OutputFormat;

/// File name of the session store inside the configuration directory.
pub(crate) const SESSION_FILE_NAME: &str = "session.json";

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Unauthorized(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
            Self::Unauthorized(_) => 4,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) | Self::Unauthorized(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::NotAuthenticated => {
                Self::validation("not logged in; run `myflix login` first")
            }
            ApiError::Unauthorized { status } => Self::Unauthorized(format!(
                "the server rejected the session (status {status}); run `myflix login` again"
            )),
            ApiError::Rejected { status, detail } if matches!(status, 400 | 404 | 409 | 422) => {
                Self::validation(detail.unwrap_or_else(|| format!("request rejected (status {status})")))
            }
            ApiError::Rejected { status, detail } => Self::failure(anyhow!(
                "{} (status {status}{})",
                myflix_client::error::GENERIC_FAILURE_MESSAGE,
                detail.map(|d| format!(": {d}")).unwrap_or_default()
            )),
            other => {
                let message = other.user_message();
                Self::failure(anyhow::Error::new(other).context(message))
            }
        }
    }
}

/// Application context passed to command handlers.
pub(crate) struct AppContext {
    pub(crate) service: Myflix<FileBackend>,
    pub(crate) output: OutputFormat,
}

/// Settings needed to build an [`AppContext`].
pub(crate) struct ContextOptions {
    pub(crate) api_url: Url,
    pub(crate) timeout_secs: u64,
    pub(crate) session_file: PathBuf,
    pub(crate) trace_id: String,
    pub(crate) output: OutputFormat,
}

impl AppContext {
    /// Build the HTTP client and load the session file.
    pub(crate) fn build(options: ContextOptions) -> CliResult<Self> {
        let config = ClientConfig {
            base_url: options.api_url,
            timeout: Duration::from_secs(options.timeout_secs),
            request_id: Some(options.trace_id),
        };
        let api = ApiClient::new(&config)
            .map_err(|err| CliError::failure(anyhow!("failed to build HTTP client: {err}")))?;
        let backend = FileBackend::new(options.session_file);
        let service = Myflix::new(api, backend).map_err(|err| {
            CliError::failure(anyhow::Error::new(err).context("failed to load session file"))
        })?;
        Ok(Self {
            service,
            output: options.output,
        })
    }
}

/// Parse the API URL provided to the CLI.
pub(crate) fn parse_url(input: &str) -> Result<Url, String> {
    myflix_client::config::parse_base_url(input).map_err(|err| err.to_string())
}

/// Default session file: `$XDG_CONFIG_HOME/myflix/session.json`, then
/// `$HOME/.config/myflix/session.json`, then the working directory.
pub(crate) fn default_session_file() -> PathBuf {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME")
                .or_else(|| std::env::var_os("USERPROFILE"))
                .filter(|value| !value.is_empty())
                .map(|home| PathBuf::from(home).join(".config"))
        })
        .map_or_else(
            || PathBuf::from(format!("myflix-{SESSION_FILE_NAME}")),
            |dir| dir.join("myflix").join(SESSION_FILE_NAME),
        )
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_map_to_exit_codes() {
        assert_eq!(CliError::from(ApiError::NotAuthenticated).exit_code(), 2);
        assert_eq!(
            CliError::from(ApiError::Unauthorized { status: 401 }).exit_code(),
            4
        );

        let conflict = CliError::from(ApiError::Rejected {
            status: 400,
            detail: Some("ada already exists".into()),
        });
        assert_eq!(conflict.exit_code(), 2);
        assert_eq!(conflict.display_message(), "ada already exists");

        let outage = CliError::from(ApiError::Rejected {
            status: 503,
            detail: Some("maintenance".into()),
        });
        assert_eq!(outage.exit_code(), 3);
        assert!(outage.display_message().contains("status 503: maintenance"));
    }

    #[test]
    fn parse_url_rejects_garbage() {
        assert!(parse_url("http://localhost:8080").is_ok());
        assert!(parse_url("definitely not a url").is_err());
    }

    #[test]
    fn default_session_file_ends_with_expected_name() {
        let path = default_session_file();
        assert!(path.to_string_lossy().ends_with(SESSION_FILE_NAME));
    }
}
