//! Command handlers grouped by concern.

pub(crate) mod account;
pub(crate) mod favourites;
pub(crate) mod movies;
pub(crate) mod profile;

use anyhow::anyhow;

use crate::client::{CliError, CliResult};

/// Use `provided` when given, otherwise prompt on the terminal without echo.
pub(crate) fn resolve_password(provided: Option<String>, prompt: &str) -> CliResult<String> {
    let password = match provided {
        Some(password) => password,
        None => rpassword::prompt_password(prompt)
            .map_err(|err| CliError::failure(anyhow!("failed to read password: {err}")))?,
    };
    if password.is_empty() {
        return Err(CliError::validation("password must not be empty"));
    }
    Ok(password)
}

/// Reject blank values for required text arguments.
pub(crate) fn require_text(value: &str, field: &str) -> CliResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CliError::validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provided_password_is_used_verbatim() {
        let password =
            resolve_password(Some(" s3cret ".into()), "Password: ").unwrap_or_default();
        assert_eq!(password, " s3cret ");
    }

    #[test]
    fn empty_values_are_validation_errors() {
        let err = resolve_password(Some(String::new()), "Password: ")
            .expect_err("empty password");
        assert_eq!(err.exit_code(), 2);
        let err = require_text("   ", "username").expect_err("blank username");
        assert_eq!(err.display_message(), "username must not be empty");
        assert_eq!(require_text(" ada ", "username").ok().as_deref(), Some("ada"));
    }
}
