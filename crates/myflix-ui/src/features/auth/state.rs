//! Login and registration form state.
//!
//! # Design
//! - Keep form inputs as strings; convert to request bodies on submit.
//! - Treat empty credentials as invalid before any request is made.

use myflix_client::models::{Credentials, Registration, parse_birthday};
use myflix_client::notice;

use crate::core::ui::ToastKind;

/// Which welcome dialog is open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthDialog {
    /// Log in with existing credentials.
    Login,
    /// Create an account.
    Register,
}

/// Login dialog inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginFormState {
    /// Account name.
    pub username: String,
    /// Password.
    pub password: String,
}

impl LoginFormState {
    /// Convert into the login request.
    ///
    /// # Errors
    /// Returns a message when either field is blank.
    pub fn to_credentials(&self) -> Result<Credentials, String> {
        let username = self.username.trim();
        if username.is_empty() || self.password.is_empty() {
            return Err("Username and password are required".to_string());
        }
        Ok(Credentials {
            username: username.to_string(),
            password: self.password.clone(),
        })
    }
}

/// Registration dialog inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationFormState {
    /// Requested account name.
    pub username: String,
    /// Password.
    pub password: String,
    /// E-mail address.
    pub email: String,
    /// Optional date of birth (`YYYY-MM-DD`).
    pub birthday: String,
}

impl RegistrationFormState {
    /// Convert into the registration request.
    ///
    /// # Errors
    /// Returns a message for blank required fields or a malformed birthday.
    pub fn to_registration(&self) -> Result<Registration, String> {
        let username = self.username.trim();
        let email = self.email.trim();
        if username.is_empty() || self.password.is_empty() || email.is_empty() {
            return Err("Username, password and email are required".to_string());
        }
        let birthday = match self.birthday.trim() {
            "" => None,
            value => Some(parse_birthday(value)?),
        };
        Ok(Registration {
            username: username.to_string(),
            password: self.password.clone(),
            email: email.to_string(),
            birthday,
        })
    }
}

/// Toast for a login attempt.
#[must_use]
pub const fn login_notice(succeeded: bool) -> (ToastKind, &'static str) {
    if succeeded {
        (ToastKind::Success, notice::LOGGED_IN)
    } else {
        (ToastKind::Error, notice::LOGIN_FAILED)
    }
}

/// Toast for a registration attempt.
#[must_use]
pub const fn registration_notice(succeeded: bool) -> (ToastKind, &'static str) {
    if succeeded {
        (ToastKind::Success, notice::REGISTERED)
    } else {
        (ToastKind::Error, notice::REGISTRATION_FAILED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_requires_both_fields() {
        let mut form = LoginFormState {
            username: " ada ".into(),
            password: String::new(),
        };
        assert!(form.to_credentials().is_err());
        form.password = "secret".into();
        let credentials = form.to_credentials().expect("valid form");
        assert_eq!(credentials.username, "ada");
        assert_eq!(credentials.password, "secret");
    }

    #[test]
    fn registration_parses_optional_birthday() {
        let mut form = RegistrationFormState {
            username: "ada".into(),
            password: "secret".into(),
            email: "ada@example.com".into(),
            birthday: String::new(),
        };
        assert!(form.to_registration().expect("valid").birthday.is_none());

        form.birthday = "1990-04-01".into();
        assert!(form.to_registration().expect("valid").birthday.is_some());

        form.birthday = "yesterday".into();
        assert!(form.to_registration().is_err());
    }

    #[test]
    fn notices_use_fixed_texts() {
        assert_eq!(login_notice(true), (ToastKind::Success, "Logged in!"));
        assert_eq!(login_notice(false), (ToastKind::Error, "Unable to log in."));
        assert_eq!(registration_notice(true).1, "User registration successful!");
    }
}
