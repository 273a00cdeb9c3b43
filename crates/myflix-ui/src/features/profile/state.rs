//! Profile edit form state.
//!
//! # Design
//! - Keep form inputs as strings for lossless editing.
//! - Convert to the shared `UserUpdate` only on save.

use myflix_client::models::{User, UserUpdate, parse_birthday};

/// Field being edited on the profile form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileField {
    /// Account name.
    Username,
    /// New password.
    Password,
    /// E-mail address.
    Email,
    /// Date of birth (`YYYY-MM-DD`).
    Birthday,
}

/// Editable profile fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileFormState {
    /// Account name.
    pub username: String,
    /// New password; empty keeps the current one.
    pub password: String,
    /// E-mail address.
    pub email: String,
    /// Date of birth; empty clears nothing and sends none.
    pub birthday: String,
}

impl ProfileFormState {
    /// Prefill the form from the account.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            password: String::new(),
            email: user.email.clone(),
            birthday: user
                .birthday
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }

    /// Replace one field with user input.
    pub fn set(&mut self, field: ProfileField, value: String) {
        match field {
            ProfileField::Username => self.username = value,
            ProfileField::Password => self.password = value,
            ProfileField::Email => self.email = value,
            ProfileField::Birthday => self.birthday = value,
        }
    }

    /// Validate and convert into the update request.
    ///
    /// # Errors
    /// Returns a message for an empty username or e-mail, or a malformed birthday.
    pub fn to_update(&self) -> Result<UserUpdate, String> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err("Username is required".to_string());
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err("Email is required".to_string());
        }
        let birthday = match self.birthday.trim() {
            "" => None,
            value => Some(parse_birthday(value)?),
        };
        Ok(UserUpdate {
            username: username.to_string(),
            password: (!self.password.is_empty()).then(|| self.password.clone()),
            email: email.to_string(),
            birthday,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ada() -> User {
        User {
            username: "ada".into(),
            email: "ada@example.com".into(),
            birthday: NaiveDate::from_ymd_opt(1990, 4, 1),
            favourite_movies: vec!["m1".into()],
            ..User::default()
        }
    }

    #[test]
    fn from_user_prefills_without_password() {
        let form = ProfileFormState::from_user(&ada());
        assert_eq!(form.username, "ada");
        assert_eq!(form.birthday, "1990-04-01");
        assert!(form.password.is_empty());
    }

    #[test]
    fn untouched_form_round_trips_to_unchanged_update() {
        let user = ada();
        let update = ProfileFormState::from_user(&user)
            .to_update()
            .expect("valid form");
        assert_eq!(update, UserUpdate::from_user(&user));
    }

    #[test]
    fn edits_flow_into_update() {
        let mut form = ProfileFormState::from_user(&ada());
        form.set(ProfileField::Password, "n3w".into());
        form.set(ProfileField::Email, " ada@films.example ".into());
        form.set(ProfileField::Birthday, String::new());
        let update = form.to_update().expect("valid form");
        assert_eq!(update.password.as_deref(), Some("n3w"));
        assert_eq!(update.email, "ada@films.example");
        assert!(update.birthday.is_none());
    }

    #[test]
    fn invalid_input_is_reported() {
        let mut form = ProfileFormState::from_user(&ada());
        form.set(ProfileField::Birthday, "01/04/1990".into());
        assert!(form.to_update().is_err());
        form.set(ProfileField::Birthday, "1990-04-01".into());
        form.set(ProfileField::Username, "  ".into());
        assert_eq!(form.to_update(), Err("Username is required".to_string()));
    }
}
