//! User-facing notices shared by the CLI and the web UI.

use crate::service::FavouriteChange;

/// Shown after a favourite was added.
pub const FAVOURITE_ADDED: &str = "Movie added to favourites list.";
/// Shown when adding a favourite failed.
pub const FAVOURITE_ADD_FAILED: &str = "Failed to add movie to favourites.";
/// Shown after a favourite was removed.
pub const FAVOURITE_REMOVED: &str = "Movie has been removed from favourites list.";
/// Shown when removing a favourite failed.
pub const FAVOURITE_REMOVE_FAILED: &str = "Failed to remove movie from favourites.";
/// Shown after a successful login.
pub const LOGGED_IN: &str = "Logged in!";
/// Shown when login failed.
pub const LOGIN_FAILED: &str = "Unable to log in.";
/// Shown after an account was created.
pub const REGISTERED: &str = "User registration successful!";
/// Shown when registration failed.
pub const REGISTRATION_FAILED: &str = "Unable to register.";
/// Shown after the profile was saved.
pub const PROFILE_UPDATED: &str = "Profile updated.";
/// Shown when saving the profile failed.
pub const PROFILE_UPDATE_FAILED: &str = "Unable to update profile.";
/// Shown after the account was deleted.
pub const ACCOUNT_DELETED: &str = "Your account has been deleted.";
/// Shown when deletion failed; the local session is gone regardless.
pub const ACCOUNT_DELETE_FAILED: &str =
    "Unable to delete your account. You have been logged out; please log in and try again.";
/// Shown after logging out.
pub const LOGGED_OUT: &str = "Logged out.";

/// Notice for a favourite write: `change` is the attempted direction.
#[must_use]
pub const fn favourite_notice(change: FavouriteChange, succeeded: bool) -> &'static str {
    match (change, succeeded) {
        (FavouriteChange::Added, true) => FAVOURITE_ADDED,
        (FavouriteChange::Added, false) => FAVOURITE_ADD_FAILED,
        (FavouriteChange::Removed, true) => FAVOURITE_REMOVED,
        (FavouriteChange::Removed, false) => FAVOURITE_REMOVE_FAILED,
    }
}

/// Notice for the outcome of an account deletion.
#[must_use]
pub const fn deletion_notice<E>(result: &Result<(), E>) -> &'static str {
    match result {
        Ok(()) => ACCOUNT_DELETED,
        Err(_) => ACCOUNT_DELETE_FAILED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn favourite_notices_follow_direction_and_outcome() {
        assert_eq!(favourite_notice(FavouriteChange::Added, true), FAVOURITE_ADDED);
        assert_eq!(
            favourite_notice(FavouriteChange::Removed, false),
            "Failed to remove movie from favourites."
        );
    }

    #[test]
    fn deletion_notice_reports_failure() {
        assert_eq!(deletion_notice::<()>(&Ok(())), ACCOUNT_DELETED);
        assert_eq!(deletion_notice(&Err("boom")), ACCOUNT_DELETE_FAILED);
    }
}
