//! Movie feature actions.
//!
//! # Design
//! - Capture user intent separate from rendering.
//! - Actions are UI-only and never perform side effects.

use myflix_client::FavouriteChange;
use myflix_client::notice::favourite_notice;

use crate::core::ui::ToastKind;
use crate::features::movies::state::DetailKind;

/// High-level movie card actions from the UI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MovieAction {
    /// Open the genre, director or synopsis dialog for a movie.
    ShowDetail {
        /// Movie the card belongs to.
        movie_id: String,
        /// Which detail to show.
        kind: DetailKind,
    },
    /// Close the open dialog.
    CloseDetail,
    /// Add or remove the movie from the favourites.
    ToggleFavourite {
        /// Movie to toggle.
        movie_id: String,
    },
}

/// Direction a toggle will take given the current favourite flag.
#[must_use]
pub const fn toggle_direction(is_favourite: bool) -> FavouriteChange {
    if is_favourite {
        FavouriteChange::Removed
    } else {
        FavouriteChange::Added
    }
}

/// Toast for a finished favourite write.
#[must_use]
pub const fn favourite_message(change: FavouriteChange, succeeded: bool) -> (ToastKind, &'static str) {
    (
        ToastKind::for_outcome(succeeded),
        favourite_notice(change, succeeded),
    )
}

/// Accessible label of the favourite button.
#[must_use]
pub const fn favourite_button_label(is_favourite: bool) -> &'static str {
    if is_favourite {
        "Remove from favourites"
    } else {
        "Add to favourites"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_direction_inverts_current_state() {
        assert_eq!(toggle_direction(true), FavouriteChange::Removed);
        assert_eq!(toggle_direction(false), FavouriteChange::Added);
    }

    #[test]
    fn favourite_messages_match_outcomes() {
        assert_eq!(
            favourite_message(FavouriteChange::Added, true),
            (ToastKind::Success, "Movie added to favourites list.")
        );
        assert_eq!(
            favourite_message(FavouriteChange::Added, false),
            (ToastKind::Error, "Failed to add movie to favourites.")
        );
        assert_eq!(
            favourite_message(FavouriteChange::Removed, true),
            (ToastKind::Success, "Movie has been removed from favourites list.")
        );
        assert_eq!(
            favourite_message(FavouriteChange::Removed, false),
            (ToastKind::Error, "Failed to remove movie from favourites.")
        );
    }

    #[test]
    fn button_label_reflects_state() {
        assert_eq!(favourite_button_label(true), "Remove from favourites");
        assert_eq!(favourite_button_label(false), "Add to favourites");
    }
}
