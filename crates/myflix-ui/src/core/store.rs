//! App-wide yewdux store.
//!
//! # Design
//! - Keep shared UI state in one store to avoid ad-hoc contexts.
//! - The session here mirrors the `Myflix` service after every call; the
//!   service stays the source of truth.

use myflix_client::Session;
use yewdux::prelude::Dispatch;
use yewdux::store::Store;

use crate::core::ui::{Toast, ToastKind};

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Eq, Store, Default)]
pub struct AppStore {
    /// Last known session, used for rendering only.
    pub session: Session,
    /// Toasts currently on screen, oldest first.
    pub toasts: Vec<Toast>,
    /// Identifier handed to the next toast.
    pub next_toast_id: u64,
}

impl AppStore {
    /// Queue a toast and return its identifier.
    pub fn push_toast(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        let id = self.next_toast_id;
        self.next_toast_id = self.next_toast_id.wrapping_add(1);
        self.toasts.push(Toast {
            id,
            message: message.into(),
            kind,
        });
        id
    }

    /// Remove a toast; unknown identifiers are ignored.
    pub fn dismiss_toast(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }

    /// Whether the mirrored session is logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}

/// Dispatch handle for the global store.
#[must_use]
pub fn app_dispatch() -> Dispatch<AppStore> {
    Dispatch::<AppStore>::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use myflix_client::models::User;

    #[test]
    fn toasts_get_increasing_ids_and_dismiss_individually() {
        let mut store = AppStore::default();
        let first = store.push_toast(ToastKind::Success, "Logged in!");
        let second = store.push_toast(ToastKind::Error, "Unable to log in.");
        assert_eq!((first, second), (0, 1));

        store.dismiss_toast(first);
        assert_eq!(store.toasts.len(), 1);
        assert_eq!(store.toasts[0].message, "Unable to log in.");

        store.dismiss_toast(42);
        assert_eq!(store.toasts.len(), 1);
        assert_eq!(store.push_toast(ToastKind::Info, "again"), 2);
    }

    #[test]
    fn authentication_follows_session() {
        let mut store = AppStore::default();
        assert!(!store.is_authenticated());
        let user = User {
            username: "ada".into(),
            ..User::default()
        };
        store.session = Session::authenticated(&user, "tok");
        assert!(store.is_authenticated());
    }
}
