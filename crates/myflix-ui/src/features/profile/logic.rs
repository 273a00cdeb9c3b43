//! Profile outcome helpers.

use myflix_client::notice;

use crate::core::ui::ToastKind;

/// Toast for the account deletion result. The caller navigates to the
/// welcome page either way.
#[must_use]
pub const fn deletion_notice<E>(result: &Result<(), E>) -> (ToastKind, &'static str) {
    (
        ToastKind::for_outcome(result.is_ok()),
        notice::deletion_notice(result),
    )
}

/// Toast for a profile save.
#[must_use]
pub const fn update_notice(succeeded: bool) -> (ToastKind, &'static str) {
    (
        ToastKind::for_outcome(succeeded),
        if succeeded {
            notice::PROFILE_UPDATED
        } else {
            notice::PROFILE_UPDATE_FAILED
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deletion_failure_is_an_error_toast() {
        let (kind, message) = deletion_notice::<&str>(&Err("boom"));
        assert_eq!(kind, ToastKind::Error);
        assert_eq!(message, notice::ACCOUNT_DELETE_FAILED);
        assert_eq!(
            deletion_notice::<&str>(&Ok(())),
            (ToastKind::Success, notice::ACCOUNT_DELETED)
        );
    }

    #[test]
    fn update_notice_follows_outcome() {
        assert_eq!(update_notice(true).0, ToastKind::Success);
        assert_eq!(update_notice(false).1, notice::PROFILE_UPDATE_FAILED);
    }
}
