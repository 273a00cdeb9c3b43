//! UI primitives shared across the crate.

/// How long a toast stays on screen before it dismisses itself.
pub const TOAST_TIMEOUT_MS: u32 = 2_000;

/// Toast variants used across the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    /// Informational toast.
    Info,
    /// Success toast.
    Success,
    /// Error toast.
    Error,
}

impl ToastKind {
    /// Pick the variant for an operation outcome.
    #[must_use]
    pub const fn for_outcome(succeeded: bool) -> Self {
        if succeeded { Self::Success } else { Self::Error }
    }

    /// CSS modifier applied to the toast element.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Toast payload used by the host and app state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    /// Monotonic toast identifier.
    pub id: u64,
    /// Display message for the toast.
    pub message: String,
    /// Severity classification.
    pub kind: ToastKind,
}

/// Diff the toasts that already own a dismiss timer against the toasts on
/// screen. Returns `(to_start, to_cancel)`; timers of toasts still on screen
/// are left running.
#[must_use]
pub fn timer_changes(scheduled: &[u64], toasts: &[Toast]) -> (Vec<u64>, Vec<u64>) {
    let to_start = toasts
        .iter()
        .map(|toast| toast.id)
        .filter(|id| !scheduled.contains(id))
        .collect();
    let to_cancel = scheduled
        .iter()
        .copied()
        .filter(|id| !toasts.iter().any(|toast| toast.id == *id))
        .collect();
    (to_start, to_cancel)
}

#[cfg(test)]
mod tests {
    use super::{Toast, ToastKind, timer_changes};

    fn toast(id: u64) -> Toast {
        Toast {
            id,
            message: format!("toast {id}"),
            kind: ToastKind::Info,
        }
    }

    #[test]
    fn new_toast_does_not_restart_running_timers() {
        let (start, cancel) = timer_changes(&[1, 2], &[toast(1), toast(2), toast(3)]);
        assert_eq!(start, vec![3]);
        assert!(cancel.is_empty());
    }

    #[test]
    fn dismissed_toasts_release_their_timers() {
        let (start, cancel) = timer_changes(&[1, 2], &[toast(2)]);
        assert!(start.is_empty());
        assert_eq!(cancel, vec![1]);
    }

    #[test]
    fn outcome_maps_to_kind() {
        assert_eq!(ToastKind::for_outcome(true), ToastKind::Success);
        assert_eq!(ToastKind::for_outcome(false).class(), "error");
        assert_eq!(ToastKind::Info.class(), "info");
    }
}
