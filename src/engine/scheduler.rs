//! Admission matrix for the three operation machines.
//!
//! The rules are deliberately asymmetric: an insert may start while a
//! search is still flashing, but a search never starts while anything else
//! runs, and a delete only starts when everything is idle.

use std::fmt;

use serde::Serialize;

use super::command::OperationKind;

/// Which machines currently report an operation in flight.
///
/// Insert and Search can both be busy at once, so this is a set of flags
/// rather than a single exclusive state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BusyState {
    /// Insert machine is running.
    pub insert: bool,
    /// Delete machine is running.
    pub delete: bool,
    /// Search machine is running.
    pub search: bool,
}

impl BusyState {
    /// No machine is running.
    #[must_use]
    pub const fn is_idle(self) -> bool {
        !self.insert && !self.delete && !self.search
    }

    /// Whether the machine for `kind` is running.
    #[must_use]
    pub const fn is_busy(self, kind: OperationKind) -> bool {
        match kind {
            OperationKind::Insert => self.insert,
            OperationKind::Delete => self.delete,
            OperationKind::Search => self.search,
        }
    }
}

impl fmt::Display for BusyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_idle() {
            return f.write_str("idle");
        }
        let mut first = true;
        for kind in OperationKind::ALL {
            if self.is_busy(kind) {
                if !first {
                    f.write_str("+")?;
                }
                write!(f, "{kind}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Outcome of a submission.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Admission {
    /// The machine was reset and started.
    Accepted,
    /// The admission matrix forbade the request; nothing changed.
    Blocked,
}

impl Admission {
    /// Whether the request was started.
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Decide whether `kind` may start given the current busy flags.
pub const fn admit(kind: OperationKind, busy: BusyState) -> Admission {
    let allowed = match kind {
        // Search state is irrelevant to an insert.
        OperationKind::Insert => !busy.insert && !busy.delete,
        OperationKind::Delete | OperationKind::Search => busy.is_idle(),
    };
    if allowed {
        Admission::Accepted
    } else {
        Admission::Blocked
    }
}

/// Status text shown when `kind` is rejected.
#[must_use]
pub fn blocked_message(kind: OperationKind) -> String {
    format!("{} blocked until current animation finishes", kind.label())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn busy(insert: bool, delete: bool, search: bool) -> BusyState {
        BusyState {
            insert,
            delete,
            search,
        }
    }

    #[test]
    fn test_everything_admitted_when_idle() {
        for kind in OperationKind::ALL {
            assert_eq!(admit(kind, BusyState::default()), Admission::Accepted);
        }
    }

    #[test]
    fn test_insert_ignores_search() {
        assert_eq!(
            admit(OperationKind::Insert, busy(false, false, true)),
            Admission::Accepted
        );
        assert_eq!(
            admit(OperationKind::Insert, busy(true, false, false)),
            Admission::Blocked
        );
        assert_eq!(
            admit(OperationKind::Insert, busy(false, true, false)),
            Admission::Blocked
        );
    }

    #[test]
    fn test_delete_and_search_need_all_idle() {
        for kind in [OperationKind::Delete, OperationKind::Search] {
            assert_eq!(admit(kind, busy(true, false, false)), Admission::Blocked);
            assert_eq!(admit(kind, busy(false, true, false)), Admission::Blocked);
            assert_eq!(admit(kind, busy(false, false, true)), Admission::Blocked);
        }
    }

    #[test]
    fn test_blocked_message_and_display() {
        assert_eq!(
            blocked_message(OperationKind::Delete),
            "Delete blocked until current animation finishes"
        );
        assert_eq!(busy(true, false, true).to_string(), "insert+search");
        assert_eq!(BusyState::default().to_string(), "idle");
    }
}
