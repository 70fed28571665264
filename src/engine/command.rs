//! The engine's complete operation vocabulary.
//!
//! Every user-facing request, whether it comes from a text box, a script
//! line or a programmatic call, is represented as a [`Command`]. Consumers
//! construct commands and pass them to
//! [`Visualizer::execute`](super::Visualizer::execute).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which machine a request targets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Add a value.
    Insert,
    /// Remove one node holding a value.
    Delete,
    /// Find a value without changing the tree.
    Search,
}

impl OperationKind {
    /// All kinds, in the order the engine steps them each tick.
    pub const ALL: [Self; 3] = [Self::Insert, Self::Delete, Self::Search];

    /// Lower-case keyword, as used in scripts and logs.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Delete => "delete",
            Self::Search => "search",
        }
    }

    /// Capitalized label, as used in status text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Insert => "Insert",
            Self::Delete => "Delete",
            Self::Search => "Search",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Error returned when a keyword names no operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperation(pub String);

impl fmt::Display for UnknownOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown operation '{}'", self.0)
    }
}

impl std::error::Error for UnknownOperation {}

impl FromStr for OperationKind {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.keyword().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownOperation(s.to_owned()))
    }
}

/// A request to run one operation on one value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct Command {
    /// Value the operation acts on.
    pub value: i64,
    /// Operation to run.
    pub kind: OperationKind,
}

impl Command {
    /// Insert `value`.
    #[must_use]
    pub const fn insert(value: i64) -> Self {
        Self {
            value,
            kind: OperationKind::Insert,
        }
    }

    /// Delete `value`.
    #[must_use]
    pub const fn delete(value: i64) -> Self {
        Self {
            value,
            kind: OperationKind::Delete,
        }
    }

    /// Search for `value`.
    #[must_use]
    pub const fn search(value: i64) -> Self {
        Self {
            value,
            kind: OperationKind::Search,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_parse_case_insensitively() {
        assert_eq!("insert".parse(), Ok(OperationKind::Insert));
        assert_eq!("DELETE".parse(), Ok(OperationKind::Delete));
        assert_eq!("Search".parse(), Ok(OperationKind::Search));
        assert_eq!(
            "remove".parse::<OperationKind>(),
            Err(UnknownOperation("remove".to_owned()))
        );
    }

    #[test]
    fn test_command_display() {
        assert_eq!(Command::insert(42).to_string(), "insert 42");
        assert_eq!(Command::search(-3).to_string(), "search -3");
        assert_eq!(OperationKind::Delete.label(), "Delete");
    }
}
