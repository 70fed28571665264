//! Crate-level error types.
//!
//! The animation core never fails: rejected submissions and missing values
//! are reported as status text. These errors cover the edges of the crate,
//! loading options and parsing command scripts.

use std::fmt;

/// Errors produced by the bstviz crate.
#[derive(Debug)]
pub enum BstVizError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// A command script line could not be parsed.
    Script {
        /// 1-based line number of the offending line.
        line: usize,
        /// What was wrong with it.
        message: String,
    },
}

impl fmt::Display for BstVizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Script { line, message } => {
                write!(f, "script error on line {line}: {message}")
            }
        }
    }
}

impl std::error::Error for BstVizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BstVizError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
