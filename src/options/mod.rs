//! Engine options with TOML file support.
//!
//! Layout geometry, animation timings and status-line behavior are
//! consolidated here. Every section uses `#[serde(default)]`, so a partial
//! TOML file (e.g. only overriding `[timing]`) fills the rest from defaults.

mod layout;
mod status;
mod timing;

use std::path::Path;

pub use layout::LayoutOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use status::StatusOptions;
pub use timing::TimingOptions;

use crate::error::BstVizError;

/// Top-level options container.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Node placement and settling.
    pub layout: LayoutOptions,
    /// Tick counts for every animated phase.
    pub timing: TimingOptions,
    /// Transient status message behavior.
    pub status: StatusOptions,
}

impl Options {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`BstVizError::Io`] if the file cannot be read and
    /// [`BstVizError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, BstVizError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`BstVizError::OptionsParse`] on malformed TOML.
    pub fn from_toml(content: &str) -> Result<Self, BstVizError> {
        toml::from_str(content)
            .map_err(|e| BstVizError::OptionsParse(e.to_string()))
    }

    /// Pretty-printed TOML form.
    ///
    /// # Errors
    ///
    /// Returns [`BstVizError::OptionsParse`] if serialization fails.
    pub fn to_toml(&self) -> Result<String, BstVizError> {
        toml::to_string_pretty(self)
            .map_err(|e| BstVizError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`BstVizError`] if serialization or writing fails.
    pub fn save(&self, path: &Path) -> Result<(), BstVizError> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(BstVizError::Io)
    }
}
