use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Status", inline)]
#[serde(default)]
/// Transient status message behavior.
pub struct StatusOptions {
    /// Ticks a status message stays visible.
    #[schemars(title = "Status Ticks")]
    pub ticks: u32,
}

impl Default for StatusOptions {
    fn default() -> Self {
        Self { ticks: 120 }
    }
}
