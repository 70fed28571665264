use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Timing", inline)]
#[serde(default)]
/// Length of every animated phase, in ticks (frames).
pub struct TimingOptions {
    /// Ticks between revealed traversal nodes.
    #[schemars(title = "Step Ticks", range(min = 1))]
    pub step_ticks: u32,
    /// Hold on the matched delete target, and again on its successor.
    #[schemars(title = "Highlight Ticks")]
    pub highlight_ticks: u32,
    /// Duration of the child-up and successor moves.
    #[schemars(title = "Move Ticks")]
    pub move_ticks: u32,
    /// Duration of a leaf's shrink-and-fade.
    #[schemars(title = "Shrink Ticks")]
    pub shrink_ticks: u32,
    /// Settling hold at the end of a delete.
    #[schemars(title = "Finalize Ticks")]
    pub finalize_ticks: u32,
    /// How long a new node keeps its pending tag.
    #[schemars(title = "Insert Hold Ticks")]
    pub insert_hold_ticks: u32,
    /// Number of on/off cycles when a search result flashes.
    #[schemars(title = "Flash Cycles")]
    pub flash_cycles: u32,
    /// Length of one flash cycle; the tag is lit for the first half.
    #[schemars(title = "Flash Period Ticks", range(min = 1))]
    pub flash_period_ticks: u32,
    /// Curve applied to move animations.
    #[schemars(skip)]
    pub move_easing: EasingFunction,
}

impl Default for TimingOptions {
    fn default() -> Self {
        Self {
            step_ticks: 12,
            highlight_ticks: 30,
            move_ticks: 24,
            shrink_ticks: 16,
            finalize_ticks: 20,
            insert_hold_ticks: 60,
            flash_cycles: 3,
            flash_period_ticks: 16,
            move_easing: EasingFunction::Linear,
        }
    }
}
