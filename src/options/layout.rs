use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Layout", inline)]
#[serde(default)]
/// Node placement and settling parameters.
pub struct LayoutOptions {
    /// Width of the drawing area; the root sits at its horizontal center.
    #[schemars(title = "Canvas Width", range(min = 100.0))]
    pub canvas_width: f32,
    /// Vertical position of the root.
    #[schemars(title = "Root Y")]
    pub root_y: f32,
    /// Horizontal distance from the root to each of its children.
    #[schemars(title = "Root Offset", range(min = 0.0))]
    pub root_offset: f32,
    /// Factor applied to the horizontal offset at each deeper level.
    #[schemars(title = "Offset Decay", range(min = 0.1, max = 1.0), extend("step" = 0.05))]
    pub offset_decay: f32,
    /// Vertical distance between levels.
    #[schemars(title = "Level Height", range(min = 1.0))]
    pub level_height: f32,
    /// Radius of a freshly created node.
    #[schemars(title = "Node Radius", range(min = 1.0))]
    pub node_radius: f32,
    /// Fraction of the remaining distance a displayed position covers per
    /// tick while settling.
    #[schemars(title = "Settle Easing", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub settle_easing: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            canvas_width: 1400.0,
            root_y: 80.0,
            root_offset: 220.0,
            offset_decay: 0.6,
            level_height: 90.0,
            node_radius: 25.0,
            settle_easing: 0.18,
        }
    }
}
