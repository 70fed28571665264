//! Render-ready view of the tree for one frame.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::tree::{NodeId, Tree, VisualTag};

/// One drawable node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeView {
    /// Stored value.
    pub value: i64,
    /// Displayed x.
    pub x: f32,
    /// Displayed y.
    pub y: f32,
    /// Current radius.
    pub radius: f32,
    /// Current opacity in `[0, 1]`.
    pub opacity: f32,
    /// How to present the node.
    pub tag: VisualTag,
}

/// Parent/child link, as indices into [`Snapshot::nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge {
    /// Index of the parent node.
    pub parent: usize,
    /// Index of the child node.
    pub child: usize,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Snapshot {
    /// Nodes in preorder from the root.
    pub nodes: Vec<NodeView>,
    /// Links derived from the current tree.
    pub edges: Vec<Edge>,
    /// Status text, if showing.
    pub status: Option<String>,
}

impl Snapshot {
    /// Build a snapshot from the current tree.
    #[must_use]
    pub fn capture(tree: &Tree, status: Option<&str>) -> Self {
        let order = tree.preorder();
        let index: FxHashMap<NodeId, usize> =
            order.iter().enumerate().map(|(i, &id)| (id, i)).collect();

        let mut nodes = Vec::with_capacity(order.len());
        let mut edges = Vec::with_capacity(order.len().saturating_sub(1));
        for (parent, &id) in order.iter().enumerate() {
            let Some(node) = tree.get(id) else { continue };
            let pos = node.position();
            nodes.push(NodeView {
                value: node.value(),
                x: pos.x,
                y: pos.y,
                radius: node.radius,
                opacity: node.opacity,
                tag: node.tag,
            });
            for child in [node.left(), node.right()].into_iter().flatten() {
                if let Some(&child) = index.get(&child) {
                    edges.push(Edge { parent, child });
                }
            }
        }

        Self {
            nodes,
            edges,
            status: status.map(str::to_owned),
        }
    }

    /// Values in snapshot (preorder) order.
    #[must_use]
    pub fn values(&self) -> Vec<i64> {
        self.nodes.iter().map(|n| n.value).collect()
    }

    /// First node holding `value`.
    #[must_use]
    pub fn find(&self, value: i64) -> Option<&NodeView> {
        self.nodes.iter().find(|n| n.value == value)
    }
}
