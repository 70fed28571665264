//! Tree node storage: structural links plus the visual state the renderer
//! reads.

use glam::Vec2;
use serde::Serialize;

/// Stable handle to a node slot in a [`Tree`](super::Tree).
///
/// Handles are only valid while the node is live. A slot freed by a delete
/// may be reused by a later insert, so machines drop every handle they hold
/// when they return to idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(super) u32);

impl NodeId {
    /// Raw slot index of this handle.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// How the renderer should present a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisualTag {
    /// Plain node.
    #[default]
    Normal,
    /// Just attached by an insert, waiting for the finalize hold.
    PendingNew,
    /// Leaf fading out ahead of its removal.
    Shrinking,
    /// Revealed by a traversal step.
    Visited,
    /// The node an operation settled on.
    Target,
    /// Inorder successor, either highlighted or travelling to the target
    /// slot.
    Moving,
    /// Search hit, flashing.
    Success,
    /// Search miss, flashing on the last node visited.
    Failure,
}

/// One tree node.
///
/// Links and the value are owned by the tree and only change through
/// [`Tree`](super::Tree) mutators. Visual fields are free for machines and
/// the layout to drive.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(super) value: i64,
    pub(super) left: Option<NodeId>,
    pub(super) right: Option<NodeId>,
    /// Authoritative layout slot.
    pub target: Vec2,
    /// Animated position. `None` until the layout primes it.
    pub displayed: Option<Vec2>,
    /// Drawn radius.
    pub radius: f32,
    /// Drawn opacity in `[0, 1]`.
    pub opacity: f32,
    /// Current visual-state tag.
    pub tag: VisualTag,
    /// Set while a move animation drives `displayed`; settling skips it.
    pub pinned: bool,
}

impl Node {
    pub(super) fn new(value: i64, radius: f32) -> Self {
        Self {
            value,
            left: None,
            right: None,
            target: Vec2::ZERO,
            displayed: None,
            radius,
            opacity: 1.0,
            tag: VisualTag::Normal,
            pinned: false,
        }
    }

    /// Stored value.
    #[must_use]
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Left child handle.
    #[must_use]
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Right child handle.
    #[must_use]
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Number of present children (0, 1 or 2).
    #[must_use]
    pub fn child_count(&self) -> usize {
        usize::from(self.left.is_some()) + usize::from(self.right.is_some())
    }

    /// The only child, if exactly one is present.
    #[must_use]
    pub fn sole_child(&self) -> Option<NodeId> {
        match (self.left, self.right) {
            (Some(child), None) | (None, Some(child)) => Some(child),
            _ => None,
        }
    }

    /// Displayed position, falling back to the target before priming.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.displayed.unwrap_or(self.target)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_defaults() {
        let node = Node::new(7, 25.0);
        assert_eq!(node.value(), 7);
        assert_eq!(node.child_count(), 0);
        assert_eq!(node.tag, VisualTag::Normal);
        assert!(node.displayed.is_none());
        assert_eq!(node.opacity, 1.0);
    }

    #[test]
    fn test_sole_child() {
        let mut node = Node::new(1, 25.0);
        assert_eq!(node.sole_child(), None);
        node.right = Some(NodeId(4));
        assert_eq!(node.sole_child(), Some(NodeId(4)));
        node.left = Some(NodeId(2));
        assert_eq!(node.sole_child(), None);
        assert_eq!(node.child_count(), 2);
    }

    #[test]
    fn test_tag_serializes_kebab_case() {
        let json = serde_json::to_string(&VisualTag::PendingNew).unwrap();
        assert_eq!(json, "\"pending-new\"");
    }
}
