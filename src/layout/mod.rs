//! Target placement and per-tick settling of node positions.
//!
//! Targets are always recomputed from scratch after a shape change, never
//! patched, so the layout depends only on the current tree and the canvas
//! width: recomputing an unchanged tree yields identical coordinates.

use glam::Vec2;

use crate::options::LayoutOptions;
use crate::tree::{Node, Tree};

/// Computes target slots and eases displayed positions toward them.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    options: LayoutOptions,
}

impl Layout {
    /// Layout with the given geometry.
    #[must_use]
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    /// Geometry in use.
    #[must_use]
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Assign every node its target slot.
    ///
    /// The root sits at the horizontal center of `canvas_width`; each child
    /// is one level lower and offset left or right by a horizontal distance
    /// that decays geometrically with depth.
    pub fn compute_targets(&self, tree: &mut Tree, canvas_width: f32) {
        let Some(root) = tree.root() else { return };
        let opts = &self.options;
        let mut stack = vec![(
            root,
            Vec2::new(canvas_width / 2.0, opts.root_y),
            opts.root_offset,
        )];
        while let Some((id, pos, offset)) = stack.pop() {
            let Some(node) = tree.get_mut(id) else { continue };
            node.target = pos;
            let below = pos.y + opts.level_height;
            let next = offset * opts.offset_decay;
            if let Some(left) = node.left() {
                stack.push((left, Vec2::new(pos.x - offset, below), next));
            }
            if let Some(right) = node.right() {
                stack.push((right, Vec2::new(pos.x + offset, below), next));
            }
        }
    }

    /// Give a never-positioned node its target as displayed position, so new
    /// nodes appear in place instead of flying in from the origin.
    pub fn prime_displayed(node: &mut Node) {
        if node.displayed.is_none() {
            node.displayed = Some(node.target);
        }
    }

    /// Recompute all targets and prime any new nodes.
    pub fn relayout(&self, tree: &mut Tree, canvas_width: f32) {
        self.compute_targets(tree, canvas_width);
        tree.nodes_mut().for_each(Self::prime_displayed);
    }

    /// Move every unpinned node's displayed position a fixed fraction of
    /// the remaining distance toward its target.
    pub fn settle(&self, tree: &mut Tree) {
        let easing = self.options.settle_easing;
        for node in tree.nodes_mut().filter(|n| !n.pinned) {
            let current = node.displayed.unwrap_or(node.target);
            node.displayed = Some(current + (node.target - current) * easing);
        }
    }
}
