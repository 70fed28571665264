//! Delete: walk to the target, then animate one of the three removal cases
//! before performing the structural edit.
//!
//! - leaf: shrink and fade, then detach
//! - one child: slide the child up into the target's slot, then splice
//! - two children: highlight the inorder successor, slide it onto the
//!   target's slot, then copy its value into the target and splice the
//!   successor out
//!
//! Every case frees exactly one node, and only once its animation is done.

use glam::Vec2;

use super::{set_tag, OperationMachine, StepContext, Traversal};
use crate::animation::clock;
use crate::engine::command::OperationKind;
use crate::tree::{DeleteResult, NodeId, Successor, Tree, VisualTag};

/// Phases of a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePhase {
    /// No delete in flight.
    #[default]
    Idle,
    /// Revealing the search path toward the value.
    Traversing,
    /// Holding on the matched node before choosing a removal case.
    HighlightTarget,
    /// Holding on the inorder successor (two-child case).
    HighlightSuccessor,
    /// Sliding the successor onto the target's slot.
    MoveSuccessor,
    /// Sliding the sole child onto the target's slot.
    MoveChildUp,
    /// Shrinking and fading a leaf target.
    ShrinkRemove,
    /// Letting the tree settle into its new shape.
    Finalize,
}

/// A displayed-position animation from one point to another.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Move {
    node: NodeId,
    from: Vec2,
    to: Vec2,
}

/// Delete state machine.
#[derive(Debug, Clone, Default)]
pub struct DeleteMachine {
    phase: DeletePhase,
    value: i64,
    traversal: Traversal,
    target: Option<NodeId>,
    /// Carried from the descent; `None` when the target is the root.
    target_parent: Option<NodeId>,
    successor: Option<Successor>,
    motion: Option<Move>,
    elapsed: u32,
    base_radius: f32,
}

impl DeleteMachine {
    /// Idle machine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> DeletePhase {
        self.phase
    }

    /// Node matched by the descent, while the delete is in flight.
    #[must_use]
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// Inorder successor chosen for a two-child delete.
    #[must_use]
    pub fn successor(&self) -> Option<Successor> {
        self.successor
    }

    /// Descent being revealed.
    #[must_use]
    pub fn traversal(&self) -> &Traversal {
        &self.traversal
    }

    fn enter(&mut self, phase: DeletePhase) {
        log::debug!("delete {}: {:?} -> {:?}", self.value, self.phase, phase);
        self.phase = phase;
        self.elapsed = 0;
    }

    fn finish_traversal(&mut self, ctx: &mut StepContext<'_>) {
        self.traversal.clear_tags(ctx.tree);
        if self.target.is_some() {
            set_tag(ctx.tree, self.target, VisualTag::Target);
            self.enter(DeletePhase::HighlightTarget);
        } else {
            ctx.status
                .set(format!("Value {} not found for deletion", self.value));
            self.reset(ctx.tree);
        }
    }

    /// Pick the removal case from the target's child count.
    fn branch(&mut self, tree: &mut Tree) {
        let Some((children, sole, slot)) = self
            .target
            .and_then(|id| tree.get(id))
            .map(|n| (n.child_count(), n.sole_child(), n.target))
        else {
            self.reset(tree);
            return;
        };

        match children {
            0 => {
                set_tag(tree, self.target, VisualTag::Shrinking);
                self.enter(DeletePhase::ShrinkRemove);
            }
            1 => {
                let Some(child) = sole else {
                    self.reset(tree);
                    return;
                };
                self.begin_move(tree, child, slot);
                self.enter(DeletePhase::MoveChildUp);
            }
            _ => {
                let Some(successor) =
                    self.target.and_then(|id| tree.successor_of(id))
                else {
                    self.reset(tree);
                    return;
                };
                set_tag(tree, Some(successor.node), VisualTag::Moving);
                self.successor = Some(successor);
                self.enter(DeletePhase::HighlightSuccessor);
            }
        }
    }

    /// Pin `node` and record a move from where it is drawn to `to`.
    fn begin_move(&mut self, tree: &mut Tree, node: NodeId, to: Vec2) {
        if let Some(n) = tree.get_mut(node) {
            n.pinned = true;
            self.motion = Some(Move {
                node,
                from: n.position(),
                to,
            });
        }
    }

    /// Advance the active move. Returns `true` when it has arrived.
    fn advance_move(&mut self, ctx: &mut StepContext<'_>) -> bool {
        self.elapsed += 1;
        let t = clock::progress(self.elapsed, ctx.timing.move_ticks);
        let Some(motion) = self.motion else {
            return true;
        };
        if let Some(node) = ctx.tree.get_mut(motion.node) {
            let eased = ctx.timing.move_easing.evaluate(t);
            node.displayed = Some(clock::lerp(motion.from, motion.to, eased));
        }
        t >= 1.0
    }

    fn release_motion(&mut self, tree: &mut Tree) {
        if let Some(node) = self.motion.take().and_then(|m| tree.get_mut(m.node))
        {
            node.pinned = false;
            if node.tag == VisualTag::Moving {
                node.tag = VisualTag::Normal;
            }
        }
    }

    fn shrink(&mut self, ctx: &mut StepContext<'_>) {
        self.elapsed += 1;
        let t = clock::progress(self.elapsed, ctx.timing.shrink_ticks);
        if let Some(node) = self.target.and_then(|id| ctx.tree.get_mut(id)) {
            if self.elapsed == 1 {
                self.base_radius = node.radius;
            }
            node.radius = self.base_radius * (1.0 - t);
            node.opacity = 1.0 - t;
        }
        if t < 1.0 {
            return;
        }
        if let Some(target) = self.target.take() {
            match ctx.tree.structural_delete(self.target_parent, target) {
                DeleteResult::Detached(_) => {
                    log::info!("delete {}: leaf removed", self.value);
                }
                other => {
                    log::warn!(
                        "delete {}: leaf removal gave {other:?}",
                        self.value
                    );
                }
            }
        }
        ctx.relayout();
        self.enter(DeletePhase::Finalize);
    }

    fn splice_child_up(&mut self, ctx: &mut StepContext<'_>) {
        self.release_motion(ctx.tree);
        if let Some(target) = self.target.take() {
            match ctx.tree.structural_delete(self.target_parent, target) {
                DeleteResult::Spliced { child, .. } => {
                    log::info!(
                        "delete {}: child {} spliced up",
                        self.value,
                        child.index()
                    );
                }
                other => {
                    log::warn!("delete {}: splice gave {other:?}", self.value);
                }
            }
        }
        ctx.relayout();
        self.enter(DeletePhase::Finalize);
    }

    fn splice_successor(&mut self, ctx: &mut StepContext<'_>) {
        self.release_motion(ctx.tree);
        if let (Some(target), Some(successor)) =
            (self.target, self.successor.take())
        {
            if let Some(freed) =
                ctx.tree.replace_with_successor(target, successor)
            {
                log::info!(
                    "delete {}: successor {} copied into target",
                    self.value,
                    freed.value()
                );
            }
        }
        ctx.relayout();
        self.enter(DeletePhase::Finalize);
    }

    /// Drop every handle and return to idle.
    fn reset(&mut self, tree: &mut Tree) {
        self.traversal.clear_tags(tree);
        self.release_motion(tree);
        if let Some(node) = self.target.and_then(|id| tree.get_mut(id)) {
            if matches!(node.tag, VisualTag::Target | VisualTag::Shrinking) {
                node.tag = VisualTag::Normal;
            }
        }
        if let Some(node) = self.successor.and_then(|s| tree.get_mut(s.node)) {
            if node.tag == VisualTag::Moving {
                node.tag = VisualTag::Normal;
            }
        }
        self.enter(DeletePhase::Idle);
        self.traversal = Traversal::default();
        self.target = None;
        self.target_parent = None;
        self.successor = None;
    }
}

impl OperationMachine for DeleteMachine {
    fn kind(&self) -> OperationKind {
        OperationKind::Delete
    }

    fn start(&mut self, value: i64, tree: &Tree) {
        let located = tree.locate(value);
        self.value = value;
        self.target = located.found;
        self.target_parent = located.found_parent();
        self.successor = None;
        self.motion = None;
        self.traversal = Traversal::new(located.path);
        self.enter(DeletePhase::Traversing);
    }

    fn step(&mut self, ctx: &mut StepContext<'_>) {
        match self.phase {
            DeletePhase::Idle => {}
            DeletePhase::Traversing => {
                if self.traversal.step(ctx.tree, ctx.timing.step_ticks) {
                    self.finish_traversal(ctx);
                }
            }
            DeletePhase::HighlightTarget => {
                self.elapsed += 1;
                if clock::is_complete(self.elapsed, ctx.timing.highlight_ticks)
                {
                    self.branch(ctx.tree);
                }
            }
            DeletePhase::HighlightSuccessor => {
                self.elapsed += 1;
                if clock::is_complete(self.elapsed, ctx.timing.highlight_ticks)
                {
                    let slot = self
                        .target
                        .and_then(|id| ctx.tree.get(id))
                        .map(|n| n.target);
                    if let (Some(successor), Some(slot)) =
                        (self.successor, slot)
                    {
                        self.begin_move(ctx.tree, successor.node, slot);
                    }
                    self.enter(DeletePhase::MoveSuccessor);
                }
            }
            DeletePhase::MoveSuccessor => {
                if self.advance_move(ctx) {
                    self.splice_successor(ctx);
                }
            }
            DeletePhase::MoveChildUp => {
                if self.advance_move(ctx) {
                    self.splice_child_up(ctx);
                }
            }
            DeletePhase::ShrinkRemove => self.shrink(ctx),
            DeletePhase::Finalize => {
                self.elapsed += 1;
                if clock::is_complete(self.elapsed, ctx.timing.finalize_ticks) {
                    ctx.status.set(format!("Deleted {}", self.value));
                    self.reset(ctx.tree);
                }
            }
        }
    }

    fn is_busy(&self) -> bool {
        self.phase != DeletePhase::Idle
    }

    fn phase_name(&self) -> &'static str {
        match self.phase {
            DeletePhase::Idle => "idle",
            DeletePhase::Traversing => "traversing",
            DeletePhase::HighlightTarget => "highlight-target",
            DeletePhase::HighlightSuccessor => "highlight-successor",
            DeletePhase::MoveSuccessor => "move-successor",
            DeletePhase::MoveChildUp => "move-child-up",
            DeletePhase::ShrinkRemove => "shrink-remove",
            DeletePhase::Finalize => "finalize",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::machines::test_support::Harness;
    use crate::tree::Side;

    fn run_until(
        h: &mut Harness,
        machine: &mut DeleteMachine,
        phase: DeletePhase,
    ) {
        let mut guard = 0;
        while machine.phase() != phase && guard < 10_000 {
            h.step(machine);
            guard += 1;
        }
        assert_eq!(machine.phase(), phase);
    }

    #[test]
    fn test_delete_missing_value_reports_not_found() {
        let mut h = Harness::with_values(&[50, 30, 70]);
        let mut machine = DeleteMachine::new();
        machine.start(99, &h.tree);
        let ticks = h.run(&mut machine);
        // Two reveals plus the exhausting boundary.
        assert_eq!(ticks, 3 * h.timing.step_ticks);
        assert_eq!(h.tree.len(), 3);
        assert_eq!(
            h.status.message(),
            Some("Value 99 not found for deletion")
        );
        assert!(h.tree.is_valid());
    }

    #[test]
    fn test_delete_on_empty_tree() {
        let mut h = Harness::with_values(&[]);
        let mut machine = DeleteMachine::new();
        machine.start(1, &h.tree);
        let _ = h.run(&mut machine);
        assert!(h.tree.is_empty());
        assert_eq!(h.status.message(), Some("Value 1 not found for deletion"));
    }

    #[test]
    fn test_delete_leaf_shrinks_then_detaches() {
        let mut h = Harness::with_values(&[50, 30, 70]);
        let leaf = h.tree.locate(30).found.unwrap();
        let mut machine = DeleteMachine::new();
        machine.start(30, &h.tree);

        run_until(&mut h, &mut machine, DeletePhase::HighlightTarget);
        assert_eq!(h.tree.get(leaf).unwrap().tag, VisualTag::Target);

        run_until(&mut h, &mut machine, DeletePhase::ShrinkRemove);
        for _ in 0..h.timing.shrink_ticks / 2 {
            h.step(&mut machine);
        }
        let node = h.tree.get(leaf).unwrap();
        assert_eq!(node.tag, VisualTag::Shrinking);
        assert!((node.opacity - 0.5).abs() < 1e-3);
        assert!((node.radius - 12.5).abs() < 1e-3);

        let _ = h.run(&mut machine);
        assert!(!h.tree.contains(leaf));
        assert_eq!(h.tree.inorder_values(), vec![50, 70]);
        assert_eq!(h.status.message(), Some("Deleted 30"));
    }

    #[test]
    fn test_delete_one_child_moves_child_up() {
        let mut h = Harness::with_values(&[50, 30, 20]);
        let target = h.tree.locate(30).found.unwrap();
        let child = h.tree.locate(20).found.unwrap();
        let slot = h.tree.get(target).unwrap().target;
        let mut machine = DeleteMachine::new();
        machine.start(30, &h.tree);

        run_until(&mut h, &mut machine, DeletePhase::MoveChildUp);
        assert!(h.tree.get(child).unwrap().pinned);
        for _ in 0..h.timing.move_ticks - 1 {
            h.step(&mut machine);
        }
        assert_eq!(machine.phase(), DeletePhase::MoveChildUp);
        h.step(&mut machine);
        assert_eq!(machine.phase(), DeletePhase::Finalize);

        // The child arrived on the old slot and now owns it.
        let node = h.tree.get(child).unwrap();
        assert!(!node.pinned);
        assert!((node.target - slot).length() < 1e-3);
        assert!(!h.tree.contains(target));
        let root = h.tree.root().unwrap();
        assert_eq!(h.tree.child(root, Side::Left), Some(child));
        assert!(h.tree.is_valid());
    }

    #[test]
    fn test_delete_one_child_root() {
        let mut h = Harness::with_values(&[50, 70]);
        let mut machine = DeleteMachine::new();
        machine.start(50, &h.tree);
        let _ = h.run(&mut machine);
        assert_eq!(h.tree.len(), 1);
        assert_eq!(h.tree.root().and_then(|r| h.tree.value(r)), Some(70));
    }

    #[test]
    fn test_delete_two_children_frees_successor_only() {
        let mut h = Harness::with_values(&[50, 30, 70, 60, 80, 65]);
        let root = h.tree.root().unwrap();
        let successor = h.tree.locate(60).found.unwrap();
        let mut machine = DeleteMachine::new();
        machine.start(50, &h.tree);

        run_until(&mut h, &mut machine, DeletePhase::HighlightSuccessor);
        assert_eq!(machine.successor().map(|s| s.node), Some(successor));
        assert_eq!(h.tree.get(successor).unwrap().tag, VisualTag::Moving);

        run_until(&mut h, &mut machine, DeletePhase::MoveSuccessor);
        assert!(h.tree.get(successor).unwrap().pinned);

        run_until(&mut h, &mut machine, DeletePhase::Finalize);
        assert_eq!(h.tree.len(), 5);
        assert!(h.tree.contains(root));
        assert!(!h.tree.contains(successor));
        assert_eq!(h.tree.value(root), Some(60));
        assert_eq!(h.tree.inorder_values(), vec![30, 60, 65, 70, 80]);
        assert!(h.tree.is_valid());

        let _ = h.run(&mut machine);
        assert_eq!(h.tree.get(root).unwrap().tag, VisualTag::Normal);
        assert!(machine.target().is_none());
    }

    #[test]
    fn test_delete_rightmost_duplicate() {
        let mut h = Harness::with_values(&[10, 10, 10]);
        let last = h.tree.locate(10).found.unwrap();
        let mut machine = DeleteMachine::new();
        machine.start(10, &h.tree);
        let _ = h.run(&mut machine);
        assert!(!h.tree.contains(last));
        assert_eq!(h.tree.inorder_values(), vec![10, 10]);
    }
}
