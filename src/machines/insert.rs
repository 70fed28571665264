//! Insert: walk the descent, attach the new node, hold it as pending.

use super::{set_tag, OperationMachine, StepContext, Traversal};
use crate::animation::clock;
use crate::engine::command::OperationKind;
use crate::tree::{NodeId, Side, Tree, VisualTag};

/// Phases of an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertPhase {
    /// No insert in flight.
    #[default]
    Idle,
    /// Revealing the insertion descent.
    Traversing,
    /// Creating the node at the captured slot.
    Attaching,
    /// Holding the pending tag on the new node.
    Finalizing,
}

/// Insert state machine.
#[derive(Debug, Clone, Default)]
pub struct InsertMachine {
    phase: InsertPhase,
    value: i64,
    traversal: Traversal,
    parent: Option<NodeId>,
    side: Option<Side>,
    /// The node attached by this insert, named explicitly rather than found
    /// again by its tag.
    pending: Option<NodeId>,
    elapsed: u32,
}

impl InsertMachine {
    /// Idle machine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> InsertPhase {
        self.phase
    }

    /// Node currently carrying the pending tag.
    #[must_use]
    pub fn pending(&self) -> Option<NodeId> {
        self.pending
    }

    /// Descent being revealed.
    #[must_use]
    pub fn traversal(&self) -> &Traversal {
        &self.traversal
    }

    fn enter(&mut self, phase: InsertPhase) {
        log::debug!("insert {}: {:?} -> {:?}", self.value, self.phase, phase);
        self.phase = phase;
        self.elapsed = 0;
    }

    fn attach(&mut self, ctx: &mut StepContext<'_>) {
        self.traversal.clear_tags(ctx.tree);
        let radius = ctx.layout.options().node_radius;
        let side = self.side.unwrap_or(Side::Left);
        let Some(id) = ctx.tree.attach(self.parent, side, self.value, radius)
        else {
            log::warn!(
                "insert {}: captured slot is no longer free, dropping",
                self.value
            );
            self.finish(ctx.tree);
            return;
        };
        set_tag(ctx.tree, Some(id), VisualTag::PendingNew);
        self.pending = Some(id);
        ctx.relayout();
        ctx.status.set(format!("Inserted {}", self.value));
        self.enter(InsertPhase::Finalizing);
    }

    fn finish(&mut self, tree: &mut Tree) {
        if let Some(node) = self.pending.and_then(|id| tree.get_mut(id)) {
            if node.tag == VisualTag::PendingNew {
                node.tag = VisualTag::Normal;
            }
        }
        self.traversal.clear_tags(tree);
        self.enter(InsertPhase::Idle);
        self.traversal = Traversal::default();
        self.parent = None;
        self.side = None;
        self.pending = None;
    }
}

impl OperationMachine for InsertMachine {
    fn kind(&self) -> OperationKind {
        OperationKind::Insert
    }

    fn start(&mut self, value: i64, tree: &Tree) {
        let slot = tree.insertion_slot(value);
        self.value = value;
        self.parent = slot.parent;
        self.side = Some(slot.side);
        self.pending = None;
        let empty = slot.path.is_empty();
        self.traversal = Traversal::new(slot.path);
        log::debug!("insert {value}: slot at depth {}", slot.depth);
        // An empty tree has nothing to walk.
        self.enter(if empty {
            InsertPhase::Attaching
        } else {
            InsertPhase::Traversing
        });
    }

    fn step(&mut self, ctx: &mut StepContext<'_>) {
        match self.phase {
            InsertPhase::Idle => {}
            InsertPhase::Traversing => {
                if self.traversal.step(ctx.tree, ctx.timing.step_ticks) {
                    self.enter(InsertPhase::Attaching);
                }
            }
            InsertPhase::Attaching => self.attach(ctx),
            InsertPhase::Finalizing => {
                self.elapsed += 1;
                if clock::is_complete(
                    self.elapsed,
                    ctx.timing.insert_hold_ticks,
                ) {
                    self.finish(ctx.tree);
                }
            }
        }
    }

    fn is_busy(&self) -> bool {
        self.phase != InsertPhase::Idle
    }

    fn phase_name(&self) -> &'static str {
        match self.phase {
            InsertPhase::Idle => "idle",
            InsertPhase::Traversing => "traversing",
            InsertPhase::Attaching => "attaching",
            InsertPhase::Finalizing => "finalizing",
        }
    }
}
