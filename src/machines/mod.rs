//! Per-operation state machines.
//!
//! Each machine owns its own state struct (phase tag, captured path, the
//! handles it is working on, tick counters) and is advanced by exactly one
//! [`OperationMachine::step`] call per tick. They are the only code that
//! mutates the [`Tree`], and every topology edit they make (attach, splice,
//! free) completes inside a single step.
//!
//! Machines never re-derive a parent or "the new node" from values or
//! colors: whatever handle they need later is captured from their own
//! descent and carried in their state.

mod delete;
mod insert;
mod search;

pub use delete::{DeleteMachine, DeletePhase};
pub use insert::{InsertMachine, InsertPhase};
pub use search::{SearchMachine, SearchPhase};

use crate::animation::clock;
use crate::engine::command::OperationKind;
use crate::engine::status::StatusLine;
use crate::layout::Layout;
use crate::options::TimingOptions;
use crate::tree::{NodeId, Tree, VisualTag};

/// Everything a machine may touch during one step.
#[derive(Debug)]
pub struct StepContext<'a> {
    /// The shared tree.
    pub tree: &'a mut Tree,
    /// Layout used to recompute targets after a shape change.
    pub layout: &'a Layout,
    /// Width passed to every target recomputation.
    pub canvas_width: f32,
    /// Phase lengths.
    pub timing: &'a TimingOptions,
    /// User-facing status line.
    pub status: &'a mut StatusLine,
}

impl StepContext<'_> {
    /// Recompute every target after a shape change and prime new nodes.
    pub fn relayout(&mut self) {
        self.layout.relayout(self.tree, self.canvas_width);
    }
}

/// Common interface of the insert, delete and search machines.
pub trait OperationMachine {
    /// Which operation this machine runs.
    fn kind(&self) -> OperationKind;

    /// Reset and begin an operation for `value`, capturing whatever it needs
    /// from the current tree. Only called on admission, while idle.
    fn start(&mut self, value: i64, tree: &Tree);

    /// Advance by one tick.
    fn step(&mut self, ctx: &mut StepContext<'_>);

    /// Whether an operation is in flight.
    fn is_busy(&self) -> bool;

    /// Current phase, for logging and debugging.
    fn phase_name(&self) -> &'static str;
}

/// Step-by-step reveal of a captured descent path.
///
/// One more node is revealed every `step_ticks` ticks; once every node has
/// been revealed, the next cadence boundary reports exhaustion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Traversal {
    path: Vec<NodeId>,
    revealed: usize,
    elapsed: u32,
}

impl Traversal {
    /// Traversal over an immutable, already captured path.
    #[must_use]
    pub fn new(path: Vec<NodeId>) -> Self {
        Self {
            path,
            revealed: 0,
            elapsed: 0,
        }
    }

    /// The full captured path.
    #[must_use]
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    /// Nodes revealed so far.
    #[must_use]
    pub fn revealed(&self) -> &[NodeId] {
        self.path.get(..self.revealed).unwrap_or_default()
    }

    /// Most recently revealed node.
    #[must_use]
    pub fn current(&self) -> Option<NodeId> {
        self.revealed().last().copied()
    }

    /// Advance one tick. Returns `true` once the path is exhausted.
    pub fn step(&mut self, tree: &mut Tree, step_ticks: u32) -> bool {
        self.elapsed += 1;
        if clock::is_complete(self.elapsed, step_ticks) {
            self.elapsed = 0;
            if self.revealed >= self.path.len() {
                return true;
            }
            self.revealed += 1;
        }
        // Re-tag the whole trail: an overlapping operation may have reset
        // a shared node since the last step.
        for &id in self.revealed() {
            if let Some(node) = tree.get_mut(id) {
                if node.tag == VisualTag::Normal {
                    node.tag = VisualTag::Visited;
                }
            }
        }
        false
    }

    /// Return every node this traversal highlighted to normal.
    pub fn clear_tags(&self, tree: &mut Tree) {
        for &id in &self.path {
            if let Some(node) = tree.get_mut(id) {
                if node.tag == VisualTag::Visited {
                    node.tag = VisualTag::Normal;
                }
            }
        }
    }
}

/// Set a node's tag if it is still live.
fn set_tag(tree: &mut Tree, id: Option<NodeId>, tag: VisualTag) {
    if let Some(node) = id.and_then(|id| tree.get_mut(id)) {
        node.tag = tag;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
pub(crate) mod test_support {
    use crate::engine::status::StatusLine;
    use crate::layout::Layout;
    use crate::options::TimingOptions;
    use crate::tree::Tree;

    use super::{OperationMachine, StepContext};

    /// Tree, layout and status wired together for driving one machine.
    pub(crate) struct Harness {
        pub(crate) tree: Tree,
        pub(crate) layout: Layout,
        pub(crate) timing: TimingOptions,
        pub(crate) status: StatusLine,
    }

    impl Harness {
        pub(crate) fn with_values(values: &[i64]) -> Self {
            let mut tree = Tree::new();
            for &v in values {
                let slot = tree.insertion_slot(v);
                let _ = tree.attach(slot.parent, slot.side, v, 25.0);
            }
            let layout = Layout::default();
            layout.relayout(&mut tree, 1400.0);
            Self {
                tree,
                layout,
                timing: TimingOptions::default(),
                status: StatusLine::new(120),
            }
        }

        pub(crate) fn step(&mut self, machine: &mut dyn OperationMachine) {
            let mut ctx = StepContext {
                tree: &mut self.tree,
                layout: &self.layout,
                canvas_width: 1400.0,
                timing: &self.timing,
                status: &mut self.status,
            };
            machine.step(&mut ctx);
            self.layout.settle(&mut self.tree);
            self.status.tick();
        }

        /// Step until idle; returns the number of ticks taken.
        pub(crate) fn run(&mut self, machine: &mut dyn OperationMachine) -> u32 {
            let mut ticks = 0;
            while machine.is_busy() && ticks < 10_000 {
                self.step(machine);
                ticks += 1;
            }
            ticks
        }
    }
}
