//! Search: read-only walk followed by a flashing verdict.

use super::{OperationMachine, StepContext, Traversal};
use crate::animation::clock;
use crate::engine::command::OperationKind;
use crate::tree::{NodeId, Tree, VisualTag};

/// Phases of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    /// No search in flight.
    #[default]
    Idle,
    /// Revealing the descent path.
    Traversing,
    /// Flashing the matching node.
    FlashFound,
    /// Flashing the last node visited, if any.
    FlashNotFound,
}

/// Search state machine. Never calls a tree mutator; it only touches
/// visual tags.
#[derive(Debug, Clone, Default)]
pub struct SearchMachine {
    phase: SearchPhase,
    value: i64,
    traversal: Traversal,
    flash_node: Option<NodeId>,
    elapsed: u32,
}

impl SearchMachine {
    /// Idle machine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Node being flashed, once the walk is over.
    #[must_use]
    pub fn flash_node(&self) -> Option<NodeId> {
        self.flash_node
    }

    /// Descent being revealed.
    #[must_use]
    pub fn traversal(&self) -> &Traversal {
        &self.traversal
    }

    fn enter(&mut self, phase: SearchPhase) {
        log::debug!("search {}: {:?} -> {:?}", self.value, self.phase, phase);
        self.phase = phase;
        self.elapsed = 0;
    }

    fn conclude(&mut self, ctx: &mut StepContext<'_>) {
        self.traversal.clear_tags(ctx.tree);
        let last = self.traversal.current();
        self.flash_node = last;
        if last.and_then(|id| ctx.tree.value(id)) == Some(self.value) {
            ctx.status.set(format!("Found {}", self.value));
            self.enter(SearchPhase::FlashFound);
        } else {
            ctx.status.set(format!("Value {} not found", self.value));
            self.enter(SearchPhase::FlashNotFound);
        }
        self.paint(ctx.tree, ctx.timing.flash_period_ticks);
    }

    fn flash_tag(&self) -> VisualTag {
        if self.phase == SearchPhase::FlashFound {
            VisualTag::Success
        } else {
            VisualTag::Failure
        }
    }

    /// Apply the lit or unlit tag for the current flash tick.
    fn paint(&self, tree: &mut Tree, period: u32) {
        let Some(node) = self.flash_node.and_then(|id| tree.get_mut(id))
        else {
            return;
        };
        if clock::flash_lit(self.elapsed, period) {
            node.tag = self.flash_tag();
        } else if node.tag == self.flash_tag() {
            node.tag = VisualTag::Normal;
        }
    }

    fn finish(&mut self, tree: &mut Tree) {
        let flash = self.flash_tag();
        if let Some(node) = self.flash_node.and_then(|id| tree.get_mut(id)) {
            if node.tag == flash {
                node.tag = VisualTag::Normal;
            }
        }
        self.traversal.clear_tags(tree);
        self.enter(SearchPhase::Idle);
        self.traversal = Traversal::default();
        self.flash_node = None;
    }
}

impl OperationMachine for SearchMachine {
    fn kind(&self) -> OperationKind {
        OperationKind::Search
    }

    fn start(&mut self, value: i64, tree: &Tree) {
        self.value = value;
        self.flash_node = None;
        self.traversal = Traversal::new(tree.locate(value).path);
        self.enter(SearchPhase::Traversing);
    }

    fn step(&mut self, ctx: &mut StepContext<'_>) {
        match self.phase {
            SearchPhase::Idle => {}
            SearchPhase::Traversing => {
                if self.traversal.step(ctx.tree, ctx.timing.step_ticks) {
                    self.conclude(ctx);
                }
            }
            SearchPhase::FlashFound | SearchPhase::FlashNotFound => {
                self.elapsed += 1;
                let total = ctx
                    .timing
                    .flash_cycles
                    .saturating_mul(ctx.timing.flash_period_ticks);
                if clock::is_complete(self.elapsed, total) {
                    self.finish(ctx.tree);
                } else {
                    self.paint(ctx.tree, ctx.timing.flash_period_ticks);
                }
            }
        }
    }

    fn is_busy(&self) -> bool {
        self.phase != SearchPhase::Idle
    }

    fn phase_name(&self) -> &'static str {
        match self.phase {
            SearchPhase::Idle => "idle",
            SearchPhase::Traversing => "traversing",
            SearchPhase::FlashFound => "flash-found",
            SearchPhase::FlashNotFound => "flash-not-found",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::machines::test_support::Harness;

    #[test]
    fn test_search_found_flashes_success() {
        let mut h = Harness::with_values(&[50, 30, 70, 20, 40]);
        let target = h.tree.locate(40).found.unwrap();
        let mut machine = SearchMachine::new();
        machine.start(40, &h.tree);

        // Three reveals plus the exhausting boundary.
        for _ in 0..4 * h.timing.step_ticks {
            h.step(&mut machine);
        }
        assert_eq!(machine.phase(), SearchPhase::FlashFound);
        assert_eq!(machine.flash_node(), Some(target));
        assert_eq!(h.tree.get(target).unwrap().tag, VisualTag::Success);
        assert_eq!(h.status.message(), Some("Found 40"));

        // Second half of the first cycle is dark.
        for _ in 0..h.timing.flash_period_ticks / 2 {
            h.step(&mut machine);
        }
        assert_eq!(h.tree.get(target).unwrap().tag, VisualTag::Normal);

        let _ = h.run(&mut machine);
        assert!(machine.flash_node().is_none());
        assert_eq!(h.tree.get(target).unwrap().tag, VisualTag::Normal);
    }

    #[test]
    fn test_search_missing_flashes_last_visited() {
        let mut h = Harness::with_values(&[50, 30, 70, 20, 40]);
        let last = h.tree.locate(45).path.last().copied();
        let mut machine = SearchMachine::new();
        machine.start(45, &h.tree);
        let mut guard = 0;
        while machine.phase() == SearchPhase::Traversing && guard < 1000 {
            h.step(&mut machine);
            guard += 1;
        }
        assert_eq!(machine.phase(), SearchPhase::FlashNotFound);
        assert_eq!(machine.flash_node(), last);
        assert_eq!(
            h.tree.get(last.unwrap()).unwrap().tag,
            VisualTag::Failure
        );
        assert_eq!(h.status.message(), Some("Value 45 not found"));
    }

    #[test]
    fn test_search_empty_tree_has_no_flash_node() {
        let mut h = Harness::with_values(&[]);
        let mut machine = SearchMachine::new();
        machine.start(7, &h.tree);
        let ticks = h.run(&mut machine);
        let t = &h.timing;
        assert_eq!(ticks, t.step_ticks + t.flash_cycles * t.flash_period_ticks);
        assert_eq!(h.status.message(), Some("Value 7 not found"));
    }

    #[test]
    fn test_search_never_mutates_structure() {
        let mut h = Harness::with_values(&[50, 30, 70, 20, 40]);
        let before = h.tree.inorder_values();
        let mut machine = SearchMachine::new();
        machine.start(20, &h.tree);
        let _ = h.run(&mut machine);
        assert_eq!(h.tree.inorder_values(), before);
        assert_eq!(h.tree.len(), 5);
    }
}
