//! The tick-driven visualizer: scheduler, machines, layout and status line
//! wired together behind one frame-loop API.

pub mod command;
pub mod scheduler;
pub mod snapshot;
pub mod status;

use self::command::{Command, OperationKind};
use self::scheduler::{admit, blocked_message, Admission, BusyState};
use self::snapshot::Snapshot;
use self::status::StatusLine;
use crate::layout::Layout;
use crate::machines::{
    DeleteMachine, InsertMachine, OperationMachine, SearchMachine,
    StepContext,
};
use crate::options::Options;
use crate::tree::Tree;

/// Displayed positions closer than this to their target count as settled.
const SETTLE_EPSILON: f32 = 0.5;

/// Animated BST engine.
///
/// Owns the tree, the three operation machines and the status line.
/// A rendering collaborator calls [`submit`](Self::submit) on user
/// requests, [`tick`](Self::tick) once per frame, and
/// [`snapshot`](Self::snapshot) to draw.
#[derive(Debug)]
pub struct Visualizer {
    tree: Tree,
    layout: Layout,
    options: Options,
    canvas_width: f32,
    insert: InsertMachine,
    delete: DeleteMachine,
    search: SearchMachine,
    status: StatusLine,
    tick_count: u64,
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl Visualizer {
    /// Empty visualizer using `options`.
    #[must_use]
    pub fn new(options: Options) -> Self {
        log::debug!(
            "visualizer: canvas width {}, step cadence {} ticks",
            options.layout.canvas_width,
            options.timing.step_ticks
        );
        Self {
            tree: Tree::new(),
            layout: Layout::new(options.layout.clone()),
            canvas_width: options.layout.canvas_width,
            status: StatusLine::new(options.status.ticks),
            options,
            insert: InsertMachine::new(),
            delete: DeleteMachine::new(),
            search: SearchMachine::new(),
            tick_count: 0,
        }
    }

    // -- Submission ------------------------------------------------------

    /// Request an operation on `value`.
    ///
    /// On acceptance the matching machine is reset and starts stepping on
    /// the next tick. On rejection a "blocked" status is shown and nothing
    /// else changes; the request is dropped, not queued.
    pub fn submit(&mut self, value: i64, kind: OperationKind) -> Admission {
        let admission = admit(kind, self.busy());
        match admission {
            Admission::Blocked => {
                self.status.warn(blocked_message(kind));
            }
            Admission::Accepted => {
                log::info!("accepted {kind} {value}");
                match kind {
                    OperationKind::Insert => {
                        self.insert.start(value, &self.tree);
                    }
                    OperationKind::Delete => {
                        self.delete.start(value, &self.tree);
                    }
                    OperationKind::Search => {
                        self.search.start(value, &self.tree);
                    }
                }
            }
        }
        admission
    }

    /// Submit a [`Command`].
    pub fn execute(&mut self, command: Command) -> Admission {
        self.submit(command.value, command.kind)
    }

    /// Free every node. Only admitted while all machines are idle.
    pub fn clear(&mut self) -> Admission {
        if !self.is_idle() {
            self.status
                .warn("Clear blocked until current animation finishes");
            return Admission::Blocked;
        }
        let freed = self.tree.clear();
        self.status.set(format!("Cleared {freed} nodes"));
        Admission::Accepted
    }

    // -- Frame loop ------------------------------------------------------

    /// Advance every machine by one tick, settle displayed positions and
    /// count down the status line.
    ///
    /// A message a machine sets during this tick is not counted down until
    /// the next one, so it stays up for the full status duration.
    pub fn tick(&mut self) {
        let shown = self.status.shown();
        let mut ctx = StepContext {
            tree: &mut self.tree,
            layout: &self.layout,
            canvas_width: self.canvas_width,
            timing: &self.options.timing,
            status: &mut self.status,
        };
        self.insert.step(&mut ctx);
        self.delete.step(&mut ctx);
        self.search.step(&mut ctx);

        self.layout.settle(&mut self.tree);
        if self.status.shown() == shown {
            self.status.tick();
        }
        self.tick_count += 1;
    }

    /// Tick until every machine is idle or `max_ticks` have passed.
    /// Returns the number of ticks run.
    pub fn run_until_idle(&mut self, max_ticks: u32) -> u32 {
        let mut ticks = 0;
        while !self.is_idle() && ticks < max_ticks {
            self.tick();
            ticks += 1;
        }
        ticks
    }

    /// Tick until idle and every node has settled onto its target, or
    /// `max_ticks` have passed. Returns the number of ticks run.
    pub fn run_until_settled(&mut self, max_ticks: u32) -> u32 {
        let mut ticks = 0;
        while !(self.is_idle() && self.is_settled()) && ticks < max_ticks {
            self.tick();
            ticks += 1;
        }
        ticks
    }

    // -- Canvas ----------------------------------------------------------

    /// Canvas width used for layout.
    #[must_use]
    pub const fn canvas_width(&self) -> f32 {
        self.canvas_width
    }

    /// Change the canvas width and recompute every target. Displayed
    /// positions then settle toward the new slots.
    pub fn set_canvas_width(&mut self, width: f32) {
        if (width - self.canvas_width).abs() <= f32::EPSILON {
            return;
        }
        log::debug!("canvas width {} -> {width}", self.canvas_width);
        self.canvas_width = width;
        self.layout.relayout(&mut self.tree, width);
    }

    // -- Queries ---------------------------------------------------------

    /// Render-ready view of the current frame.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.tree, self.status.message())
    }

    /// Current status text, if showing.
    #[must_use]
    pub fn status_message(&self) -> Option<&str> {
        self.status.message()
    }

    /// Every status message shown since the last call, oldest first.
    pub fn drain_status_history(&mut self) -> Vec<String> {
        self.status.drain_recent()
    }

    /// Ticks until the status text clears.
    #[must_use]
    pub const fn status_remaining(&self) -> u32 {
        self.status.remaining()
    }

    /// Which machines are running.
    #[must_use]
    pub fn busy(&self) -> BusyState {
        BusyState {
            insert: self.insert.is_busy(),
            delete: self.delete.is_busy(),
            search: self.search.is_busy(),
        }
    }

    /// No machine is running.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.busy().is_idle()
    }

    /// Every node is drawn within half a pixel of its target.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.tree.preorder().into_iter().all(|id| {
            self.tree.get(id).is_some_and(|n| {
                n.position().distance(n.target) <= SETTLE_EPSILON
            })
        })
    }

    /// The machine running `kind`.
    #[must_use]
    pub fn machine(&self, kind: OperationKind) -> &dyn OperationMachine {
        match kind {
            OperationKind::Insert => &self.insert,
            OperationKind::Delete => &self.delete,
            OperationKind::Search => &self.search,
        }
    }

    /// The underlying tree.
    #[must_use]
    pub const fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Options this visualizer was built with.
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// Ticks run since construction.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::tree::VisualTag;

    fn filled(values: &[i64]) -> Visualizer {
        let mut viz = Visualizer::default();
        for &v in values {
            assert!(viz.submit(v, OperationKind::Insert).is_accepted());
            let _ = viz.run_until_idle(10_000);
        }
        viz
    }

    #[test]
    fn test_insert_then_idle() {
        let viz = filled(&[50, 30, 70]);
        assert!(viz.is_idle());
        assert_eq!(viz.tree().inorder_values(), vec![30, 50, 70]);
        assert_eq!(viz.status_message(), Some("Inserted 70"));
    }

    #[test]
    fn test_delete_blocked_while_inserting() {
        let mut viz = filled(&[50]);
        assert!(viz.submit(60, OperationKind::Insert).is_accepted());
        viz.tick();
        let before = viz.tree().inorder_values();

        assert_eq!(viz.submit(50, OperationKind::Delete), Admission::Blocked);
        assert_eq!(
            viz.status_message(),
            Some("Delete blocked until current animation finishes")
        );
        assert_eq!(viz.tree().inorder_values(), before);
        assert!(viz.busy().insert);
        assert!(!viz.busy().delete);

        let _ = viz.run_until_idle(10_000);
        assert_eq!(viz.tree().inorder_values(), vec![50, 60]);
    }

    #[test]
    fn test_insert_may_overlap_search() {
        let mut viz = filled(&[50, 30]);
        assert!(viz.submit(30, OperationKind::Search).is_accepted());
        viz.tick();
        assert!(viz.submit(70, OperationKind::Insert).is_accepted());
        assert_eq!(
            viz.busy(),
            BusyState {
                insert: true,
                delete: false,
                search: true
            }
        );
        assert_eq!(viz.submit(1, OperationKind::Search), Admission::Blocked);
        let _ = viz.run_until_idle(10_000);
        assert_eq!(viz.tree().inorder_values(), vec![30, 50, 70]);
        assert!(viz.tree().is_valid());
    }

    #[test]
    fn test_clear_requires_idle() {
        let mut viz = filled(&[5, 3, 8]);
        assert!(viz.submit(4, OperationKind::Insert).is_accepted());
        assert_eq!(viz.clear(), Admission::Blocked);
        let _ = viz.run_until_idle(10_000);
        assert_eq!(viz.clear(), Admission::Accepted);
        assert!(viz.tree().is_empty());
        assert_eq!(viz.status_message(), Some("Cleared 4 nodes"));
    }

    #[test]
    fn test_set_canvas_width_relayouts_and_settles() {
        let mut viz = filled(&[50]);
        let _ = viz.run_until_settled(10_000);
        viz.set_canvas_width(800.0);
        assert!(!viz.is_settled());
        let root = viz.tree().root().unwrap();
        assert_eq!(viz.tree().get(root).unwrap().target.x, 400.0);

        let _ = viz.run_until_settled(10_000);
        let snap = viz.snapshot();
        assert!((snap.nodes[0].x - 400.0).abs() <= SETTLE_EPSILON);
    }

    #[test]
    fn test_status_counts_down() {
        let mut viz = Visualizer::default();
        let _ = viz.submit(1, OperationKind::Search);
        let _ = viz.run_until_idle(10_000);
        assert_eq!(viz.status_message(), Some("Value 1 not found"));
        let left = viz.status_remaining();
        for _ in 0..left {
            viz.tick();
        }
        assert!(viz.status_message().is_none());
        assert!(viz.snapshot().status.is_none());
    }

    #[test]
    fn test_machine_status_gets_full_duration() {
        let mut options = Options::default();
        options.status.ticks = 1;
        let mut viz = Visualizer::new(options);
        assert!(viz.submit(5, OperationKind::Insert).is_accepted());
        viz.tick();
        assert_eq!(viz.tree().len(), 1);
        assert_eq!(viz.status_message(), Some("Inserted 5"));
        assert_eq!(viz.status_remaining(), 1);
        viz.tick();
        assert!(viz.status_message().is_none());
    }

    #[test]
    fn test_submit_and_machine_status_last_equally() {
        let mut viz = Visualizer::default();
        let duration = viz.options().status.ticks;

        assert_eq!(viz.submit(3, OperationKind::Delete), Admission::Accepted);
        assert_eq!(viz.clear(), Admission::Blocked);
        assert_eq!(viz.status_remaining(), duration);
        let _ = viz.run_until_idle(10_000);

        assert!(viz.submit(9, OperationKind::Insert).is_accepted());
        viz.tick();
        assert_eq!(viz.status_message(), Some("Inserted 9"));
        assert_eq!(viz.status_remaining(), duration);
    }

    #[test]
    fn test_execute_and_machine_phase() {
        let mut viz = filled(&[10]);
        assert!(viz.execute(Command::search(10)).is_accepted());
        assert_eq!(
            viz.machine(OperationKind::Search).phase_name(),
            "traversing"
        );
        let _ = viz.run_until_idle(10_000);
        assert_eq!(viz.machine(OperationKind::Search).phase_name(), "idle");
        assert!(viz
            .snapshot()
            .nodes
            .iter()
            .all(|n| n.tag == VisualTag::Normal));
        assert!(viz.tick_count() > 0);
    }
}
