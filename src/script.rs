//! Line-oriented command scripts for driving a [`Visualizer`] headlessly.
//!
//! ```text
//! # build a small tree
//! insert 50
//! insert 30
//! delete 50
//! wait 30
//! search 30
//! width 900
//! settle
//! clear
//! ```
//!
//! Malformed lines are rejected with their line number before anything
//! reaches the engine.

use std::str::FromStr;

use crate::engine::command::{Command, OperationKind};
use crate::engine::scheduler::Admission;
use crate::engine::Visualizer;
use crate::error::BstVizError;

/// One parsed script line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptStep {
    /// Submit an operation.
    Submit(Command),
    /// Tick a fixed number of times.
    Wait(u32),
    /// Tick until idle and every node has reached its target.
    Settle,
    /// Free every node.
    Clear,
    /// Change the canvas width.
    Width(f32),
}

impl FromStr for ScriptStep {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            return Err("empty line".to_owned());
        };
        let argument = words.next();
        if let Some(extra) = words.next() {
            return Err(format!("unexpected argument '{extra}'"));
        }

        let step = match keyword.to_ascii_lowercase().as_str() {
            "wait" => Self::Wait(parse_arg(keyword, argument)?),
            "width" => {
                let width: f32 = parse_arg(keyword, argument)?;
                if !width.is_finite() || width <= 0.0 {
                    return Err(format!("width must be positive, got {width}"));
                }
                Self::Width(width)
            }
            "settle" | "clear" => {
                if let Some(arg) = argument {
                    return Err(format!("unexpected argument '{arg}'"));
                }
                if keyword.eq_ignore_ascii_case("settle") {
                    Self::Settle
                } else {
                    Self::Clear
                }
            }
            _ => {
                let kind: OperationKind =
                    keyword.parse().map_err(|e| format!("{e}"))?;
                Self::Submit(Command {
                    value: parse_arg(keyword, argument)?,
                    kind,
                })
            }
        };
        Ok(step)
    }
}

fn parse_arg<T: FromStr>(
    keyword: &str,
    argument: Option<&str>,
) -> Result<T, String> {
    let Some(arg) = argument else {
        return Err(format!("missing argument for '{keyword}'"));
    };
    arg.parse()
        .map_err(|_| format!("invalid argument '{arg}' for '{keyword}'"))
}

/// Parse a whole script. Blank lines and `#` comments are skipped.
///
/// # Errors
///
/// Returns [`BstVizError::Script`] naming the first malformed line.
pub fn parse_script(text: &str) -> Result<Vec<ScriptStep>, BstVizError> {
    let mut steps = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let step = line.parse().map_err(|message| BstVizError::Script {
            line: index + 1,
            message,
        })?;
        steps.push(step);
    }
    Ok(steps)
}

/// Totals from one script run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptReport {
    /// Submissions the engine started.
    pub accepted: usize,
    /// Submissions (and clears) the admission matrix rejected.
    pub blocked: usize,
    /// Ticks run.
    pub ticks: u64,
    /// Every status message shown, in order.
    pub messages: Vec<String>,
}

/// Executes parsed steps against a visualizer.
#[derive(Debug, Clone, Copy)]
pub struct ScriptRunner {
    /// Submit each command immediately instead of letting the previous one
    /// finish first, so the admission matrix decides.
    pub overlap: bool,
    /// Upper bound on ticks spent waiting for any single step.
    pub max_ticks_per_step: u32,
}

impl Default for ScriptRunner {
    fn default() -> Self {
        Self {
            overlap: false,
            max_ticks_per_step: 100_000,
        }
    }
}

impl ScriptRunner {
    /// Run every step, then tick until the engine is idle.
    ///
    /// `on_tick` is called after every tick, e.g. to pace a real-time
    /// loop or draw a frame.
    pub fn run(
        &self,
        viz: &mut Visualizer,
        steps: &[ScriptStep],
        mut on_tick: impl FnMut(&Visualizer),
    ) -> ScriptReport {
        let mut report = ScriptReport::default();
        for &step in steps {
            log::debug!("script step: {step:?}");
            match step {
                ScriptStep::Submit(command) => {
                    record(viz.execute(command), &mut report);
                    if !self.overlap {
                        self.drain_until(viz, &mut report, &mut on_tick, false);
                    }
                }
                ScriptStep::Wait(ticks) => {
                    for _ in 0..ticks {
                        tick(viz, &mut report, &mut on_tick);
                    }
                }
                ScriptStep::Settle => {
                    self.drain_until(viz, &mut report, &mut on_tick, true);
                }
                ScriptStep::Clear => {
                    record(viz.clear(), &mut report);
                }
                ScriptStep::Width(width) => viz.set_canvas_width(width),
            }
            report.messages.extend(viz.drain_status_history());
        }
        self.drain_until(viz, &mut report, &mut on_tick, false);
        report.messages.extend(viz.drain_status_history());
        report
    }

    fn drain_until(
        &self,
        viz: &mut Visualizer,
        report: &mut ScriptReport,
        on_tick: &mut impl FnMut(&Visualizer),
        settled: bool,
    ) {
        let mut ticks = 0;
        while ticks < self.max_ticks_per_step
            && !(viz.is_idle() && (!settled || viz.is_settled()))
        {
            tick(viz, report, on_tick);
            ticks += 1;
        }
        if ticks == self.max_ticks_per_step {
            log::warn!("script step gave up after {ticks} ticks");
        }
    }
}

fn record(admission: Admission, report: &mut ScriptReport) {
    match admission {
        Admission::Accepted => report.accepted += 1,
        Admission::Blocked => report.blocked += 1,
    }
}

fn tick(
    viz: &mut Visualizer,
    report: &mut ScriptReport,
    on_tick: &mut impl FnMut(&Visualizer),
) {
    viz.tick();
    report.ticks += 1;
    on_tick(viz);
}
