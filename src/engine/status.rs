//! Transient user-facing status line.

use std::collections::VecDeque;

/// Messages kept for [`StatusLine::drain_recent`] before the oldest drop.
const RECENT_CAPACITY: usize = 32;

/// One message at a time with a tick countdown.
///
/// A new message replaces the old one and restarts the countdown. The
/// message clears itself when the countdown reaches zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    message: Option<String>,
    remaining: u32,
    duration: u32,
    shown: u64,
    recent: VecDeque<String>,
}

impl StatusLine {
    /// Empty status line whose messages last `duration` ticks.
    #[must_use]
    pub fn new(duration: u32) -> Self {
        Self {
            message: None,
            remaining: 0,
            duration,
            shown: 0,
            recent: VecDeque::new(),
        }
    }

    /// Show an informational message.
    pub fn set(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::info!("{message}");
        self.show(message);
    }

    /// Show a warning, e.g. a rejected submission.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{message}");
        self.show(message);
    }

    fn show(&mut self, message: String) {
        if self.recent.len() == RECENT_CAPACITY {
            let _ = self.recent.pop_front();
        }
        self.recent.push_back(message.clone());
        self.message = Some(message);
        self.remaining = self.duration;
        self.shown += 1;
    }

    /// Count down one tick.
    pub fn tick(&mut self) {
        if self.message.is_none() {
            return;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.message = None;
        }
    }

    /// Current message, if still showing.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Ticks left before the message clears.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Number of messages shown so far.
    #[must_use]
    pub const fn shown(&self) -> u64 {
        self.shown
    }

    /// Every message shown since the last drain, oldest first. Keeps at
    /// most the latest few.
    pub fn drain_recent(&mut self) -> Vec<String> {
        self.recent.drain(..).collect()
    }
}
