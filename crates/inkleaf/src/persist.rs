//! Caller-side save batching.
//!
//! The canvas reports each committed stroke once and stops there. A caller
//! that persists strokes remotely usually wants to coalesce bursts of
//! commits into one save; [`SaveBatcher`] is a small debounce queue for that.
//! Time is passed in explicitly so the policy is testable and works with
//! any event loop.

use std::time::{Duration, Instant};

use log::debug;

use inkleaf_core::stroke::Stroke;

/// Quiet period after the last commit before a batch is due.
pub const DEFAULT_SAVE_WINDOW: Duration = Duration::from_millis(300);

/// Debounce queue of committed strokes awaiting persistence.
///
/// Each push restarts the quiet period. No stroke is ever dropped: a batch
/// that is not yet due stays queued, and [`flush`](Self::flush) drains
/// everything regardless of timing.
///
/// # Examples
///
/// ```
/// # use std::time::{Duration, Instant};
/// # use inkleaf::persist::SaveBatcher;
/// # use inkleaf_core::{stroke::Stroke, tool::Tool};
/// let mut batcher = SaveBatcher::new(Duration::from_millis(300));
/// let start = Instant::now();
///
/// batcher.push(Stroke::new(Tool::Draw, 1, "red", 3), start);
/// assert!(batcher.drain_due(start + Duration::from_millis(100)).is_empty());
/// assert_eq!(batcher.drain_due(start + Duration::from_millis(300)).len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SaveBatcher {
    window: Duration,
    queue: Vec<Stroke>,
    last_push: Option<Instant>,
}

impl Default for SaveBatcher {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_WINDOW)
    }
}

impl SaveBatcher {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            queue: Vec::new(),
            last_push: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Queues a committed stroke and restarts the quiet period at `now`.
    pub fn push(&mut self, stroke: Stroke, now: Instant) {
        self.queue.push(stroke);
        self.last_push = Some(now);
    }

    /// Returns true if the queue is non-empty and quiet since `window`.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_push {
            Some(last) => {
                !self.queue.is_empty() && now.saturating_duration_since(last) >= self.window
            }
            None => false,
        }
    }

    /// Takes the whole queue if it is due at `now`, in commit order.
    pub fn drain_due(&mut self, now: Instant) -> Vec<Stroke> {
        if !self.is_due(now) {
            return Vec::new();
        }
        self.flush()
    }

    /// Takes the whole queue immediately, in commit order.
    pub fn flush(&mut self) -> Vec<Stroke> {
        self.last_push = None;
        let batch = std::mem::take(&mut self.queue);
        if !batch.is_empty() {
            debug!(strokes = batch.len(); "Save batch released");
        }
        batch
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
