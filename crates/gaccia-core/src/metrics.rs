//! Process-wide atomic counters for evaluation runs.
//!
//! Incremented silently where the work happens; [`Metrics::flush`] emits
//! the current values as one `tracing::info!` event, typically at the end
//! of a run.

use std::sync::atomic::{AtomicU64, Ordering};

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

/// What is being counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    /// Judge prompts sent to the text-generation service
    JudgeCalls,
    /// Judge replies without a usable score (default substituted)
    ScoresDefaulted,
    /// Commentary prompts sent
    CommentaryCalls,
    /// Completed competitions
    RunsCompleted,
    /// Report directories written
    ReportsWritten,
}

/// Lock-free counters, one per [`Counter`].
pub struct Metrics {
    counters: [AtomicU64; 5],
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            counters: [
                AtomicU64::new(0),
                AtomicU64::new(0),
                AtomicU64::new(0),
                AtomicU64::new(0),
                AtomicU64::new(0),
            ],
        }
    }

    fn slot(&self, counter: Counter) -> &AtomicU64 {
        let idx = match counter {
            Counter::JudgeCalls => 0,
            Counter::ScoresDefaulted => 1,
            Counter::CommentaryCalls => 2,
            Counter::RunsCompleted => 3,
            Counter::ReportsWritten => 4,
        };
        &self.counters[idx]
    }

    /// Increment `counter` by one.
    pub fn inc(&self, counter: Counter) {
        self.slot(counter).fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = ?counter, "counter incremented");
    }

    /// Current value of `counter`.
    pub fn get(&self, counter: Counter) -> u64 {
        self.slot(counter).load(Ordering::Relaxed)
    }

    /// Emit all current counter values as a single `info!` event.
    pub fn flush(&self) {
        tracing::info!(
            metric = "flush",
            judge_calls = self.get(Counter::JudgeCalls),
            scores_defaulted = self.get(Counter::ScoresDefaulted),
            commentary_calls = self.get(Counter::CommentaryCalls),
            runs_completed = self.get(Counter::RunsCompleted),
            reports_written = self.get(Counter::ReportsWritten),
        );
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        for c in &self.counters {
            c.store(0, Ordering::Relaxed);
        }
    }
}
