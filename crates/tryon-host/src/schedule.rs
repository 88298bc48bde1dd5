//! Detection trigger policy: mutation significance and debouncing.
//!
//! The policy pieces are plain state machines over explicit `Instant`s so
//! they can be tested without wall-clock sleeps; the tokio loop in
//! [`crate::run_detection_loop`] drives them.

use std::time::Duration;

use tokio::time::Instant;

use tryon_core::AppConfig;

/// Timing knobs for the detection loop.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// Delay before the first pass, letting first-paint dynamic content
    /// settle.
    pub initial_delay: Duration,
    /// Delay before the single retry pass when the first pass is empty.
    pub retry_delay: Duration,
    /// Quiet period a mutation burst must observe before re-detection.
    pub debounce_quiet: Duration,
    /// Added-node count above which a mutation batch is significant.
    pub mutation_node_threshold: usize,
}

impl ScheduleConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            initial_delay: Duration::from_millis(config.detect_initial_delay_ms),
            retry_delay: Duration::from_millis(config.detect_retry_delay_ms),
            debounce_quiet: Duration::from_millis(config.detect_debounce_ms),
            mutation_node_threshold: config.mutation_node_threshold,
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(1500),
            retry_delay: Duration::from_millis(4000),
            debounce_quiet: Duration::from_millis(1200),
            mutation_node_threshold: 5,
        }
    }
}

/// Summary of one DOM mutation batch, as reported by whatever observation
/// mechanism the embedding provides.
#[derive(Debug, Clone, Copy)]
pub struct MutationBatch {
    /// Nodes added across the batch.
    pub added_nodes: usize,
    /// Whether any touched node matched a product-related selector.
    pub matched_product_selector: bool,
}

impl MutationBatch {
    /// A batch is significant when it adds more than `threshold` nodes or
    /// touches product-related markup.
    #[must_use]
    pub fn is_significant(&self, threshold: usize) -> bool {
        self.added_nodes > threshold || self.matched_product_selector
    }
}

/// Single-deadline debouncer: each significant batch resets the one pending
/// deadline, so a burst of churn yields one firing after the quiet period.
#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    #[must_use]
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Note a significant batch: cancel any pending deadline and start a
    /// fresh quiet period from `now`.
    pub fn note(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// The pending deadline, if a firing is scheduled.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Report whether the deadline has passed; a firing clears it, so each
    /// scheduled recheck fires at most once.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
