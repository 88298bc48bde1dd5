//! Host-side plumbing around the detection engine.
//!
//! The detector itself is a pure, synchronous function of a page snapshot;
//! everything stateful or timed lives here: the per-tab product store with
//! its lifecycle hooks, the mutation-significance and debounce policy, and
//! the tokio loop that schedules detection passes and forwards results over
//! a channel.

mod runtime;
mod schedule;
mod store;

pub use runtime::run_detection_loop;
pub use schedule::{Debouncer, MutationBatch, ScheduleConfig};
pub use store::{ProductStore, TabId};
