//! The detection loop: initial pass, one empty-result retry, then
//! debounced re-detection on significant DOM mutations.

use tokio::sync::mpsc;
use tokio::time::{sleep, sleep_until, Instant};

use tryon_core::DetectedProduct;

use crate::schedule::{Debouncer, MutationBatch, ScheduleConfig};

/// Drive detection passes for one page lifetime.
///
/// `run_pass` captures whatever it needs to snapshot the current document
/// and run the detector; it is invoked only from this task. Every pass's
/// result — empty included — is forwarded on `results`, since each pass
/// supersedes the previous one in the consumer's view. A failed pass is
/// logged and forwarded as empty; failures never escape the loop.
///
/// The loop ends when either channel peer goes away: the mutation sender
/// (page gone) or the results receiver (consumer gone).
pub async fn run_detection_loop<F>(
    config: ScheduleConfig,
    mut mutations: mpsc::Receiver<MutationBatch>,
    results: mpsc::Sender<Vec<DetectedProduct>>,
    mut run_pass: F,
) where
    F: FnMut() -> anyhow::Result<Vec<DetectedProduct>>,
{
    sleep(config.initial_delay).await;
    let first = execute_pass(&mut run_pass);
    let first_empty = first.is_empty();
    if results.send(first).await.is_err() {
        return;
    }

    // One host-side retry for slow-loading single-page apps. The detector
    // itself never retries.
    if first_empty {
        sleep(config.retry_delay).await;
        if results.send(execute_pass(&mut run_pass)).await.is_err() {
            return;
        }
    }

    let mut debouncer = Debouncer::new(config.debounce_quiet);
    loop {
        let deadline = debouncer.deadline();
        tokio::select! {
            batch = mutations.recv() => match batch {
                Some(batch) if batch.is_significant(config.mutation_node_threshold) => {
                    debouncer.note(Instant::now());
                }
                Some(_) => {}
                None => return,
            },
            () = wait_for(deadline) => {
                if debouncer.fire(Instant::now())
                    && results.send(execute_pass(&mut run_pass)).await.is_err()
                {
                    return;
                }
            }
        }
    }
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}

fn execute_pass<F>(run_pass: &mut F) -> Vec<DetectedProduct>
where
    F: FnMut() -> anyhow::Result<Vec<DetectedProduct>>,
{
    match run_pass() {
        Ok(products) => products,
        Err(error) => {
            tracing::warn!(%error, "detection pass failed; treating as empty");
            Vec::new()
        }
    }
}
