//! The timer loop driving scheduled polls.
//!
//! One tokio task per started client. Overlap prevention is structural:
//! the loop awaits each poll to completion, and the interval's missed-tick
//! behavior is `Skip`, so ticks that land during an in-flight poll are
//! dropped rather than queued. Cancellation races the shutdown signal
//! against both the tick and the poll itself, so a response that completes
//! after `stop()` is discarded instead of merged.

use crate::client::{PollOutcome, SyncClient};
use crate::feed::ChangeFeed;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};

pub(crate) fn spawn<F>(client: SyncClient<F>, mut shutdown: watch::Receiver<()>, period: Duration)
where
    F: ChangeFeed + Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tracing::debug!(period_ms = period.as_millis() as u64, "sync scheduler started");

        loop {
            tokio::select! {
                _ = shutdown.changed() => break,
                _ = ticker.tick() => {
                    tokio::select! {
                        _ = shutdown.changed() => break,
                        outcome = client.poll() => match outcome {
                            PollOutcome::Applied(merge) if merge.total() > 0 => {
                                tracing::debug!(
                                    inserted = merge.inserted,
                                    updated = merge.updated,
                                    "scheduled poll applied changes"
                                );
                            }
                            PollOutcome::Applied(_) => {}
                            PollOutcome::Skipped(reason) => {
                                tracing::trace!(?reason, "scheduled poll skipped");
                            }
                            PollOutcome::Failed(err) => {
                                tracing::warn!(error = %err, "scheduled poll failed");
                            }
                        },
                    }
                }
            }
        }

        tracing::debug!("sync scheduler stopped");
    });
}
