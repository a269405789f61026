//! The sync client - owner of the collection, the watermark, and the
//! scheduler handle.

use crate::config::SyncConfig;
use crate::error::{FeedError, SyncError};
use crate::feed::ChangeFeed;
use crate::scheduler;
use netgrid_engine::{reconcile, Collection, Device, DeviceId, MergeOutcome, Watermark};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;

/// Lifecycle states of a sync client.
///
/// Only `Idle` accepts a poll trigger; a trigger in any other state is
/// dropped, not queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// No watermark, empty collection. Entry point.
    Uninitialized,
    /// A `fetch_all` is in flight.
    Bootstrapping,
    /// Watermark set, resting between ticks.
    Idle,
    /// A `fetch_changes` is in flight.
    Polling,
}

/// Why a poll trigger was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Bootstrap has not completed; there is no watermark to poll from.
    NotBootstrapped,
    /// Another fetch is already in flight.
    InFlight,
}

/// What one poll trigger amounted to.
///
/// `Failed` is informational: the poll already recovered by leaving the
/// collection and watermark untouched, and the next tick retries with the
/// same cursor.
#[derive(Debug)]
pub enum PollOutcome {
    /// Changes were fetched and merged.
    Applied(MergeOutcome),
    /// The trigger was dropped without touching the network.
    Skipped(SkipReason),
    /// The fetch failed; local state is unchanged.
    Failed(FeedError),
}

impl PollOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, PollOutcome::Applied(_))
    }
}

struct Inner {
    state: SyncState,
    collection: Collection,
    watermark: Option<Watermark>,
    shutdown: Option<watch::Sender<()>>,
}

/// Restores a transient state if the future driving it is dropped before
/// completion, so a cancelled fetch can never wedge the state machine.
struct RevertGuard {
    inner: Arc<Mutex<Inner>>,
    transient: SyncState,
    fallback: SyncState,
}

impl Drop for RevertGuard {
    fn drop(&mut self) {
        let mut inner = self.inner.lock();
        if inner.state == self.transient {
            inner.state = self.fallback;
        }
    }
}

/// The sync client.
///
/// Owns the local device collection and the watermark cursor, and drives
/// both through a [`ChangeFeed`]. Clones share state, so the scheduler
/// task and any number of observers see the same collection; the inner
/// lock is never held across an await, which keeps mutations strictly
/// sequential.
///
/// Call [`stop`](SyncClient::stop) on teardown - the scheduler task holds
/// a clone of the client and keeps polling until told to stop.
pub struct SyncClient<F> {
    feed: F,
    config: SyncConfig,
    inner: Arc<Mutex<Inner>>,
}

impl<F: Clone> Clone for SyncClient<F> {
    fn clone(&self) -> Self {
        Self {
            feed: self.feed.clone(),
            config: self.config.clone(),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F> SyncClient<F> {
    /// Create a client with the default configuration.
    pub fn new(feed: F) -> Self {
        Self::with_config(feed, SyncConfig::default())
    }

    pub fn with_config(feed: F, config: SyncConfig) -> Self {
        Self {
            feed,
            config,
            inner: Arc::new(Mutex::new(Inner {
                state: SyncState::Uninitialized,
                collection: Collection::new(),
                watermark: None,
                shutdown: None,
            })),
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn state(&self) -> SyncState {
        self.inner.lock().state
    }

    /// The current cursor; `None` until bootstrap succeeds.
    pub fn watermark(&self) -> Option<Watermark> {
        self.inner.lock().watermark
    }

    /// Snapshot of the collection in insertion order.
    pub fn devices(&self) -> Vec<Device> {
        self.inner.lock().collection.to_vec()
    }

    pub fn device(&self, id: DeviceId) -> Option<Device> {
        self.inner.lock().collection.get(id).cloned()
    }

    /// Cloned snapshot of the whole collection.
    pub fn collection(&self) -> Collection {
        self.inner.lock().collection.clone()
    }

    /// Whether the scheduler is currently running.
    pub fn is_running(&self) -> bool {
        self.inner.lock().shutdown.is_some()
    }

    /// Stop the scheduler. Further ticks are cancelled immediately, and an
    /// in-flight poll is dropped without merging its response. No-op if
    /// the scheduler is not running.
    pub fn stop(&self) {
        let sender = self.inner.lock().shutdown.take();
        if sender.is_some() {
            tracing::debug!("stopping sync scheduler");
        }
        // Dropping the sender wakes the scheduler loop, which exits.
        drop(sender);
    }
}

impl<F: ChangeFeed> SyncClient<F> {
    /// One-time full load establishing the watermark.
    ///
    /// The watermark is captured *before* the fetch: anything modified
    /// while the bootstrap is in flight gets re-fetched by the first poll,
    /// which the idempotent merge absorbs. On failure the client returns
    /// to `Uninitialized` and the caller may retry explicitly - this is
    /// the only error the client surfaces.
    pub async fn bootstrap(&self) -> Result<(), SyncError> {
        {
            let mut inner = self.inner.lock();
            if inner.state != SyncState::Uninitialized {
                return Err(SyncError::AlreadyBootstrapped);
            }
            inner.state = SyncState::Bootstrapping;
        }
        let _guard = RevertGuard {
            inner: Arc::clone(&self.inner),
            transient: SyncState::Bootstrapping,
            fallback: SyncState::Uninitialized,
        };

        let mark = Watermark::now();
        let devices = self.feed.fetch_all().await?;

        let mut inner = self.inner.lock();
        tracing::info!(devices = devices.len(), watermark = %mark, "bootstrap complete");
        inner.collection = devices.into_iter().collect();
        inner.watermark = Some(mark);
        inner.state = SyncState::Idle;
        Ok(())
    }

    /// One poll tick: fetch changes since the current watermark and merge
    /// them.
    ///
    /// Accepted only in `Idle`; any other state drops the trigger. On
    /// failure the watermark and collection are left exactly as they were,
    /// which is safe to retry because the feed query is inclusive of
    /// everything at or after the cursor.
    pub async fn poll(&self) -> PollOutcome {
        let since = {
            let mut inner = self.inner.lock();
            match inner.state {
                SyncState::Idle => match inner.watermark {
                    Some(mark) => {
                        inner.state = SyncState::Polling;
                        mark
                    }
                    // Idle implies a watermark; treat a missing one as not
                    // bootstrapped rather than panic.
                    None => return PollOutcome::Skipped(SkipReason::NotBootstrapped),
                },
                SyncState::Bootstrapping | SyncState::Polling => {
                    return PollOutcome::Skipped(SkipReason::InFlight)
                }
                SyncState::Uninitialized => {
                    return PollOutcome::Skipped(SkipReason::NotBootstrapped)
                }
            }
        };
        let _guard = RevertGuard {
            inner: Arc::clone(&self.inner),
            transient: SyncState::Polling,
            fallback: SyncState::Idle,
        };

        match self.feed.fetch_changes(since).await {
            Ok(set) => {
                let mut inner = self.inner.lock();
                let adopted = since.max(set.watermark);
                let outcome = reconcile::merge(&mut inner.collection, set.changed);
                inner.watermark = Some(adopted);
                inner.state = SyncState::Idle;
                tracing::debug!(
                    inserted = outcome.inserted,
                    updated = outcome.updated,
                    watermark = %adopted,
                    "poll applied"
                );
                PollOutcome::Applied(outcome)
            }
            Err(err) => {
                tracing::warn!(error = %err, since = %since, "poll failed; retrying on next tick");
                PollOutcome::Failed(err)
            }
        }
    }
}

impl<F> SyncClient<F>
where
    F: ChangeFeed + Clone + Send + Sync + 'static,
{
    /// Start the polling scheduler.
    ///
    /// Fails with [`SyncError::NotBootstrapped`] before a successful
    /// bootstrap and [`SyncError::SchedulerRunning`] if already started:
    /// one active timer per client instance. The first poll fires one
    /// interval after start.
    pub fn start(&self) -> Result<(), SyncError> {
        let receiver = {
            let mut inner = self.inner.lock();
            if inner.watermark.is_none() {
                return Err(SyncError::NotBootstrapped);
            }
            if inner.shutdown.is_some() {
                return Err(SyncError::SchedulerRunning);
            }
            let (sender, receiver) = watch::channel(());
            inner.shutdown = Some(sender);
            receiver
        };
        scheduler::spawn(self.clone(), receiver, self.config.poll_interval);
        Ok(())
    }
}
