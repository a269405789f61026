//! Sync client configuration.

use std::time::Duration;

/// How often the scheduler polls the change feed.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Upper bound on any single feed request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Tunables for a [`SyncClient`](crate::SyncClient).
///
/// Explicit struct, no ambient environment: the client is a library and
/// multiple independent instances must be able to coexist.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Interval between scheduled polls
    pub poll_interval: Duration,
    /// Per-request timeout for the HTTP feed
    pub request_timeout: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
