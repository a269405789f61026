//! Error types for the sync client.

use thiserror::Error;

/// Errors from a change feed implementation.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The request never produced a usable response: connection failure,
    /// timeout, or an undecodable body.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("unexpected status {0}")]
    Status(u16),
}

/// Errors from the sync client lifecycle.
#[derive(Debug, Error)]
pub enum SyncError {
    /// `start()` before a successful bootstrap.
    #[error("bootstrap has not completed; the client has no watermark yet")]
    NotBootstrapped,

    /// A second `bootstrap()` on an already-initialized client.
    #[error("client is already bootstrapped")]
    AlreadyBootstrapped,

    /// A second `start()` while the scheduler is running.
    #[error("scheduler is already running")]
    SchedulerRunning,

    /// The underlying feed call failed.
    #[error(transparent)]
    Feed(#[from] FeedError),
}
