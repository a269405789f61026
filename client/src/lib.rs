//! # NetGrid Client
//!
//! The polling sync client for the NetGrid change feed.
//!
//! A [`SyncClient`] owns a local device [`Collection`](netgrid_engine::Collection)
//! and the [`Watermark`](netgrid_engine::Watermark) cursor, and keeps both
//! consistent with the server through two operations on a [`ChangeFeed`]:
//! a one-time full load (`fetch_all`) and repeated incremental queries
//! (`fetch_changes`).
//!
//! ## Lifecycle
//!
//! ```text
//! Uninitialized --bootstrap()--> Idle --poll()--> Idle --...
//! ```
//!
//! - [`SyncClient::bootstrap`] loads the full collection once and
//!   establishes the watermark. Its failure is the only error surfaced to
//!   the caller; retry is explicit.
//! - [`SyncClient::start`] spawns the scheduler, which calls
//!   [`SyncClient::poll`] at a fixed interval. Poll failures are logged
//!   and self-heal on the next tick; ticks that land while a poll is in
//!   flight are dropped, never queued.
//! - [`SyncClient::stop`] cancels the scheduler; an in-flight response
//!   arriving after the cancellation is discarded, not merged.
//!
//! The client is cheap to clone: all clones observe the same collection,
//! watermark, and state.

pub mod client;
pub mod config;
pub mod error;
pub mod feed;
pub mod http;
mod scheduler;

pub use client::{PollOutcome, SkipReason, SyncClient, SyncState};
pub use config::SyncConfig;
pub use error::{FeedError, SyncError};
pub use feed::ChangeFeed;
pub use http::HttpChangeFeed;
