//! The change feed contract consumed by the sync client.

use crate::error::FeedError;
use netgrid_engine::{ChangeSet, Device, Watermark};
use std::future::Future;

/// A provider of the two sync operations.
///
/// Contract for `fetch_changes`: the returned set must contain every device
/// modified between `since` and the returned watermark - a superset is fine
/// (false positives merge idempotently), an omission is not. A provider
/// that cannot interpret `since` degrades to returning the full collection
/// with a fresh watermark rather than erroring.
pub trait ChangeFeed {
    /// Every device currently known to the server.
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Device>, FeedError>> + Send;

    /// Devices modified at or after `since`, plus the next watermark.
    fn fetch_changes(
        &self,
        since: Watermark,
    ) -> impl Future<Output = Result<ChangeSet, FeedError>> + Send;
}
