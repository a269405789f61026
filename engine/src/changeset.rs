//! The change feed wire type.

use crate::{Device, Watermark};
use serde::{Deserialize, Serialize};

/// The result of one change feed query.
///
/// `changed` carries every device whose modification time is at or after
/// the queried watermark - always whole records, never sparse patches, and
/// possibly a superset of the true changes (false positives are allowed by
/// the feed contract; false negatives are not). `watermark` is the cursor
/// the caller must adopt for its next query; on the wire it is the
/// `timestamp` field of the JSON body.
///
/// Transient: consumed by the reconciler and discarded, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Devices modified in the queried window
    pub changed: Vec<Device>,
    /// Cursor for the next query
    #[serde(rename = "timestamp")]
    pub watermark: Watermark,
}

impl ChangeSet {
    pub fn new(changed: Vec<Device>, watermark: Watermark) -> Self {
        Self { changed, watermark }
    }

    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }
}
