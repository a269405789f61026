//! Change feed handler logic.

use crate::store::DeviceStore;
use netgrid_engine::{ChangeSet, Device, Watermark};

/// Changes responses may be served from intermediary caches for up to two
/// minutes; polling clients must not expect anything fresher inside that
/// window.
pub const CHANGES_CACHE_CONTROL: &str = "public, max-age=120";

/// The bootstrap load: every device, ordered by id.
pub fn full_collection(store: &DeviceStore) -> Vec<Device> {
    let devices = store.list();
    tracing::debug!(devices = devices.len(), "serving full collection");
    devices
}

/// One change feed query.
///
/// The new watermark is captured *before* the store is read: anything
/// modified between the capture and the read shows up both in this
/// response and in the next one, which the client's idempotent merge
/// absorbs. Capturing after the read could silently drop a write that
/// landed in between - a false negative the contract forbids.
///
/// An unparseable cursor is not an error: the feed degrades to a full
/// resync so a confused client heals itself on its regular poll path.
pub fn changes_since(store: &DeviceStore, raw_since: &str) -> ChangeSet {
    let mark = Watermark::now();
    let changed = match Watermark::parse(raw_since) {
        Ok(since) => store.changes_since(since),
        Err(err) => {
            tracing::debug!(error = %err, "unparseable cursor, degrading to full resync");
            store.list()
        }
    };
    tracing::debug!(changed = changed.len(), watermark = %mark, "serving changes");
    ChangeSet::new(changed, mark)
}
