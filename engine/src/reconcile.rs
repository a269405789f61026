//! Reconciliation - folding a change set into the local collection.
//!
//! The merge is a plain upsert by identity. The feed ships whole records,
//! so an incoming device replaces the local copy entirely; there is no
//! field-level patching and no conflict resolution beyond last-fetched-wins.
//!
//! Idempotence falls out of that: fields are overwritten, never incremented
//! or appended, so a retried or duplicated poll applies cleanly.

use crate::{Collection, Device, Upsert};

/// Counts of what one merge did, for logging and assertions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Devices that were new to the collection
    pub inserted: usize,
    /// Devices that replaced an existing entry
    pub updated: usize,
}

impl MergeOutcome {
    pub fn total(&self) -> usize {
        self.inserted + self.updated
    }
}

/// Merge a change set's devices into the collection.
///
/// Each incoming device is upserted by id: present entries are replaced in
/// place, absent ones are appended in arrival order. A duplicated id within
/// `changed` resolves to its last occurrence.
pub fn merge(collection: &mut Collection, changed: Vec<Device>) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();
    for device in changed {
        match collection.upsert(device) {
            Upsert::Inserted => outcome.inserted += 1,
            Upsert::Updated => outcome.updated += 1,
        }
    }
    outcome
}
