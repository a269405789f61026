//! The insertion-ordered device collection.

use crate::{Device, DeviceId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Whether an upsert inserted a new device or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Updated,
}

/// An insertion-ordered map of devices keyed by id.
///
/// New devices append at the end; updated devices keep their position.
/// Mutated only by the reconciler on the sync client's single logical
/// thread of execution. Equality is exact - same devices in the same
/// order - which is what the failure-isolation tests rely on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    order: Vec<DeviceId>,
    devices: HashMap<DeviceId, Device>,
}

impl Collection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a device by id.
    pub fn get(&self, id: DeviceId) -> Option<&Device> {
        self.devices.get(&id)
    }

    pub fn contains(&self, id: DeviceId) -> bool {
        self.devices.contains_key(&id)
    }

    /// Insert or replace a device by id, preserving arrival order for new
    /// entries and in-place position for updated ones.
    pub fn upsert(&mut self, device: Device) -> Upsert {
        match self.devices.entry(device.id) {
            Entry::Occupied(mut entry) => {
                entry.insert(device);
                Upsert::Updated
            }
            Entry::Vacant(entry) => {
                self.order.push(device.id);
                entry.insert(device);
                Upsert::Inserted
            }
        }
    }

    /// Devices in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.order.iter().filter_map(|id| self.devices.get(id))
    }

    /// An owned snapshot in insertion order.
    pub fn to_vec(&self) -> Vec<Device> {
        self.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl FromIterator<Device> for Collection {
    fn from_iter<I: IntoIterator<Item = Device>>(iter: I) -> Self {
        let mut collection = Collection::new();
        for device in iter {
            collection.upsert(device);
        }
        collection
    }
}

impl Extend<Device> for Collection {
    fn extend<I: IntoIterator<Item = Device>>(&mut self, iter: I) {
        for device in iter {
            self.upsert(device);
        }
    }
}
