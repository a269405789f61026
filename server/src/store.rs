//! The authoritative in-memory device store.
//!
//! Stand-in for the production database behind the change feed: id-ordered
//! listing, modification stamping on every write, and the inclusive
//! changes-since query the feed contract is built on.

use chrono::Utc;
use netgrid_engine::{Device, DeviceId, DeviceStatus, Watermark};
use parking_lot::RwLock;
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Store errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("device with this IP already exists: {0}")]
    DuplicateIp(String),
}

fn default_ssh_port() -> u16 {
    22
}

/// Device registration/update payload.
///
/// `id` is optional: omitted means "register a new device" and the store
/// allocates the next id, mirroring the database's autoincrement.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceUpsert {
    #[serde(default)]
    pub id: Option<DeviceId>,
    pub hostname: String,
    pub ip_address: String,
    pub device_type: String,
    #[serde(default)]
    pub site_id: Option<i64>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub os_version: Option<String>,
    #[serde(default)]
    pub snmp_version: Option<String>,
    #[serde(default)]
    pub snmp_community: Option<String>,
    #[serde(default)]
    pub status: DeviceStatus,
    #[serde(default)]
    pub ssh_enabled: bool,
    #[serde(default)]
    pub ssh_username: Option<String>,
    #[serde(default)]
    pub ssh_password: Option<String>,
    #[serde(default = "default_ssh_port")]
    pub ssh_port: u16,
    #[serde(default)]
    pub lldp_hostname: Option<String>,
}

#[derive(Debug)]
struct State {
    devices: BTreeMap<DeviceId, Device>,
    next_id: DeviceId,
}

/// Thread-safe device store. Reads are id-ordered; every write stamps
/// `last_seen`, which is what drives the change feed.
#[derive(Debug)]
pub struct DeviceStore {
    inner: RwLock<State>,
}

impl DeviceStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(State {
                devices: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Every device, ordered by id.
    pub fn list(&self) -> Vec<Device> {
        self.inner.read().devices.values().cloned().collect()
    }

    pub fn get(&self, id: DeviceId) -> Option<Device> {
        self.inner.read().devices.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().devices.is_empty()
    }

    /// Devices modified at or after `since`, ordered by id.
    ///
    /// A device with no `last_seen` cannot be proven unchanged, so it is
    /// conservatively included - the contract allows false positives but
    /// never false negatives.
    pub fn changes_since(&self, since: Watermark) -> Vec<Device> {
        self.inner
            .read()
            .devices
            .values()
            .filter(|d| match d.last_seen {
                Some(seen) => Watermark::from(seen) >= since,
                None => true,
            })
            .cloned()
            .collect()
    }

    /// Insert or update a device, stamping `last_seen` with the current
    /// server time. Registering a new device with an IP that is already
    /// taken by another device is rejected.
    pub fn upsert(&self, request: DeviceUpsert) -> Result<Device, StoreError> {
        let mut state = self.inner.write();

        let id = request.id.unwrap_or(state.next_id);
        let ip_taken = state
            .devices
            .values()
            .any(|d| d.ip_address == request.ip_address && d.id != id);
        if ip_taken {
            return Err(StoreError::DuplicateIp(request.ip_address));
        }

        let device = Device {
            id,
            hostname: request.hostname,
            ip_address: request.ip_address,
            site_id: request.site_id,
            device_type: request.device_type,
            vendor: request.vendor,
            model: request.model,
            os_version: request.os_version,
            snmp_version: request.snmp_version,
            snmp_community: request.snmp_community,
            status: request.status,
            last_seen: Some(Utc::now()),
            ssh_enabled: request.ssh_enabled,
            ssh_username: request.ssh_username,
            ssh_password: request.ssh_password,
            ssh_port: request.ssh_port,
            lldp_hostname: request.lldp_hostname,
        };

        state.next_id = state.next_id.max(id + 1);
        state.devices.insert(id, device.clone());
        Ok(device)
    }
}
