//! The device record - the unit of synchronization.

use crate::DeviceId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Operational status of a device.
///
/// The wire may still carry the legacy values `"up"` and `"down"` from older
/// monitoring agents; deserialization normalizes those to [`Online`] and
/// [`Offline`], and anything unrecognized collapses to [`Unknown`].
///
/// [`Online`]: DeviceStatus::Online
/// [`Offline`]: DeviceStatus::Offline
/// [`Unknown`]: DeviceStatus::Unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeviceStatus {
    Online,
    Offline,
    #[default]
    Unknown,
}

impl DeviceStatus {
    /// Canonical wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Online => "online",
            DeviceStatus::Offline => "offline",
            DeviceStatus::Unknown => "unknown",
        }
    }
}

impl From<String> for DeviceStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "online" | "up" => DeviceStatus::Online,
            "offline" | "down" => DeviceStatus::Offline,
            _ => DeviceStatus::Unknown,
        }
    }
}

impl From<DeviceStatus> for String {
    fn from(status: DeviceStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_ssh_port() -> u16 {
    22
}

/// A monitored network device.
///
/// Owned by the server; the client holds a cached, possibly-stale copy.
/// `last_seen` is the authoritative "this record changed" signal driving
/// the change feed. The feed always ships whole records, so a `Device`
/// received from it replaces the local copy field for field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Stable unique identifier
    pub id: DeviceId,
    /// Administrative hostname
    pub hostname: String,
    /// Management IP address, unique server-side
    pub ip_address: String,
    /// Site this device belongs to
    #[serde(default)]
    pub site_id: Option<i64>,
    /// Device class, e.g. "switch" or "router"
    pub device_type: String,
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
    /// Current operational status
    #[serde(default)]
    pub status: DeviceStatus,
    /// When the server last observed a change to this device
    #[serde(default)]
    pub last_seen: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ssh_enabled: bool,
    #[serde(default)]
    pub ssh_username: Option<String>,
    #[serde(default)]
    pub ssh_password: Option<String>,
    #[serde(default = "default_ssh_port")]
    pub ssh_port: u16,
    /// Hostname reported by LLDP discovery, if any
    #[serde(default)]
    pub lldp_hostname: Option<String>,
}

impl Device {
    /// Create a device with the required identity fields; everything else
    /// starts at its default.
    pub fn new(
        id: DeviceId,
        hostname: impl Into<String>,
        ip_address: impl Into<String>,
        device_type: impl Into<String>,
    ) -> Self {
        Self {
            id,
            hostname: hostname.into(),
            ip_address: ip_address.into(),
            site_id: None,
            device_type: device_type.into(),
            vendor: None,
            model: None,
            os_version: None,
            snmp_version: None,
            snmp_community: None,
            status: DeviceStatus::Unknown,
            last_seen: None,
            ssh_enabled: false,
            ssh_username: None,
            ssh_password: None,
            ssh_port: default_ssh_port(),
            lldp_hostname: None,
        }
    }

    /// Stamp the modification signal.
    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.last_seen = Some(at);
    }

    pub fn is_online(&self) -> bool {
        self.status == DeviceStatus::Online
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_device_defaults() {
        let device = Device::new(7, "edge-rtr-01", "192.168.1.1", "router");

        assert_eq!(device.id, 7);
        assert_eq!(device.status, DeviceStatus::Unknown);
        assert_eq!(device.ssh_port, 22);
        assert!(device.last_seen.is_none());
        assert!(!device.is_online());
    }

    #[test]
    fn status_normalizes_legacy_values() {
        for (raw, expected) in [
            ("online", DeviceStatus::Online),
            ("up", DeviceStatus::Online),
            ("offline", DeviceStatus::Offline),
            ("down", DeviceStatus::Offline),
            ("unknown", DeviceStatus::Unknown),
            ("flapping", DeviceStatus::Unknown),
        ] {
            let status: DeviceStatus = serde_json::from_value(json!(raw)).unwrap();
            assert_eq!(status, expected, "raw status {raw:?}");
        }
    }

    #[test]
    fn status_serializes_canonically() {
        assert_eq!(
            serde_json::to_value(DeviceStatus::Online).unwrap(),
            json!("online")
        );
        assert_eq!(
            serde_json::to_value(DeviceStatus::Offline).unwrap(),
            json!("offline")
        );
    }

    #[test]
    fn deserializes_sparse_wire_payload() {
        // Only the required fields on the wire; everything else defaults.
        let device: Device = serde_json::from_value(json!({
            "id": 3,
            "hostname": "acc-sw-03",
            "ip_address": "10.1.2.3",
            "device_type": "switch",
            "status": "up"
        }))
        .unwrap();

        assert_eq!(device.status, DeviceStatus::Online);
        assert_eq!(device.ssh_port, 22);
        assert!(device.site_id.is_none());
    }

    #[test]
    fn serialization_roundtrip() {
        let mut device = Device::new(1, "core-sw-01", "10.0.0.1", "switch");
        device.vendor = Some("Cisco".into());
        device.status = DeviceStatus::Online;
        device.touch("2025-12-10T15:05:00Z".parse().unwrap());

        let json = serde_json::to_string(&device).unwrap();
        let parsed: Device = serde_json::from_str(&json).unwrap();

        assert_eq!(device, parsed);
    }
}
