//! # NetGrid Engine
//!
//! The incremental sync core for NetGrid device inventories.
//!
//! This crate holds the protocol-level pieces shared by the sync client and
//! the change feed server: the device record model, the insertion-ordered
//! collection, the watermark cursor, the change set wire type, and the
//! reconciler that folds change sets into a collection.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine has no knowledge of HTTP, timers, or platform
//! - **Deterministic**: the same collection and change set always merge to
//!   the same result
//! - **Idempotent**: applying a change set twice equals applying it once,
//!   so a retried or duplicated poll can never corrupt state
//!
//! ## Core Concepts
//!
//! ### Devices
//!
//! A [`Device`] is the unit of synchronization: a typed record with a
//! stable [`DeviceId`] and a `last_seen` timestamp that acts as the
//! modification signal. The server owns the truth; clients hold cached,
//! possibly-stale copies.
//!
//! ### Watermark
//!
//! A [`Watermark`] is an opaque, totally ordered cursor marking the point
//! up to which a client's view is known consistent with the server. It is
//! exchanged on the wire as an ISO-8601 UTC timestamp.
//!
//! ### Change sets
//!
//! A [`ChangeSet`] is the result of one change feed query: the devices
//! modified at or after a given watermark, plus the next watermark to use.
//! The feed always returns whole records, never sparse patches.
//!
//! ### Reconciliation
//!
//! [`reconcile::merge`] upserts each changed device into a [`Collection`]
//! by identity: updates replace in place, inserts append, and nothing is
//! ever removed (the feed carries no deletion signal).
//!
//! ## Quick Start
//!
//! ```rust
//! use netgrid_engine::{reconcile, Collection, Device, DeviceStatus};
//!
//! let mut collection = Collection::new();
//! collection.upsert(Device::new(1, "core-sw-01", "10.0.0.1", "switch"));
//!
//! let mut changed = Device::new(1, "core-sw-01", "10.0.0.1", "switch");
//! changed.status = DeviceStatus::Offline;
//!
//! let outcome = reconcile::merge(&mut collection, vec![changed]);
//! assert_eq!(outcome.updated, 1);
//! assert_eq!(collection.get(1).unwrap().status, DeviceStatus::Offline);
//! ```

pub mod changeset;
pub mod collection;
pub mod device;
pub mod error;
pub mod reconcile;
pub mod watermark;

// Re-export main types at crate root
pub use changeset::ChangeSet;
pub use collection::{Collection, Upsert};
pub use device::{Device, DeviceStatus};
pub use error::Error;
pub use reconcile::MergeOutcome;
pub use watermark::Watermark;

/// Stable unique identifier of a device record.
pub type DeviceId = i64;
