// CLASSIFICATION: COMMUNITY
// Filename: lib.rs v0.4
// Author: Lukas Bower
// Date Modified: 2027-08-02

//! RAM-backed byte device for Cohesix.
//!
//! Exposes a fixed-capacity in-memory store through file-like
//! sessions: open, read, write, seek, and close operate against
//! session-local cursors while every session shares one buffer and
//! one logical length. Append opens continue from the end of data,
//! write-only opens discard previous content, sparse writes zero-fill
//! skipped ranges, and a write that crosses capacity commits what fit
//! and reports the rest.
//!
//! # Public Surface
//! * [`DevConfig`] – device name and capacity.
//! * [`RamDev`] – the device itself; hands out [`Session`] cursors.
//! * [`DevFile`] – `std::io` view over one session.
//! * [`install`] / [`uninstall`] – registry-backed lifecycle glue.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod device;
pub mod file;
pub mod registry;
pub mod session;

use log::info;
use serde::Deserialize;

pub use device::{DevError, RamDev};
pub use file::DevFile;
pub use session::{OpenMode, Session};

/// Default backing store size, in bytes.
pub const DEFAULT_CAPACITY: usize = 4_000_000;

/// Configuration for a device instance.
///
/// Both knobs are fixed for the life of the device; there is no
/// runtime mutation surface.
#[derive(Debug, Clone, Deserialize)]
pub struct DevConfig {
    /// Device identifier; the registry exposes it as `/dev/<name>`.
    pub name: String,
    /// Fixed size of the backing store in bytes.
    pub capacity: usize,
}

impl Default for DevConfig {
    fn default() -> Self {
        Self {
            name: "ram0".into(),
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl DevConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_str(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }
}

/// Register the device name, then allocate its backing store.
///
/// Registration happens first so a name collision fails before any
/// memory is reserved; an allocation failure unwinds the registration
/// before the error is returned.
pub fn install(cfg: DevConfig) -> Result<RamDev, DevError> {
    let name = cfg.name.clone();
    registry::DeviceRegistry::register_device(&name, cfg.capacity)?;
    match RamDev::new(cfg) {
        Ok(dev) => {
            info!("ramdev {} installed", dev.name());
            Ok(dev)
        }
        Err(err) => {
            let _ = registry::DeviceRegistry::unregister_device(&name);
            Err(err)
        }
    }
}

/// Tear the device down and drop its registry entry.
///
/// Safe to call more than once; teardown is idempotent and a missing
/// registry entry is not an error.
pub fn uninstall(dev: &RamDev) {
    dev.teardown();
    let _ = registry::DeviceRegistry::unregister_device(dev.name());
    info!("ramdev {} uninstalled", dev.name());
}
