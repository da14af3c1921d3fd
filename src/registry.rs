// CLASSIFICATION: COMMUNITY
// Filename: registry.rs v0.3
// Author: Lukas Bower
// Date Modified: 2027-07-30

//! Process-wide device registry.
//!
//! The host environment registers a device node before the backing
//! store is allocated, the same way Cohesix services appear under
//! `/srv` before they are live. Lookups serve diagnostics and tests;
//! there is at most one device per name.

use std::collections::HashMap;
use std::sync::Mutex;

use log::info;
use once_cell::sync::Lazy;
use thiserror::Error;

/// Entry describing a registered device node.
#[derive(Clone, Debug)]
pub struct DeviceEntry {
    /// Node path the device is visible at.
    pub node: String,
    /// Capacity advertised at registration time.
    pub capacity: usize,
}

static REGISTRY: Lazy<Mutex<HashMap<String, DeviceEntry>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Errors returned by [`DeviceRegistry`] operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The registry mutex was poisoned by a panicking holder.
    #[error("device registry lock poisoned")]
    LockPoisoned,
    /// A device with the same name is already registered.
    #[error("device {0:?} already registered")]
    AlreadyRegistered(String),
}

type RegistryResult<T> = Result<T, RegistryError>;

/// Registry of installed devices.
pub struct DeviceRegistry;

impl DeviceRegistry {
    /// Register a device node for `name`.
    pub fn register_device(name: &str, capacity: usize) -> RegistryResult<()> {
        let mut map = REGISTRY.lock().map_err(|_| RegistryError::LockPoisoned)?;
        if map.contains_key(name) {
            return Err(RegistryError::AlreadyRegistered(name.into()));
        }
        let entry = DeviceEntry {
            node: format!("/dev/{name}"),
            capacity,
        };
        info!("device {:?} registered at {}", name, entry.node);
        map.insert(name.into(), entry);
        Ok(())
    }

    /// Remove a previously registered device.
    pub fn unregister_device(name: &str) -> RegistryResult<()> {
        REGISTRY
            .lock()
            .map_err(|_| RegistryError::LockPoisoned)?
            .remove(name);
        info!("device {:?} unregistered", name);
        Ok(())
    }

    /// Lookup the entry for `name`, if present.
    pub fn lookup(name: &str) -> RegistryResult<Option<DeviceEntry>> {
        Ok(REGISTRY
            .lock()
            .map_err(|_| RegistryError::LockPoisoned)?
            .get(name)
            .cloned())
    }

    /// Clear all registered devices. Only used in tests.
    pub fn reset() -> RegistryResult<()> {
        REGISTRY
            .lock()
            .map_err(|_| RegistryError::LockPoisoned)?
            .clear();
        Ok(())
    }

    /// Names of all registered devices.
    pub fn list_devices() -> RegistryResult<Vec<String>> {
        Ok(REGISTRY
            .lock()
            .map_err(|_| RegistryError::LockPoisoned)?
            .keys()
            .cloned()
            .collect())
    }
}

/// Guard that clears the registry around a test.
pub struct TestRegistryGuard;

impl TestRegistryGuard {
    /// Reset the registry now and again when dropped.
    pub fn new() -> Self {
        let _ = DeviceRegistry::reset();
        TestRegistryGuard
    }
}

impl Default for TestRegistryGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TestRegistryGuard {
    fn drop(&mut self) {
        let _ = DeviceRegistry::reset();
    }
}
