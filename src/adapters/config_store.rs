//! Configuration storage adapter.
//!
//! Persists [`MonitorConfig`] as a postcard blob through a
//! [`StoragePort`].  Validation runs on both directions: a corrupted or
//! out-of-range stored blob falls back to defaults rather than feeding
//! the policy bad thresholds.
//!
//! The stock build wires [`MemoryStorage`] (session-only — readings and
//! settings are not required to survive power loss); an NVS-backed
//! `StoragePort` slots in without touching this adapter.

use log::warn;

use crate::app::ports::{ConfigError, ConfigPort, StoragePort, StorageError};
use crate::config::MonitorConfig;

const CONFIG_KEY: &str = "monitor.cfg";
/// Upper bound on the serialized config blob.
const CONFIG_BLOB_MAX: usize = 256;

/// [`ConfigPort`] over any [`StoragePort`].
pub struct StoredConfig<S> {
    storage: S,
}

impl<S: StoragePort> StoredConfig<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Load the stored config, or defaults when absent/unusable.
    pub fn load_or_default(&self) -> MonitorConfig {
        match self.load() {
            Ok(cfg) => cfg,
            Err(ConfigError::NotFound) => MonitorConfig::default(),
            Err(e) => {
                warn!("stored config unusable ({e}), using defaults");
                MonitorConfig::default()
            }
        }
    }
}

impl<S: StoragePort> ConfigPort for StoredConfig<S> {
    fn load(&self) -> Result<MonitorConfig, ConfigError> {
        let mut buf = [0u8; CONFIG_BLOB_MAX];
        let n = match self.storage.read(CONFIG_KEY, &mut buf) {
            Ok(n) => n,
            Err(StorageError::NotFound) => return Err(ConfigError::NotFound),
            Err(_) => return Err(ConfigError::IoError),
        };

        let config: MonitorConfig =
            postcard::from_bytes(&buf[..n]).map_err(|_| ConfigError::Corrupted)?;
        config.validate().map_err(ConfigError::ValidationFailed)?;
        Ok(config)
    }

    fn save(&mut self, config: &MonitorConfig) -> Result<(), ConfigError> {
        config.validate().map_err(ConfigError::ValidationFailed)?;
        let blob = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;
        match self.storage.write(CONFIG_KEY, &blob) {
            Ok(()) => Ok(()),
            Err(StorageError::Full) => Err(ConfigError::IoError),
            Err(_) => Err(ConfigError::IoError),
        }
    }
}

/// In-memory [`StoragePort`].  Atomic trivially; contents last for the
/// session only.
pub struct MemoryStorage {
    entries: std::collections::HashMap<std::string::String, std::vec::Vec<u8>>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            entries: std::collections::HashMap::new(),
        }
    }
}

impl StoragePort for MemoryStorage {
    fn read(&self, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        match self.entries.get(key) {
            Some(v) => {
                if v.len() > buf.len() {
                    return Err(StorageError::IoError);
                }
                buf[..v.len()].copy_from_slice(v);
                Ok(v.len())
            }
            None => Err(StorageError::NotFound),
        }
    }

    fn write(&mut self, key: &str, data: &[u8]) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), data.to_vec());
        Ok(())
    }

    fn exists(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}
