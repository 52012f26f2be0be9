//! Registry persistence
//!
//! The whole registry is written as one JSON document together with a
//! SHA256 checksum of its contents. Loading verifies the checksum and the
//! registry invariants before handing the state back.

use crate::config::RegistryConfig;
use crate::registry::KittyRegistry;
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

/// Current on-disk format version
pub const STORE_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported store version {0}")]
    UnsupportedVersion(u32),

    #[error("Checksum mismatch: expected {expected}, computed {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Stored registry violates invariants: {}", .0.join("; "))]
    Corrupt(Vec<String>),
}

/// On-disk envelope
#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    checksum: String,
    saved_at: DateTime<Utc>,
    /// Kept as a JSON value so the checksum is computed over sorted keys
    registry: serde_json::Value,
}

/// Metadata about a saved registry
#[derive(Debug, Clone)]
pub struct StoreInfo {
    pub checksum: String,
    pub saved_at: DateTime<Utc>,
    pub size_bytes: u64,
}

pub struct RegistryStore;

impl RegistryStore {
    /// Write `registry` to `path`
    pub fn save(path: impl AsRef<Path>, registry: &KittyRegistry) -> Result<StoreInfo, StoreError> {
        let path = path.as_ref();
        let value = serde_json::to_value(registry)?;
        let checksum = Self::checksum(&value)?;
        let file = StoreFile {
            version: STORE_VERSION,
            checksum: checksum.clone(),
            saved_at: Utc::now(),
            registry: value,
        };
        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(path, &json)?;
        info!(
            "Saved registry to {} ({} kitties, {} bytes)",
            path.display(),
            registry.total_supply(),
            json.len()
        );
        Ok(StoreInfo {
            checksum,
            saved_at: file.saved_at,
            size_bytes: json.len() as u64,
        })
    }

    /// Read and verify a registry from `path`
    pub fn load(path: impl AsRef<Path>) -> Result<KittyRegistry, StoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let file: StoreFile = serde_json::from_str(&json)?;
        if file.version != STORE_VERSION {
            return Err(StoreError::UnsupportedVersion(file.version));
        }

        let actual = Self::checksum(&file.registry)?;
        if actual != file.checksum {
            warn!("Checksum mismatch for {}", path.display());
            return Err(StoreError::ChecksumMismatch {
                expected: file.checksum,
                actual,
            });
        }

        let registry: KittyRegistry = serde_json::from_value(file.registry)?;
        let violations = registry.check_invariants();
        if !violations.is_empty() {
            return Err(StoreError::Corrupt(violations));
        }
        info!(
            "Loaded registry from {} ({} kitties, saved {})",
            path.display(),
            registry.total_supply(),
            file.saved_at.to_rfc3339()
        );
        Ok(registry)
    }

    /// Load `path` under `config`, or start a fresh registry when the file
    /// does not exist
    pub fn load_or_new(
        path: impl AsRef<Path>,
        config: RegistryConfig,
    ) -> Result<KittyRegistry, StoreError> {
        if path.as_ref().exists() {
            let mut registry = Self::load(&path)?;
            if registry.config() != &config {
                warn!(
                    "Config differs from the one stored in {}, applying the supplied config",
                    path.as_ref().display()
                );
                registry
                    .reconfigure(config)
                    .map_err(|e| StoreError::Corrupt(vec![e.to_string()]))?;
            }
            Ok(registry)
        } else {
            info!("No store at {}, starting fresh", path.as_ref().display());
            Ok(KittyRegistry::new(config))
        }
    }

    fn checksum(value: &serde_json::Value) -> Result<String, StoreError> {
        let compact = serde_json::to_string(value)?;
        Ok(hex::encode(Sha256::digest(compact.as_bytes())))
    }
}
