//! Registry configuration
//!
//! Loaded from a JSON file when one exists; every field falls back to its
//! default, so a partial file is enough.

use crate::token::Address;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Label the default registry address is derived from
pub const DEFAULT_CONTRACT_LABEL: &str = "kitty-registry";
/// Label the default admin address is derived from
pub const DEFAULT_ADMIN_LABEL: &str = "kitty-admin";
/// Default cap on gen-0 mints
pub const DEFAULT_GEN0_LIMIT: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// The registry's own address; never a valid transfer target
    pub contract_address: Address,
    /// Account allowed to mint gen-0 kitties
    pub admin: Address,
    /// Maximum number of gen-0 kitties the admin may mint
    pub gen0_limit: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            contract_address: Address::derive(DEFAULT_CONTRACT_LABEL),
            admin: Address::derive(DEFAULT_ADMIN_LABEL),
            gen0_limit: DEFAULT_GEN0_LIMIT,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl RegistryConfig {
    /// Reject configurations the registry cannot operate under
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.contract_address.is_zero() {
            return Err(ConfigError::Invalid(
                "contract_address must not be the zero address".to_string(),
            ));
        }
        if self.admin.is_zero() {
            return Err(ConfigError::Invalid(
                "admin must not be the zero address".to_string(),
            ));
        }
        if self.admin == self.contract_address {
            return Err(ConfigError::Invalid(
                "admin must differ from contract_address".to_string(),
            ));
        }
        Ok(())
    }

    /// Load a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        info!("Loaded registry config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load a config file, or use defaults when it does not exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
