//! Registry failure outcomes

use crate::token::{Address, KittyId};

/// Coarse classification of a registry failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Unauthorized,
    InvalidArgument,
    LimitReached,
}

/// Errors returned by registry operations. A failed operation never leaves
/// partial effects behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Kitty not found: {0}")]
    NotFound(KittyId),

    #[error("Unauthorized: {caller} does not own kitty {id}")]
    NotOwner { caller: Address, id: KittyId },

    #[error("Unauthorized: {caller} is not the registry admin")]
    NotAdmin { caller: Address },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Gen-0 limit of {limit} kitties reached")]
    LimitReached { limit: u64 },
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::NotFound(_) => ErrorKind::NotFound,
            RegistryError::NotOwner { .. } | RegistryError::NotAdmin { .. } => {
                ErrorKind::Unauthorized
            }
            RegistryError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            RegistryError::LimitReached { .. } => ErrorKind::LimitReached,
        }
    }
}
