//! Error types for link repair
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.
//!
//! Only a missing repair target is fatal to an operation; most other
//! variants are absorbed per version by the repair engine ("skip, not
//! error") to favor forward progress over all-or-nothing transactions.

use crate::types::{DatabaseName, ItemId, ItemRef, VersionKey};
use std::io;
use thiserror::Error;

/// Result type alias for link-repair operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the link-repair engine
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (index persistence)
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Named content database does not exist
    #[error("Database not found: {0}")]
    DatabaseNotFound(DatabaseName),

    /// The repair target does not resolve; fatal to the whole operation
    #[error("Target item not found: {0}")]
    TargetNotFound(ItemRef),

    /// An item other than the repair target does not resolve
    #[error("Item not found: {0}")]
    ItemNotFound(ItemRef),

    /// No codec is registered for the field's declared type
    #[error("No codec registered for field type {0:?}")]
    UnsupportedFieldType(String),

    /// The codec could not locate the expected encoded pointer
    #[error("Reference to {target} not found in field value")]
    ReferenceNotFound {
        /// The target the pointer was expected to reference
        target: ItemId,
    },

    /// The content store rejected the mutation
    #[error("Edit conflict on {item} version {version}")]
    EditConflict {
        /// Item being edited
        item: ItemRef,
        /// Version that could not be committed
        version: VersionKey,
    },

    /// A checked edit touched a protected item outside maintenance mode
    #[error("Access denied: {item} is protected")]
    AccessDenied {
        /// The protected item
        item: ItemRef,
    },

    /// The supplied reference descriptor cannot drive a repair
    #[error("Invalid reference descriptor: {0}")]
    InvalidDescriptor(String),
}

impl From<bincode::Error> for Error {
    fn from(e: bincode::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}
