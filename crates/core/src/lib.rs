//! Core types and traits for linkmend
//!
//! This crate defines the foundational types used throughout the system:
//! - Identifiers: ItemId, FieldId, DatabaseName, Language, VersionNumber
//! - ItemLink: one encoded reference from a source field/version to a target
//! - Error: the error taxonomy (only TargetNotFound is fatal to a repair)
//! - Traits: the ContentStore seam the repair engine runs against

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod link;
pub mod traits;
pub mod types;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use link::{clone_fields, ItemLink, RelinkTarget};
pub use traits::{ContentDatabase, ContentStore, EditScope, FieldSnapshot, ItemSummary, VersionEdit};
pub use types::{
    DatabaseName, FieldId, ItemId, ItemPath, ItemRef, Language, TemplateField, VersionKey,
    VersionNumber,
};
