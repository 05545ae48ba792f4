//! In-memory content store for linkmend
//!
//! The content repository itself is an external collaborator; this crate
//! provides the reference in-memory implementation of the
//! [`linkmend_core::ContentStore`] contract that the repair engine and the
//! test suites run against.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;

pub use memory::{MemoryDatabase, MemoryStore, StoredField};
