//! Field codec trait
//!
//! A codec understands one family of raw field encodings: it can extract
//! the item references a value embeds and rewrite or strip one of them
//! while preserving the rest of the value's structure.

use linkmend_core::{ItemId, RelinkTarget, Result};

/// One reference extracted from a raw field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedRef {
    /// The referenced item
    pub item: ItemId,
    /// Zero-based element slot in the value's encoding; slots held by
    /// unparseable elements still count
    pub position: usize,
}

/// Type-specific logic to decode and mutate references in a raw field value
///
/// Implementations must be pure with respect to the raw value: rewriting or
/// removing one reference preserves every other reference and the value's
/// surrounding structure byte for byte.
pub trait FieldCodec: Send + Sync {
    /// All item references the value encodes, in encoding order
    ///
    /// An unparseable or empty value decodes to no references.
    fn decode_references(&self, raw: &str) -> Vec<DecodedRef>;

    /// Repoint the first encoded reference to `old` at `new_target`
    ///
    /// # Errors
    ///
    /// Returns `ReferenceNotFound` if the value does not encode a reference
    /// to `old`.
    fn rewrite_reference(&self, raw: &str, old: &ItemId, new_target: &RelinkTarget)
        -> Result<String>;

    /// Strip the first encoded reference to `old`
    ///
    /// # Errors
    ///
    /// Returns `ReferenceNotFound` if the value does not encode a reference
    /// to `old`.
    fn remove_reference(&self, raw: &str, old: &ItemId) -> Result<String>;
}
