//! Codec for single-reference fields
//!
//! Droplink/droptree/reference fields store at most one item id as the
//! whole raw value, in braced GUID form.

use linkmend_core::{Error, ItemId, RelinkTarget, Result};

use crate::traits::{DecodedRef, FieldCodec};

/// Codec for fields whose raw value is one item id
///
/// Rewriting replaces the value with the new target's id; removing empties
/// the value.
#[derive(Debug, Default)]
pub struct ReferenceCodec;

impl ReferenceCodec {
    fn parse(raw: &str) -> Option<ItemId> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        ItemId::from_string(trimmed)
    }
}

impl FieldCodec for ReferenceCodec {
    fn decode_references(&self, raw: &str) -> Vec<DecodedRef> {
        match Self::parse(raw) {
            Some(item) => vec![DecodedRef { item, position: 0 }],
            None => Vec::new(),
        }
    }

    fn rewrite_reference(
        &self,
        raw: &str,
        old: &ItemId,
        new_target: &RelinkTarget,
    ) -> Result<String> {
        match Self::parse(raw) {
            Some(item) if item == *old => Ok(new_target.id.to_string()),
            _ => Err(Error::ReferenceNotFound { target: *old }),
        }
    }

    fn remove_reference(&self, raw: &str, old: &ItemId) -> Result<String> {
        match Self::parse(raw) {
            Some(item) if item == *old => Ok(String::new()),
            _ => Err(Error::ReferenceNotFound { target: *old }),
        }
    }
}
