//! Codec for multi-reference list fields
//!
//! Multilist/treelist/checklist fields store a pipe-separated sequence of
//! item ids, e.g. `{A...}|{B...}|{C...}`. Element order is significant and
//! must survive rewrites.

use linkmend_core::{Error, ItemId, RelinkTarget, Result};

use crate::traits::{DecodedRef, FieldCodec};

/// Codec for pipe-separated item-id lists
///
/// Rewriting replaces the first matching element in place; removing deletes
/// it and rejoins the remainder. Unparseable elements are preserved
/// verbatim but never decoded.
#[derive(Debug, Default)]
pub struct ListCodec;

const SEPARATOR: char = '|';

impl FieldCodec for ListCodec {
    fn decode_references(&self, raw: &str) -> Vec<DecodedRef> {
        // Positions number raw element slots, so an unparseable element
        // still occupies its slot.
        raw.split(SEPARATOR)
            .enumerate()
            .filter_map(|(position, element)| {
                ItemId::from_string(element).map(|item| DecodedRef { item, position })
            })
            .collect()
    }

    fn rewrite_reference(
        &self,
        raw: &str,
        old: &ItemId,
        new_target: &RelinkTarget,
    ) -> Result<String> {
        let mut elements: Vec<String> = raw.split(SEPARATOR).map(str::to_string).collect();
        let slot = elements
            .iter()
            .position(|e| ItemId::from_string(e) == Some(*old))
            .ok_or(Error::ReferenceNotFound { target: *old })?;

        elements[slot] = new_target.id.to_string();
        Ok(elements.join(&SEPARATOR.to_string()))
    }

    fn remove_reference(&self, raw: &str, old: &ItemId) -> Result<String> {
        let mut elements: Vec<String> = raw.split(SEPARATOR).map(str::to_string).collect();
        let slot = elements
            .iter()
            .position(|e| ItemId::from_string(e) == Some(*old))
            .ok_or(Error::ReferenceNotFound { target: *old })?;

        elements.remove(slot);
        Ok(elements.join(&SEPARATOR.to_string()))
    }
}
