//! Codec for XML general-link fields
//!
//! General link fields store one XML element describing the link, e.g.
//! `<link text="Read more" linktype="internal" url="/content/home/page"
//! id="{GUID}" />`. Only internal links carry an `id` attribute; external
//! links decode to no references.

use once_cell::sync::Lazy;
use regex::Regex;

use linkmend_core::{Error, ItemId, RelinkTarget, Result};

use crate::traits::{DecodedRef, FieldCodec};

static ID_ATTR: Lazy<Regex> = Lazy::new(|| Regex::new(r#"id="([^"]*)""#).unwrap());
static URL_ATTR: Lazy<Regex> = Lazy::new(|| Regex::new(r#"url="([^"]*)""#).unwrap());

/// Codec for XML `<link>` values
///
/// Rewriting splices new `id` and `url` attribute values into the existing
/// markup, leaving every other attribute untouched. Removing clears the
/// whole value: a general link without its pointer is no link at all.
#[derive(Debug, Default)]
pub struct GeneralLinkCodec;

impl GeneralLinkCodec {
    /// Byte range of the first `id` attribute value that parses to `old`
    fn find_id_value(raw: &str, old: &ItemId) -> Option<(usize, usize)> {
        ID_ATTR.captures_iter(raw).find_map(|captures| {
            let value = captures.get(1)?;
            if ItemId::from_string(value.as_str()) == Some(*old) {
                Some((value.start(), value.end()))
            } else {
                None
            }
        })
    }

    /// Replace the first `url` attribute value, if one exists
    fn splice_url(raw: &str, path: &str) -> String {
        match URL_ATTR.captures(raw).and_then(|c| c.get(1)) {
            Some(value) => {
                let mut spliced = String::with_capacity(raw.len());
                spliced.push_str(&raw[..value.start()]);
                spliced.push_str(path);
                spliced.push_str(&raw[value.end()..]);
                spliced
            }
            None => raw.to_string(),
        }
    }
}

impl FieldCodec for GeneralLinkCodec {
    fn decode_references(&self, raw: &str) -> Vec<DecodedRef> {
        ID_ATTR
            .captures_iter(raw)
            .filter_map(|captures| ItemId::from_string(captures.get(1)?.as_str()))
            .enumerate()
            .map(|(position, item)| DecodedRef { item, position })
            .collect()
    }

    fn rewrite_reference(
        &self,
        raw: &str,
        old: &ItemId,
        new_target: &RelinkTarget,
    ) -> Result<String> {
        let (start, end) =
            Self::find_id_value(raw, old).ok_or(Error::ReferenceNotFound { target: *old })?;

        let mut spliced = String::with_capacity(raw.len());
        spliced.push_str(&raw[..start]);
        spliced.push_str(&new_target.id.to_string());
        spliced.push_str(&raw[end..]);

        Ok(Self::splice_url(&spliced, new_target.path.as_str()))
    }

    fn remove_reference(&self, raw: &str, old: &ItemId) -> Result<String> {
        if Self::find_id_value(raw, old).is_none() {
            return Err(Error::ReferenceNotFound { target: *old });
        }
        Ok(String::new())
    }
}
