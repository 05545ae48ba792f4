//! Codec registry: field type name -> codec
//!
//! The registry routes a field's declared type to the codec that understands
//! its encoding. Unregistered types are not an error: a field without a
//! codec legitimately cannot carry structured references and the repair
//! engine skips it.

use std::collections::HashMap;
use std::sync::Arc;

use crate::link::GeneralLinkCodec;
use crate::list::ListCodec;
use crate::reference::ReferenceCodec;
use crate::traits::FieldCodec;

/// Registry of field codecs keyed by declared field type name
///
/// Lookups are case-insensitive; the repository treats "General Link" and
/// "general link" as the same type.
pub struct CodecRegistry {
    codecs: HashMap<String, Arc<dyn FieldCodec>>,
}

impl CodecRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            codecs: HashMap::new(),
        }
    }

    /// Create a registry with all built-in codecs registered
    ///
    /// Covers the reference-bearing field families of the content
    /// repository: single-id pickers, id lists, and XML general links.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        let reference: Arc<dyn FieldCodec> = Arc::new(ReferenceCodec);
        for type_name in ["reference", "droplink", "droptree", "grouped droplink"] {
            registry.register(type_name, Arc::clone(&reference));
        }

        let list: Arc<dyn FieldCodec> = Arc::new(ListCodec);
        for type_name in ["multilist", "treelist", "treelist ex", "checklist"] {
            registry.register(type_name, Arc::clone(&list));
        }

        let link: Arc<dyn FieldCodec> = Arc::new(GeneralLinkCodec);
        for type_name in ["general link", "link"] {
            registry.register(type_name, Arc::clone(&link));
        }

        registry
    }

    /// Register a codec for a field type name
    ///
    /// Replaces any codec previously registered for the same type.
    pub fn register(&mut self, type_name: &str, codec: Arc<dyn FieldCodec>) {
        self.codecs.insert(type_name.to_lowercase(), codec);
    }

    /// Resolve the codec for a field type name
    ///
    /// Returns None for unregistered types (non-relinkable fields).
    pub fn resolve(&self, type_name: &str) -> Option<&dyn FieldCodec> {
        self.codecs.get(&type_name.to_lowercase()).map(Arc::as_ref)
    }

    /// Number of registered type names
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    /// Whether no codecs are registered
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkmend_core::{ItemId, Result};
    use linkmend_core::RelinkTarget;

    struct NullCodec;

    impl FieldCodec for NullCodec {
        fn decode_references(&self, _raw: &str) -> Vec<crate::traits::DecodedRef> {
            Vec::new()
        }

        fn rewrite_reference(
            &self,
            raw: &str,
            _old: &ItemId,
            _new_target: &RelinkTarget,
        ) -> Result<String> {
            Ok(raw.to_string())
        }

        fn remove_reference(&self, raw: &str, _old: &ItemId) -> Result<String> {
            Ok(raw.to_string())
        }
    }

    #[test]
    fn test_defaults_cover_reference_bearing_types() {
        let registry = CodecRegistry::with_defaults();
        for type_name in [
            "reference",
            "droplink",
            "droptree",
            "multilist",
            "treelist",
            "checklist",
            "general link",
        ] {
            assert!(registry.resolve(type_name).is_some(), "missing {type_name}");
        }
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let registry = CodecRegistry::with_defaults();
        assert!(registry.resolve("Multilist").is_some());
        assert!(registry.resolve("GENERAL LINK").is_some());
    }

    #[test]
    fn test_unknown_type_resolves_to_none() {
        let registry = CodecRegistry::with_defaults();
        assert!(registry.resolve("rich text").is_none());
        assert!(registry.resolve("single-line text").is_none());
    }

    #[test]
    fn test_register_custom_codec() {
        let mut registry = CodecRegistry::new();
        assert!(registry.is_empty());

        registry.register("My Type", Arc::new(NullCodec));
        assert_eq!(registry.len(), 1);
        assert!(registry.resolve("my type").is_some());
    }
}
