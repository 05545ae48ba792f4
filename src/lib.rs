//! linkmend: referential-integrity maintenance for content-item graphs
//!
//! Given a target item in a hierarchical content repository, linkmend
//! reports which items reference it and lets an operator repoint
//! ("relink") or delete ("unlink") those references across every
//! language/version variant of the referring items, keeping a reverse
//! link index consistent with each mutation.
//!
//! The workspace layers, leaves first:
//! - [`codec`]: field-type-specific reference encodings
//! - [`index`]: the reverse link index (target -> incoming [`ItemLink`]s)
//! - [`engine`]: the repair engine and the reference report builder
//! - [`store`]: the in-memory reference implementation of the content
//!   store seam defined in `linkmend-core`
//!
//! # Example
//!
//! ```
//! use linkmend::{
//!     CodecRegistry, DatabaseName, FieldId, ItemId, ItemLink, ItemPath, ItemRef, Language,
//!     LinkIndex, MemoryDatabase, MemoryStore, RepairEngine, StoredField, VersionKey,
//!     VersionNumber,
//! };
//!
//! let database = MemoryDatabase::new(DatabaseName::new("master"));
//! let (source, target, field) = (ItemId::new(), ItemId::new(), FieldId::new());
//! let version = VersionKey::new(Language::new("en"), VersionNumber::new(1));
//! database.insert_item(target, "Target", "/content/target");
//! database.insert_item(source, "Source", "/content/source");
//! database.set_field(source, &version, field, StoredField::new(target.to_string(), "droplink"));
//!
//! let mut store = MemoryStore::new();
//! store.add_database(database);
//!
//! let index = LinkIndex::new();
//! let link = ItemLink {
//!     source_database: DatabaseName::new("master"),
//!     source_item: source,
//!     source_language: Language::new("en"),
//!     source_version: VersionNumber::new(1),
//!     source_field: Some(field),
//!     target_database: DatabaseName::new("master"),
//!     target_item: target,
//!     target_language: None,
//!     target_version: None,
//!     target_path: ItemPath::new("/content/target"),
//! };
//! index.insert(link.clone());
//!
//! let codecs = CodecRegistry::with_defaults();
//! let engine = RepairEngine::new(&store, &index, &codecs);
//! engine.remove(&link).unwrap();
//!
//! assert!(index.references_to(&ItemRef::new(DatabaseName::new("master"), target)).is_empty());
//! ```

pub use linkmend_codec as codec;
pub use linkmend_engine as engine;
pub use linkmend_index as index;
pub use linkmend_store as store;

pub use linkmend_codec::{CodecRegistry, DecodedRef, FieldCodec};
pub use linkmend_core::{
    clone_fields, ContentDatabase, ContentStore, DatabaseName, EditScope, Error, FieldId,
    FieldSnapshot, ItemId, ItemLink, ItemPath, ItemRef, ItemSummary, Language, RelinkTarget,
    Result, TemplateField, VersionEdit, VersionKey, VersionNumber,
};
pub use linkmend_engine::{
    FieldLabel, RecordToken, RepairEngine, RepairOutcome, ReportBuilder, ReportOptions,
    ReportRecord,
};
pub use linkmend_index::LinkIndex;
pub use linkmend_store::{MemoryDatabase, MemoryStore, StoredField};
