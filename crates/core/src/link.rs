//! Reference records connecting a source field to a target item
//!
//! An [`ItemLink`] is the immutable value the link index stores and the
//! repair engine consumes: one concrete encoded reference from a specific
//! field of a specific item version to a target item.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{
    DatabaseName, FieldId, ItemId, ItemPath, ItemRef, Language, VersionKey, VersionNumber,
};

/// One concrete encoded reference from a source field/version to a target item
///
/// A multi-valued field yields one ItemLink per encoded target, so the index
/// may hold several links sharing the same (source item, version, field)
/// tuple. Derives full ordering so index snapshots sort deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemLink {
    /// Database of the referring item
    pub source_database: DatabaseName,
    /// Id of the referring item
    pub source_item: ItemId,
    /// Language of the referring version
    pub source_language: Language,
    /// Version number of the referring version
    pub source_version: VersionNumber,
    /// Referencing field; `None` for item-level references (the reference
    /// comes from the item's template assignment, not a field value)
    pub source_field: Option<FieldId>,
    /// Database of the referenced item
    pub target_database: DatabaseName,
    /// Id of the referenced item
    pub target_item: ItemId,
    /// Target language; `None` means language-invariant
    pub target_language: Option<Language>,
    /// Target version; `None` means latest
    pub target_version: Option<VersionNumber>,
    /// Content path of the referenced item at indexing time
    pub target_path: ItemPath,
}

impl ItemLink {
    /// Fully qualified reference to the referring item
    pub fn source_ref(&self) -> ItemRef {
        ItemRef::new(self.source_database.clone(), self.source_item)
    }

    /// Fully qualified reference to the referenced item
    pub fn target_ref(&self) -> ItemRef {
        ItemRef::new(self.target_database.clone(), self.target_item)
    }

    /// The source version key of this link
    pub fn source_version_key(&self) -> VersionKey {
        VersionKey::new(self.source_language.clone(), self.source_version)
    }

    /// Copy of this link rebound to another source version
    ///
    /// Used by the repair engine: each processed version yields its own
    /// index entry with the same logical source tuple but distinct version
    /// identity.
    pub fn with_source_version(&self, version: &VersionKey) -> ItemLink {
        ItemLink {
            source_language: version.language.clone(),
            source_version: version.number,
            ..self.clone()
        }
    }

    /// Copy of this link repointed at a new target
    ///
    /// Target language/version reset to invariant/latest; the encoded value
    /// after a relink carries no version pinning.
    pub fn retargeted(&self, new_target: &RelinkTarget) -> ItemLink {
        ItemLink {
            target_database: new_target.database.clone(),
            target_item: new_target.id,
            target_language: None,
            target_version: None,
            target_path: new_target.path.clone(),
            ..self.clone()
        }
    }
}

impl fmt::Display for ItemLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} -> {}",
            self.source_ref(),
            self.source_version_key(),
            self.target_ref()
        )
    }
}

/// The operator-picked item a reference should be repointed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelinkTarget {
    /// Database of the new target
    pub database: DatabaseName,
    /// Id of the new target
    pub id: ItemId,
    /// Content path of the new target (written into path-bearing encodings)
    pub path: ItemPath,
}

impl RelinkTarget {
    /// Create a relink target
    pub fn new(database: DatabaseName, id: ItemId, path: ItemPath) -> Self {
        Self { database, id, path }
    }

    /// Fully qualified reference to the new target
    pub fn item_ref(&self) -> ItemRef {
        ItemRef::new(self.database.clone(), self.id)
    }
}

/// Well-known field ids marking a structural clone relationship
///
/// Links from these fields describe where an item was cloned from, not a
/// content reference, and can be filtered out of reports on request.
pub mod clone_fields {
    use crate::types::FieldId;

    /// The "__Source" field: clone source by path
    pub const SOURCE: FieldId = FieldId::from_u128(0x1B86697D60CA4D8083FB7555A2E6CE1C);

    /// The "__Source Item" field: clone source by id
    pub const SOURCE_ITEM: FieldId = FieldId::from_u128(0x19B597D3F7EB4D12AABAD13C4B962F21);

    /// Whether the given field carries the clone relationship
    pub fn is_clone_field(field: &FieldId) -> bool {
        *field == SOURCE || *field == SOURCE_ITEM
    }
}
