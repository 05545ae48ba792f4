//! Content store abstraction
//!
//! These traits are the seam between the repair engine and the external
//! content repository. The engine never sees a concrete store; a real
//! repository backend and the in-memory test store both implement the same
//! contract, so upper layers can be exercised without the repository.
//!
//! Edits follow a scoped-acquisition pattern: `ContentDatabase::edit`
//! yields a [`VersionEdit`] session, changes are staged on it, and only
//! `commit` applies them. Dropping an uncommitted session discards its
//! changes, so a skipped version can never leak an open edit.

use crate::error::Result;
use crate::types::{DatabaseName, FieldId, ItemId, ItemPath, TemplateField, VersionKey};

/// Whether an edit runs with or without access checks
///
/// Maintenance mode is the bulk-repair context: checks that would block a
/// normal operator edit are bypassed. Modeled as an explicit per-edit flag
/// rather than a process-wide toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditScope {
    /// Normal edit; access checks apply
    Checked,
    /// Bulk-repair edit; access checks bypassed
    Maintenance,
}

/// Resolved identity of an item: display data plus child ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSummary {
    /// Item id
    pub id: ItemId,
    /// Human-readable name shown in reports
    pub display_name: String,
    /// Content path of the item
    pub path: ItemPath,
    /// Child item ids in stable tree order
    pub children: Vec<ItemId>,
}

/// Point-in-time view of one field on one item version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSnapshot {
    /// Raw stored value (reference encoding depends on `type_name`)
    pub raw: String,
    /// Declared semantic type of the field ("multilist", "general link", ...)
    pub type_name: String,
    /// Template definition, when the field maps back to one; `None` means
    /// the field is labeled "unknown field" in reports
    pub template_field: Option<TemplateField>,
}

/// Handle to the whole content repository
pub trait ContentStore: Send + Sync {
    /// Look up a database by name
    ///
    /// Returns None if no database with that name exists.
    fn database(&self, name: &DatabaseName) -> Option<&dyn ContentDatabase>;
}

/// One named content database
pub trait ContentDatabase: Send + Sync {
    /// Name of this database
    fn name(&self) -> &DatabaseName;

    /// Resolve an item's summary
    ///
    /// Returns None if the item does not exist.
    fn item(&self, id: &ItemId) -> Option<ItemSummary>;

    /// Enumerate all versions of an item across all languages
    ///
    /// Order is stable per item (language, then version number). Empty if
    /// the item does not exist.
    fn versions(&self, id: &ItemId) -> Vec<VersionKey>;

    /// Read one field of one version
    ///
    /// Returns None if the item, version, or field is absent.
    fn field(&self, id: &ItemId, version: &VersionKey, field: &FieldId) -> Option<FieldSnapshot>;

    /// Open one version for edit
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` if the item is gone, `EditConflict` if the
    /// version is gone, and `AccessDenied` for a `Checked` edit of a
    /// protected item.
    fn edit<'a>(
        &'a self,
        id: &ItemId,
        version: &VersionKey,
        scope: EditScope,
    ) -> Result<Box<dyn VersionEdit + 'a>>;
}

/// An open edit session on one item version
///
/// Changes are staged on the session and applied atomically by `commit`.
/// Dropping the session without committing discards all staged changes.
pub trait VersionEdit {
    /// Current raw value of a field, staged changes included
    fn field_raw(&self, field: &FieldId) -> Option<String>;

    /// Stage a new raw value for a field
    fn set_field_raw(&mut self, field: &FieldId, raw: String);

    /// Apply all staged changes
    ///
    /// # Errors
    ///
    /// Returns `EditConflict` if the item or version vanished after the
    /// session was opened.
    fn commit(self: Box<Self>) -> Result<()>;
}
