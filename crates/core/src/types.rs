//! Core identifier types for the content-item graph
//!
//! This module defines the foundational types:
//! - ItemId / FieldId: GUID identities of items and template fields
//! - DatabaseName: named content database ("master", "web", ...)
//! - Language / VersionNumber: the two axes of item versioning
//! - ItemRef: fully qualified (database, item) reference
//! - VersionKey: one concrete language variant/version of an item

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a content item
///
/// Wraps a UUID v4. Items are addressed by (database, ItemId); the id alone
/// is only unique within one database.
///
/// Renders in the braced-uppercase GUID form the content repository uses,
/// e.g. `{8A9C2E77-...}`. Parsing accepts that form or a bare UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Create a new random ItemId using UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an ItemId from an existing UUID
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse an ItemId from a string representation
    ///
    /// Accepts braced (`{...}`) or bare UUID format, any case.
    /// Returns None if the string is not a valid GUID.
    pub fn from_string(s: &str) -> Option<Self> {
        let trimmed = s.trim().trim_start_matches('{').trim_end_matches('}');
        Uuid::parse_str(trimmed).ok().map(Self)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = Uuid::encode_buffer();
        write!(f, "{{{}}}", self.0.as_hyphenated().encode_upper(&mut buf))
    }
}

/// Unique identifier for a template field
///
/// Same GUID conventions as [`ItemId`]. Field ids are shared across all
/// items built from the same template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldId(Uuid);

impl FieldId {
    /// Create a new random FieldId using UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a FieldId from a compile-time constant
    ///
    /// Used for the well-known field ids in [`crate::link::clone_fields`].
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    /// Parse a FieldId from a string representation
    ///
    /// Accepts braced (`{...}`) or bare UUID format, any case.
    pub fn from_string(s: &str) -> Option<Self> {
        let trimmed = s.trim().trim_start_matches('{').trim_end_matches('}');
        Uuid::parse_str(trimmed).ok().map(Self)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for FieldId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = Uuid::encode_buffer();
        write!(f, "{{{}}}", self.0.as_hyphenated().encode_upper(&mut buf))
    }
}

/// Name of a content database ("master", "web", "core", ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DatabaseName(String);

impl DatabaseName {
    /// Create a database name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatabaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Language of an item version ("en", "de-DE", ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Language(String);

impl Language {
    /// Create a language from its culture name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the culture name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One-based version number within a language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VersionNumber(u32);

impl VersionNumber {
    /// Create a version number
    pub const fn new(number: u32) -> Self {
        Self(number)
    }

    /// Get the numeric value
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content path of an item ("/content/home/...")
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemPath(String);

impl ItemPath {
    /// Create an item path
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Borrow the path as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fully qualified item reference: (database, item id)
///
/// The unit the link index is keyed by. Two items with the same id in
/// different databases are distinct targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemRef {
    /// Database the item lives in
    pub database: DatabaseName,
    /// Item id within that database
    pub id: ItemId,
}

impl ItemRef {
    /// Create an item reference
    pub fn new(database: DatabaseName, id: ItemId) -> Self {
        Self { database, id }
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.database, self.id)
    }
}

/// One concrete language variant/version of an item
///
/// Ordering is language first, then version number, which fixes the
/// enumeration order of `ContentDatabase::versions` and makes per-version
/// processing deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VersionKey {
    /// Language of the variant
    pub language: Language,
    /// Version number within that language
    pub number: VersionNumber,
}

impl VersionKey {
    /// Create a version key
    pub fn new(language: Language, number: VersionNumber) -> Self {
        Self { language, number }
    }
}

impl fmt::Display for VersionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.language, self.number)
    }
}

/// Template-level definition of a field
///
/// Present when the field on an item maps back to a field its template
/// defines; absent for orphaned raw values ("unknown field" in reports).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateField {
    /// Human-readable field name shown in reports
    pub display_name: String,
}

impl TemplateField {
    /// Create a template field definition
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
        }
    }
}
