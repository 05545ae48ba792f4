//! In-memory content store
//!
//! A `HashMap`-backed implementation of the [`ContentStore`] contract.
//! Versions live in a `BTreeMap` so enumeration order is deterministic
//! (language, then version number). Edits stage changes on a session and
//! apply them under the write lock at commit, detecting versions that
//! vanished in between.

use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;

use linkmend_core::{
    ContentDatabase, ContentStore, DatabaseName, EditScope, Error, FieldId, FieldSnapshot, ItemId,
    ItemPath, ItemRef, ItemSummary, Result, TemplateField, VersionEdit, VersionKey,
};

/// One stored field value with its declared type
#[derive(Debug, Clone)]
pub struct StoredField {
    /// Raw encoded value
    pub raw: String,
    /// Declared field type name, drives codec resolution
    pub type_name: String,
    /// Template definition; `None` models an orphaned "unknown" field
    pub template_field: Option<TemplateField>,
}

impl StoredField {
    /// Create a field value with no template definition
    pub fn new(raw: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            type_name: type_name.into(),
            template_field: None,
        }
    }

    /// Attach a template field definition (display name)
    pub fn with_template(mut self, display_name: impl Into<String>) -> Self {
        self.template_field = Some(TemplateField::new(display_name));
        self
    }
}

#[derive(Debug, Clone)]
struct ItemRecord {
    display_name: String,
    path: ItemPath,
    children: Vec<ItemId>,
    protected: bool,
    versions: BTreeMap<VersionKey, HashMap<FieldId, StoredField>>,
}

/// One named in-memory content database
#[derive(Debug)]
pub struct MemoryDatabase {
    name: DatabaseName,
    items: RwLock<HashMap<ItemId, ItemRecord>>,
}

impl MemoryDatabase {
    /// Create an empty database
    pub fn new(name: DatabaseName) -> Self {
        Self {
            name,
            items: RwLock::new(HashMap::new()),
        }
    }

    /// Insert an item with no versions yet
    ///
    /// Replaces any existing item with the same id.
    pub fn insert_item(
        &self,
        id: ItemId,
        display_name: impl Into<String>,
        path: impl Into<String>,
    ) {
        self.items.write().insert(
            id,
            ItemRecord {
                display_name: display_name.into(),
                path: ItemPath::new(path),
                children: Vec::new(),
                protected: false,
                versions: BTreeMap::new(),
            },
        );
    }

    /// Set an item's children, in tree order
    pub fn set_children(&self, id: ItemId, children: Vec<ItemId>) {
        if let Some(record) = self.items.write().get_mut(&id) {
            record.children = children;
        }
    }

    /// Mark an item protected: checked edits fail with `AccessDenied`
    pub fn set_protected(&self, id: ItemId, protected: bool) {
        if let Some(record) = self.items.write().get_mut(&id) {
            record.protected = protected;
        }
    }

    /// Add an empty version to an item
    pub fn add_version(&self, id: ItemId, version: VersionKey) {
        if let Some(record) = self.items.write().get_mut(&id) {
            record.versions.entry(version).or_default();
        }
    }

    /// Set a field on a version, creating the version if needed
    pub fn set_field(&self, id: ItemId, version: &VersionKey, field: FieldId, value: StoredField) {
        if let Some(record) = self.items.write().get_mut(&id) {
            record
                .versions
                .entry(version.clone())
                .or_default()
                .insert(field, value);
        }
    }

    /// Delete an item outright (simulates a stale index entry)
    pub fn remove_item(&self, id: &ItemId) {
        self.items.write().remove(id);
    }

    /// Delete one version of an item
    pub fn remove_version(&self, id: &ItemId, version: &VersionKey) {
        if let Some(record) = self.items.write().get_mut(id) {
            record.versions.remove(version);
        }
    }

    fn item_ref(&self, id: ItemId) -> ItemRef {
        ItemRef::new(self.name.clone(), id)
    }
}

impl ContentDatabase for MemoryDatabase {
    fn name(&self) -> &DatabaseName {
        &self.name
    }

    fn item(&self, id: &ItemId) -> Option<ItemSummary> {
        let items = self.items.read();
        items.get(id).map(|record| ItemSummary {
            id: *id,
            display_name: record.display_name.clone(),
            path: record.path.clone(),
            children: record.children.clone(),
        })
    }

    fn versions(&self, id: &ItemId) -> Vec<VersionKey> {
        let items = self.items.read();
        items
            .get(id)
            .map(|record| record.versions.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn field(&self, id: &ItemId, version: &VersionKey, field: &FieldId) -> Option<FieldSnapshot> {
        let items = self.items.read();
        let stored = items.get(id)?.versions.get(version)?.get(field)?;
        Some(FieldSnapshot {
            raw: stored.raw.clone(),
            type_name: stored.type_name.clone(),
            template_field: stored.template_field.clone(),
        })
    }

    fn edit<'a>(
        &'a self,
        id: &ItemId,
        version: &VersionKey,
        scope: EditScope,
    ) -> Result<Box<dyn VersionEdit + 'a>> {
        let items = self.items.read();
        let record = items
            .get(id)
            .ok_or_else(|| Error::ItemNotFound(self.item_ref(*id)))?;

        if record.protected && scope == EditScope::Checked {
            return Err(Error::AccessDenied {
                item: self.item_ref(*id),
            });
        }

        let fields = record
            .versions
            .get(version)
            .ok_or_else(|| Error::EditConflict {
                item: self.item_ref(*id),
                version: version.clone(),
            })?;

        let snapshot = fields
            .iter()
            .map(|(field_id, stored)| (*field_id, stored.raw.clone()))
            .collect();

        Ok(Box::new(MemoryEdit {
            items: &self.items,
            database: self.name.clone(),
            item: *id,
            version: version.clone(),
            snapshot,
            staged: HashMap::new(),
        }))
    }
}

/// Staged edit session against one version in a [`MemoryDatabase`]
struct MemoryEdit<'a> {
    items: &'a RwLock<HashMap<ItemId, ItemRecord>>,
    database: DatabaseName,
    item: ItemId,
    version: VersionKey,
    snapshot: HashMap<FieldId, String>,
    staged: HashMap<FieldId, String>,
}

impl MemoryEdit<'_> {
    fn conflict(&self) -> Error {
        Error::EditConflict {
            item: ItemRef::new(self.database.clone(), self.item),
            version: self.version.clone(),
        }
    }
}

impl VersionEdit for MemoryEdit<'_> {
    fn field_raw(&self, field: &FieldId) -> Option<String> {
        self.staged
            .get(field)
            .or_else(|| self.snapshot.get(field))
            .cloned()
    }

    fn set_field_raw(&mut self, field: &FieldId, raw: String) {
        self.staged.insert(*field, raw);
    }

    fn commit(self: Box<Self>) -> Result<()> {
        let mut items = self.items.write();
        let record = items.get_mut(&self.item).ok_or_else(|| self.conflict())?;
        let fields = record
            .versions
            .get_mut(&self.version)
            .ok_or_else(|| self.conflict())?;

        for (field_id, raw) in &self.staged {
            let stored = fields.get_mut(field_id).ok_or_else(|| self.conflict())?;
            stored.raw = raw.clone();
        }
        Ok(())
    }
}

/// In-memory content repository: a set of named databases
#[derive(Debug, Default)]
pub struct MemoryStore {
    databases: HashMap<DatabaseName, MemoryDatabase>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            databases: HashMap::new(),
        }
    }

    /// Add a database, replacing any database with the same name
    pub fn add_database(&mut self, database: MemoryDatabase) {
        self.databases.insert(database.name().clone(), database);
    }

    /// Concrete handle to a database, for test setup
    pub fn memory_database(&self, name: &DatabaseName) -> Option<&MemoryDatabase> {
        self.databases.get(name)
    }
}

impl ContentStore for MemoryStore {
    fn database(&self, name: &DatabaseName) -> Option<&dyn ContentDatabase> {
        self.databases
            .get(name)
            .map(|database| database as &dyn ContentDatabase)
    }
}
