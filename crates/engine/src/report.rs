//! Reference report builder
//!
//! Walks a content subtree and produces, for each node, the references the
//! link index records against it: who refers to this item, from which
//! field. Records carry the full [`ItemLink`] descriptor needed to drive
//! the repair engine plus a short correlation token for round-tripping
//! operator actions.
//!
//! The walk is an explicit work stack (pre-order, depth-first, node before
//! descendants) rather than recursion, so report depth never couples to
//! call-stack depth. Each call computes a full pass from scratch.

use std::fmt;

use tracing::debug;
use uuid::Uuid;

use linkmend_core::{
    clone_fields, ContentDatabase, ContentStore, Error, FieldId, ItemLink, ItemPath, ItemRef,
    Result,
};
use linkmend_index::LinkIndex;

/// How the referencing field is presented in a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldLabel {
    /// The field maps to a template definition with this display name
    Named(String),
    /// The field id maps to no template field
    Unknown,
    /// The link carries no field id: item-level (template) reference
    ItemLevel,
}

impl fmt::Display for FieldLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldLabel::Named(name) => f.write_str(name),
            FieldLabel::Unknown => f.write_str("unknown field"),
            FieldLabel::ItemLevel => f.write_str("template"),
        }
    }
}

/// Short per-record correlation token
///
/// Identifies one rendered record so an operator action can be tied back
/// to it; regenerated on every report pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordToken(String);

impl RecordToken {
    /// Generate a fresh token
    pub fn new() -> Self {
        let id = Uuid::new_v4().simple().to_string();
        Self(format!("L{}", &id[..8]))
    }

    /// Borrow the token text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RecordToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the reference report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRecord {
    /// Display name of the referring item
    pub referrer_name: String,
    /// Content path of the referring item
    pub referrer_path: ItemPath,
    /// Label for the referencing field
    pub field_label: FieldLabel,
    /// Content path of the referenced item (the report node)
    pub target_path: ItemPath,
    /// Full descriptor to hand to the repair engine
    pub link: ItemLink,
    /// Correlation token for this rendered record
    pub token: RecordToken,
}

/// Report generation options
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Drop records whose field is a clone-source field
    pub ignore_clones: bool,
}

/// Builds reference reports over an injected store and index
pub struct ReportBuilder<'a> {
    store: &'a dyn ContentStore,
    index: &'a LinkIndex,
    options: ReportOptions,
}

impl<'a> ReportBuilder<'a> {
    /// Create a builder over the given collaborators
    pub fn new(store: &'a dyn ContentStore, index: &'a LinkIndex, options: ReportOptions) -> Self {
        Self {
            store,
            index,
            options,
        }
    }

    /// Build the ordered report for the subtrees rooted at `roots`
    ///
    /// Pre-order, depth-first: a node's records precede its descendants'.
    /// Stale index entries (source database or item gone) are skipped, not
    /// errors.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseNotFound`/`ItemNotFound` if a root does not
    /// resolve.
    pub fn build(&self, roots: &[ItemRef]) -> Result<Vec<ReportRecord>> {
        for root in roots {
            let database = self
                .store
                .database(&root.database)
                .ok_or_else(|| Error::DatabaseNotFound(root.database.clone()))?;
            database
                .item(&root.id)
                .ok_or_else(|| Error::ItemNotFound(root.clone()))?;
        }

        let mut records = Vec::new();
        let mut stack: Vec<ItemRef> = roots.iter().rev().cloned().collect();

        while let Some(node) = stack.pop() {
            let database = match self.store.database(&node.database) {
                Some(database) => database,
                None => continue,
            };
            let summary = match database.item(&node.id) {
                Some(summary) => summary,
                None => continue,
            };

            for link in self.index.references_to(&node) {
                if self.options.ignore_clones
                    && link
                        .source_field
                        .as_ref()
                        .is_some_and(clone_fields::is_clone_field)
                {
                    continue;
                }

                let source_database = match self.store.database(&link.source_database) {
                    Some(database) => database,
                    None => {
                        debug!(source = %link.source_ref(), "stale entry: database gone");
                        continue;
                    }
                };
                let referrer = match source_database.item(&link.source_item) {
                    Some(referrer) => referrer,
                    None => {
                        debug!(source = %link.source_ref(), "stale entry: item gone");
                        continue;
                    }
                };

                let field_label = self.label_field(source_database, &link);

                records.push(ReportRecord {
                    referrer_name: referrer.display_name,
                    referrer_path: referrer.path,
                    field_label,
                    target_path: summary.path.clone(),
                    link,
                    token: RecordToken::new(),
                });
            }

            for child in summary.children.iter().rev() {
                stack.push(ItemRef::new(node.database.clone(), *child));
            }
        }

        Ok(records)
    }

    /// Resolve the field label through the referrer's template metadata
    ///
    /// Tries the version the link was recorded against first, then any
    /// version carrying the field; a field no template defines is labeled
    /// "unknown field" rather than failing.
    fn label_field(&self, database: &dyn ContentDatabase, link: &ItemLink) -> FieldLabel {
        let field: &FieldId = match &link.source_field {
            Some(field) => field,
            None => return FieldLabel::ItemLevel,
        };

        let recorded = link.source_version_key();
        let snapshot = database
            .field(&link.source_item, &recorded, field)
            .or_else(|| {
                database
                    .versions(&link.source_item)
                    .iter()
                    .find_map(|version| database.field(&link.source_item, version, field))
            });

        match snapshot.and_then(|s| s.template_field) {
            Some(template_field) => FieldLabel::Named(template_field.display_name),
            None => FieldLabel::Unknown,
        }
    }
}
