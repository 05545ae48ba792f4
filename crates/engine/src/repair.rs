//! Link repair engine
//!
//! Orchestrates relink/remove operations: given an [`ItemLink`] picked from
//! a report, every version of the referring item across every language is
//! visited, the referencing field is rewritten through its codec under a
//! maintenance-mode edit, and the link index is corrected version by
//! version.
//!
//! Repair is best-effort across versions by design: per-version problems
//! (missing field, unrecognized field type, pointer already gone, edit
//! conflict) are logged and skipped, and there is no rollback of versions
//! already repaired. Only an unresolvable repair target aborts the whole
//! operation.

use tracing::{debug, info, warn};

use linkmend_codec::CodecRegistry;
use linkmend_core::{
    ContentDatabase, ContentStore, EditScope, Error, ItemLink, ItemRef, RelinkTarget, Result,
};
use linkmend_index::LinkIndex;

/// Summary of one repair operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairOutcome {
    /// Versions of the source item enumerated
    pub versions_seen: usize,
    /// Versions whose field value was rewritten and committed
    pub versions_repaired: usize,
    /// Versions skipped (missing field, no codec, stale pointer, conflict)
    pub versions_skipped: usize,
    /// The source item or its database no longer exists; nothing to rewrite
    pub stale_source: bool,
}

#[derive(Clone, Copy)]
enum RepairAction<'a> {
    Relink(&'a RelinkTarget),
    Remove,
}

/// Relink/remove orchestrator over an injected store, index, and registry
pub struct RepairEngine<'a> {
    store: &'a dyn ContentStore,
    index: &'a LinkIndex,
    codecs: &'a CodecRegistry,
}

impl<'a> RepairEngine<'a> {
    /// Create an engine over the given collaborators
    pub fn new(store: &'a dyn ContentStore, index: &'a LinkIndex, codecs: &'a CodecRegistry) -> Self {
        Self {
            store,
            index,
            codecs,
        }
    }

    /// Repoint the reference described by `link` at `new_target`
    ///
    /// Every version of the source item that encodes the reference is
    /// rewritten; the index entry for each rewritten version moves from the
    /// old target to the new one, and the supplied entry is removed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseNotFound`/`TargetNotFound` if the old or new target
    /// does not resolve, and `InvalidDescriptor` for item-level links.
    pub fn relink(&self, link: &ItemLink, new_target: &RelinkTarget) -> Result<RepairOutcome> {
        self.resolve_target(&new_target.item_ref())?;
        self.repair(link, RepairAction::Relink(new_target))
    }

    /// Strip the reference described by `link`
    ///
    /// # Errors
    ///
    /// Returns `DatabaseNotFound`/`TargetNotFound` if the target does not
    /// resolve, and `InvalidDescriptor` for item-level links.
    pub fn remove(&self, link: &ItemLink) -> Result<RepairOutcome> {
        self.repair(link, RepairAction::Remove)
    }

    fn resolve_target(&self, target: &ItemRef) -> Result<()> {
        let database = self
            .store
            .database(&target.database)
            .ok_or_else(|| Error::DatabaseNotFound(target.database.clone()))?;
        database
            .item(&target.id)
            .ok_or_else(|| Error::TargetNotFound(target.clone()))?;
        Ok(())
    }

    fn repair(&self, link: &ItemLink, action: RepairAction<'_>) -> Result<RepairOutcome> {
        self.resolve_target(&link.target_ref())?;

        let field = link.source_field.ok_or_else(|| {
            Error::InvalidDescriptor("item-level reference carries no field to repair".to_string())
        })?;

        let mut outcome = RepairOutcome::default();

        // A missing source means the reference is already stale: silent
        // no-op, the index entry stays for the report builder to skip.
        let source_database = match self.store.database(&link.source_database) {
            Some(database) => database,
            None => {
                debug!(source = %link.source_ref(), "source database gone, nothing to repair");
                outcome.stale_source = true;
                return Ok(outcome);
            }
        };
        if source_database.item(&link.source_item).is_none() {
            debug!(source = %link.source_ref(), "source item gone, nothing to repair");
            outcome.stale_source = true;
            return Ok(outcome);
        }

        for version in source_database.versions(&link.source_item) {
            outcome.versions_seen += 1;

            let snapshot = match source_database.field(&link.source_item, &version, &field) {
                Some(snapshot) => snapshot,
                None => {
                    debug!(item = %link.source_item, %version, %field, "field absent, version skipped");
                    outcome.versions_skipped += 1;
                    continue;
                }
            };

            let codec = match self.codecs.resolve(&snapshot.type_name) {
                Some(codec) => codec,
                None => {
                    debug!(
                        item = %link.source_item,
                        %version,
                        field_type = %snapshot.type_name,
                        "no codec for field type, version skipped"
                    );
                    outcome.versions_skipped += 1;
                    continue;
                }
            };

            let rewritten = match action {
                RepairAction::Relink(new_target) => {
                    codec.rewrite_reference(&snapshot.raw, &link.target_item, new_target)
                }
                RepairAction::Remove => codec.remove_reference(&snapshot.raw, &link.target_item),
            };
            let rewritten = match rewritten {
                Ok(value) => value,
                Err(error) => {
                    debug!(item = %link.source_item, %version, %error, "codec skip");
                    outcome.versions_skipped += 1;
                    continue;
                }
            };

            let mut edit = match source_database.edit(&link.source_item, &version, EditScope::Maintenance)
            {
                Ok(edit) => edit,
                Err(error) => {
                    warn!(item = %link.source_item, %version, %error, "edit could not be opened");
                    outcome.versions_skipped += 1;
                    continue;
                }
            };
            edit.set_field_raw(&field, rewritten);
            if let Err(error) = edit.commit() {
                warn!(item = %link.source_item, %version, %error, "commit rejected, version skipped");
                outcome.versions_skipped += 1;
                continue;
            }

            // Each version's field yields its own index entry: correct the
            // index per processed version, not globally in bulk.
            let versioned_link = link.with_source_version(&version);
            self.index.remove(&versioned_link);
            if let RepairAction::Relink(new_target) = action {
                self.index.insert(versioned_link.retargeted(new_target));
            }
            outcome.versions_repaired += 1;
        }

        // The operator acted on this exact entry; drop it even when no
        // version carried the reference anymore.
        self.index.remove(link);

        info!(
            source = %link.source_ref(),
            target = %link.target_ref(),
            repaired = outcome.versions_repaired,
            skipped = outcome.versions_skipped,
            "link repair complete"
        );
        Ok(outcome)
    }
}
