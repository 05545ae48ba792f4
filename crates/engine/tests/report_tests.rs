//! Report builder behavior against the in-memory store
//!
//! Covers pre-order traversal, clone filtering, stale-entry skipping, and
//! field labeling.

use linkmend_core::{
    clone_fields, DatabaseName, Error, FieldId, ItemId, ItemLink, ItemPath, ItemRef, Language,
    VersionKey, VersionNumber,
};
use linkmend_engine::{FieldLabel, ReportBuilder, ReportOptions};
use linkmend_index::LinkIndex;
use linkmend_store::{MemoryDatabase, MemoryStore, StoredField};

fn master() -> DatabaseName {
    DatabaseName::new("master")
}

fn en1() -> VersionKey {
    VersionKey::new(Language::new("en"), VersionNumber::new(1))
}

fn link(source: ItemId, field: Option<FieldId>, target: ItemId, target_path: &str) -> ItemLink {
    ItemLink {
        source_database: master(),
        source_item: source,
        source_language: Language::new("en"),
        source_version: VersionNumber::new(1),
        source_field: field,
        target_database: master(),
        target_item: target,
        target_language: None,
        target_version: None,
        target_path: ItemPath::new(target_path),
    }
}

struct Fixture {
    store: MemoryStore,
    index: LinkIndex,
    root: ItemId,
    child: ItemId,
    referrer: ItemId,
    field: FieldId,
}

impl Fixture {
    /// Tree root -> child; one referrer item pointing at both.
    fn new() -> Self {
        let database = MemoryDatabase::new(master());
        let root = ItemId::new();
        let child = ItemId::new();
        let referrer = ItemId::new();
        let field = FieldId::new();

        database.insert_item(root, "Root", "/content/root");
        database.insert_item(child, "Child", "/content/root/child");
        database.set_children(root, vec![child]);
        database.insert_item(referrer, "Referrer", "/content/referrer");
        database.set_field(
            referrer,
            &en1(),
            field,
            StoredField::new(format!("{root}|{child}"), "multilist").with_template("Related"),
        );

        let mut store = MemoryStore::new();
        store.add_database(database);

        let index = LinkIndex::new();
        index.insert(link(referrer, Some(field), root, "/content/root"));
        index.insert(link(referrer, Some(field), child, "/content/root/child"));

        Self {
            store,
            index,
            root,
            child,
            referrer,
            field,
        }
    }

    fn build(&self, options: ReportOptions) -> Vec<linkmend_engine::ReportRecord> {
        ReportBuilder::new(&self.store, &self.index, options)
            .build(&[ItemRef::new(master(), self.root)])
            .unwrap()
    }

    fn database(&self) -> &MemoryDatabase {
        self.store.memory_database(&master()).unwrap()
    }
}

#[test]
fn report_is_pre_order_node_before_descendants() {
    let fixture = Fixture::new();
    let records = fixture.build(ReportOptions::default());

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].link.target_item, fixture.root);
    assert_eq!(records[0].target_path, ItemPath::new("/content/root"));
    assert_eq!(records[1].link.target_item, fixture.child);
    assert_eq!(records[1].target_path, ItemPath::new("/content/root/child"));
}

#[test]
fn records_carry_referrer_identity_and_descriptor() {
    let fixture = Fixture::new();
    let records = fixture.build(ReportOptions::default());

    let record = &records[0];
    assert_eq!(record.referrer_name, "Referrer");
    assert_eq!(record.referrer_path, ItemPath::new("/content/referrer"));
    assert_eq!(record.field_label, FieldLabel::Named("Related".to_string()));
    assert_eq!(record.link.source_item, fixture.referrer);
    assert_eq!(record.link.source_field, Some(fixture.field));
    assert!(record.token.as_str().starts_with('L'));
}

#[test]
fn tokens_are_distinct_per_record() {
    let fixture = Fixture::new();
    let records = fixture.build(ReportOptions::default());
    assert_ne!(records[0].token, records[1].token);
}

#[test]
fn index_cardinality_matches_record_count() {
    let fixture = Fixture::new();
    // Add two more referrers against the root
    for n in 0..2 {
        let extra = ItemId::new();
        fixture
            .database()
            .insert_item(extra, format!("Extra {n}"), format!("/content/extra-{n}"));
        fixture
            .index
            .insert(link(extra, Some(fixture.field), fixture.root, "/content/root"));
    }

    let records = fixture.build(ReportOptions::default());
    let against_root = records
        .iter()
        .filter(|r| r.link.target_item == fixture.root)
        .count();
    assert_eq!(against_root, 3);
    assert_eq!(records.len(), 4);
}

#[test]
fn ignore_clones_filters_clone_source_fields_only() {
    let fixture = Fixture::new();
    let clone = ItemId::new();
    fixture
        .database()
        .insert_item(clone, "Clone", "/content/clone");
    fixture.index.insert(link(
        clone,
        Some(clone_fields::SOURCE_ITEM),
        fixture.root,
        "/content/root",
    ));

    let all = fixture.build(ReportOptions::default());
    assert_eq!(all.len(), 3);

    let filtered = fixture.build(ReportOptions { ignore_clones: true });
    assert_eq!(filtered.len(), 2);
    assert!(filtered
        .iter()
        .all(|r| r.link.source_item != clone));
}

#[test]
fn stale_entries_are_skipped_without_error() {
    let fixture = Fixture::new();

    // Entry whose source database no longer exists
    let mut foreign = link(ItemId::new(), Some(fixture.field), fixture.root, "/content/root");
    foreign.source_database = DatabaseName::new("retired");
    fixture.index.insert(foreign);

    // Entry whose source item no longer exists
    fixture
        .index
        .insert(link(ItemId::new(), Some(fixture.field), fixture.root, "/content/root"));

    let records = fixture.build(ReportOptions::default());
    // Only the live referrer's two records remain
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.link.source_item == fixture.referrer));
}

#[test]
fn item_level_links_are_labeled_template() {
    let fixture = Fixture::new();
    fixture
        .index
        .insert(link(fixture.referrer, None, fixture.root, "/content/root"));

    let records = fixture.build(ReportOptions::default());
    let item_level = records
        .iter()
        .find(|r| r.link.source_field.is_none())
        .unwrap();
    assert_eq!(item_level.field_label, FieldLabel::ItemLevel);
    assert_eq!(item_level.field_label.to_string(), "template");
}

#[test]
fn fields_without_template_definition_are_labeled_unknown() {
    let fixture = Fixture::new();
    let orphan_field = FieldId::new();
    fixture.database().set_field(
        fixture.referrer,
        &en1(),
        orphan_field,
        StoredField::new(fixture.root.to_string(), "droplink"),
    );
    fixture.index.insert(link(
        fixture.referrer,
        Some(orphan_field),
        fixture.root,
        "/content/root",
    ));

    let records = fixture.build(ReportOptions::default());
    let orphan = records
        .iter()
        .find(|r| r.link.source_field == Some(orphan_field))
        .unwrap();
    assert_eq!(orphan.field_label, FieldLabel::Unknown);
    assert_eq!(orphan.field_label.to_string(), "unknown field");
}

#[test]
fn missing_root_is_an_error() {
    let fixture = Fixture::new();
    let builder = ReportBuilder::new(&fixture.store, &fixture.index, ReportOptions::default());

    let absent_item = builder.build(&[ItemRef::new(master(), ItemId::new())]);
    assert!(matches!(absent_item, Err(Error::ItemNotFound(_))));

    let absent_database = builder.build(&[ItemRef::new(DatabaseName::new("web"), fixture.root)]);
    assert!(matches!(absent_database, Err(Error::DatabaseNotFound(_))));
}

#[test]
fn report_reruns_are_deterministic() {
    let fixture = Fixture::new();
    let first = fixture.build(ReportOptions::default());
    let second = fixture.build(ReportOptions::default());

    let first_links: Vec<_> = first.iter().map(|r| r.link.clone()).collect();
    let second_links: Vec<_> = second.iter().map(|r| r.link.clone()).collect();
    assert_eq!(first_links, second_links);
}
