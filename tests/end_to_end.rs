//! End-to-end flows through the public facade
//!
//! Report -> operator picks a record -> repair -> report re-run, the loop
//! the operator-facing surface drives.

use linkmend::{
    CodecRegistry, DatabaseName, FieldId, ItemId, ItemLink, ItemPath, ItemRef, Language,
    LinkIndex, MemoryDatabase, MemoryStore, RelinkTarget, RepairEngine, ReportBuilder,
    ReportOptions, StoredField, VersionKey, VersionNumber,
};

fn master() -> DatabaseName {
    DatabaseName::new("master")
}

fn en(version: u32) -> VersionKey {
    VersionKey::new(Language::new("en"), VersionNumber::new(version))
}

/// Item A with two en versions, field F encoding a link to item B.
struct World {
    store: MemoryStore,
    index: LinkIndex,
    codecs: CodecRegistry,
    a: ItemId,
    b: ItemId,
    f: FieldId,
}

impl World {
    fn new() -> Self {
        let database = MemoryDatabase::new(master());
        let a = ItemId::new();
        let b = ItemId::new();
        let f = FieldId::new();

        database.insert_item(b, "B", "/content/b");
        database.insert_item(a, "A", "/content/a");
        for version in [en(1), en(2)] {
            database.set_field(
                a,
                &version,
                f,
                StoredField::new(b.to_string(), "droplink").with_template("Link To B"),
            );
        }

        let mut store = MemoryStore::new();
        store.add_database(database);

        let index = LinkIndex::new();
        for version in [1, 2] {
            index.insert(ItemLink {
                source_database: master(),
                source_item: a,
                source_language: Language::new("en"),
                source_version: VersionNumber::new(version),
                source_field: Some(f),
                target_database: master(),
                target_item: b,
                target_language: None,
                target_version: None,
                target_path: ItemPath::new("/content/b"),
            });
        }

        Self {
            store,
            index,
            codecs: CodecRegistry::with_defaults(),
            a,
            b,
            f,
        }
    }

    fn report_for(&self, target: ItemId) -> Vec<linkmend::ReportRecord> {
        ReportBuilder::new(&self.store, &self.index, ReportOptions::default())
            .build(&[ItemRef::new(master(), target)])
            .unwrap()
    }
}

#[test]
fn remove_flow_clears_both_versions_and_the_report() {
    let world = World::new();

    // Operator loads the report for B and sees A's references
    let report = world.report_for(world.b);
    assert_eq!(report.len(), 2);
    assert!(report.iter().all(|r| r.link.source_item == world.a));

    // Operator removes via the first record's descriptor
    let engine = RepairEngine::new(&world.store, &world.index, &world.codecs);
    let outcome = engine.remove(&report[0].link).unwrap();
    assert_eq!(outcome.versions_repaired, 2);

    // Both versions' field F dropped the reference
    let database = world.store.memory_database(&master()).unwrap();
    use linkmend::ContentDatabase;
    for version in [en(1), en(2)] {
        assert_eq!(database.field(&world.a, &version, &world.f).unwrap().raw, "");
    }

    // A report re-run for B shows zero records from A
    assert!(world.report_for(world.b).is_empty());
}

#[test]
fn relink_flow_moves_the_report_to_the_new_target() {
    let world = World::new();
    let c = ItemId::new();
    world
        .store
        .memory_database(&master())
        .unwrap()
        .insert_item(c, "C", "/content/c");

    let report = world.report_for(world.b);
    let engine = RepairEngine::new(&world.store, &world.index, &world.codecs);
    engine
        .relink(
            &report[0].link,
            &RelinkTarget::new(master(), c, ItemPath::new("/content/c")),
        )
        .unwrap();

    // The old target's report is empty, the new target's carries A
    assert!(world.report_for(world.b).is_empty());
    let moved = world.report_for(c);
    assert_eq!(moved.len(), 2);
    assert!(moved.iter().all(|r| r.link.source_item == world.a));
    assert!(moved.iter().all(|r| r.link.target_item == c));
}

#[test]
fn index_survives_a_restart() {
    let world = World::new();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("links.idx");
    world.index.save(&path).unwrap();

    // "Restart": reload the index and run the report against it
    let reloaded = LinkIndex::load(&path).unwrap();
    let report = ReportBuilder::new(&world.store, &reloaded, ReportOptions::default())
        .build(&[ItemRef::new(master(), world.b)])
        .unwrap();
    assert_eq!(report.len(), 2);
}

#[test]
fn repair_across_databases() {
    let mut world = World::new();

    // A referrer in a second database pointing at B in master
    let web = MemoryDatabase::new(DatabaseName::new("web"));
    let w = ItemId::new();
    let wf = FieldId::new();
    web.insert_item(w, "W", "/content/w");
    web.set_field(
        w,
        &en(1),
        wf,
        StoredField::new(world.b.to_string(), "droplink").with_template("Pick"),
    );
    world.store.add_database(web);

    let cross = ItemLink {
        source_database: DatabaseName::new("web"),
        source_item: w,
        source_language: Language::new("en"),
        source_version: VersionNumber::new(1),
        source_field: Some(wf),
        target_database: master(),
        target_item: world.b,
        target_language: None,
        target_version: None,
        target_path: ItemPath::new("/content/b"),
    };
    world.index.insert(cross.clone());

    let engine = RepairEngine::new(&world.store, &world.index, &world.codecs);
    engine.remove(&cross).unwrap();

    use linkmend::ContentDatabase;
    let web = world
        .store
        .memory_database(&DatabaseName::new("web"))
        .unwrap();
    assert_eq!(web.field(&w, &en(1), &wf).unwrap().raw, "");

    // Master's own references to B are untouched
    assert_eq!(world.report_for(world.b).len(), 2);
}
