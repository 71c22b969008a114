//! Integration tests for the initial full-tree mirror

use mirror_core::{CollisionPolicy, Operation, SyncEngine, SyncReport};
use mirror_test_utils::MirrorFixture;
use pretty_assertions::assert_eq;
use std::io::{self, Cursor};
use std::path::PathBuf;

fn events(report: &SyncReport) -> Vec<(Operation, PathBuf)> {
    report
        .events
        .iter()
        .map(|e| (e.operation, e.path.clone()))
        .collect()
}

#[test]
fn initial_pass_copies_whole_tree() {
    let fixture = MirrorFixture::new();
    fixture.write_source("a.txt", "alpha");
    fixture.write_source("sub/b.txt", "beta");
    fixture.write_source("sub/deeper/c.txt", "gamma");
    fixture.mkdir_source("empty");

    let mut engine = SyncEngine::new(&fixture.config(5)).unwrap();
    let report = engine.initial_pass().unwrap();

    assert!(report.success);
    assert!(report.warnings.is_empty());
    fixture.assert_converged();
    assert_eq!(report.count(Operation::Copy), 3);
    assert_eq!(report.count(Operation::Creation), 3);
}

#[test]
fn initial_pass_creates_missing_replica_root() {
    let fixture = MirrorFixture::new();
    fixture.write_source("a.txt", "alpha");
    assert!(!fixture.replica().exists());

    let mut engine = SyncEngine::new(&fixture.config(5)).unwrap();
    engine.initial_pass().unwrap();

    assert!(fixture.replica().is_dir());
    assert_eq!(fixture.read_replica("a.txt"), "alpha");
}

#[test]
fn copy_is_logged_with_source_path_and_creation_with_replica_path() {
    let fixture = MirrorFixture::new();
    let file = fixture.write_source("sub/b.txt", "beta");

    let mut engine = SyncEngine::new(&fixture.config(5)).unwrap();
    let report = engine.initial_pass().unwrap();

    assert_eq!(
        events(&report),
        vec![
            (Operation::Creation, fixture.replica().join("sub")),
            (Operation::Copy, file),
        ]
    );
}

#[test]
fn missing_source_is_rejected() {
    let fixture = MirrorFixture::new();
    let mut config = fixture.config(5);
    config.source = fixture.root().join("does-not-exist");

    assert!(SyncEngine::new(&config).is_err());
}

#[test]
fn copies_keep_source_modification_time() {
    let fixture = MirrorFixture::new();
    fixture.write_source("a.txt", "alpha");
    fixture.age_source("a.txt", std::time::Duration::from_secs(3600));

    let mut engine = SyncEngine::new(&fixture.config(5)).unwrap();
    engine.initial_pass().unwrap();

    let source = std::fs::metadata(fixture.source().join("a.txt"))
        .unwrap()
        .modified()
        .unwrap();
    let replica = std::fs::metadata(fixture.replica().join("a.txt"))
        .unwrap()
        .modified()
        .unwrap();
    assert_eq!(source, replica);
}

#[test]
fn copies_take_fresh_mtime_when_preservation_is_off() {
    let fixture = MirrorFixture::new();
    fixture.write_source("a.txt", "alpha");
    fixture.age_source("a.txt", std::time::Duration::from_secs(3600));
    let mut config = fixture.config(5);
    config.preserve_mtime = false;

    let mut engine = SyncEngine::new(&config).unwrap();
    engine.initial_pass().unwrap();

    let source = std::fs::metadata(fixture.source().join("a.txt"))
        .unwrap()
        .modified()
        .unwrap();
    let replica = std::fs::metadata(fixture.replica().join("a.txt"))
        .unwrap()
        .modified()
        .unwrap();
    assert!(replica > source);
}

// ============================================================================
// Collisions
// ============================================================================

#[test]
fn overwrite_replaces_colliding_file() {
    let fixture = MirrorFixture::new();
    let source = fixture.write_source("a.txt", "new");
    let replica = fixture.write_replica("a.txt", "old");
    let config = fixture.config(5).with_collision_policy(CollisionPolicy::Overwrite);

    let mut engine = SyncEngine::new(&config).unwrap();
    let report = engine.initial_pass().unwrap();

    assert_eq!(fixture.read_replica("a.txt"), "new");
    assert_eq!(
        events(&report),
        vec![(Operation::Removal, replica), (Operation::Copy, source)]
    );
}

#[test]
fn keep_leaves_colliding_file_alone() {
    let fixture = MirrorFixture::new();
    fixture.write_source("a.txt", "new");
    fixture.write_source("b.txt", "bee");
    fixture.write_replica("a.txt", "old");
    let config = fixture.config(5).with_collision_policy(CollisionPolicy::Keep);

    let mut engine = SyncEngine::new(&config).unwrap();
    let report = engine.initial_pass().unwrap();

    assert_eq!(fixture.read_replica("a.txt"), "old");
    assert_eq!(fixture.read_replica("b.txt"), "bee");
    assert_eq!(report.count(Operation::Removal), 0);
    assert_eq!(report.count(Operation::Copy), 1);
}

#[test]
fn overwrite_replaces_colliding_directory_and_logs_its_contents() {
    let fixture = MirrorFixture::new();
    fixture.write_source("sub/a.txt", "new");
    let stale = fixture.write_replica("sub/stale.txt", "old");
    let nested = fixture.write_replica("sub/inner/x.txt", "x");
    let config = fixture.config(5).with_collision_policy(CollisionPolicy::Overwrite);

    let mut engine = SyncEngine::new(&config).unwrap();
    let report = engine.initial_pass().unwrap();

    fixture.assert_converged();
    let sub = fixture.replica().join("sub");
    let removals: Vec<_> = events(&report)
        .into_iter()
        .filter(|(op, _)| *op == Operation::Removal)
        .map(|(_, path)| path)
        .collect();
    assert_eq!(removals, vec![stale, nested, sub.join("inner"), sub]);
}

#[test]
fn keep_skips_colliding_directory_entirely() {
    let fixture = MirrorFixture::new();
    fixture.write_source("sub/a.txt", "new");
    fixture.write_replica("sub/stale.txt", "old");
    let config = fixture.config(5).with_collision_policy(CollisionPolicy::Keep);

    let mut engine = SyncEngine::new(&config).unwrap();
    let report = engine.initial_pass().unwrap();

    assert!(report.is_quiet());
    assert_eq!(
        fixture.replica_entries().into_iter().collect::<Vec<_>>(),
        vec!["sub/", "sub/stale.txt"]
    );
}

#[test]
fn prompt_asks_until_answer_is_valid() {
    let fixture = MirrorFixture::new();
    fixture.write_source("a.txt", "new");
    fixture.write_replica("a.txt", "old");
    let prompt = mirror_core::LinePrompt::new(Cursor::new("maybe\nY\ny\n"), io::sink());

    let mut engine = SyncEngine::new(&fixture.config(5)).unwrap().with_prompt(prompt);
    let report = engine.initial_pass().unwrap();

    assert!(report.success);
    assert_eq!(fixture.read_replica("a.txt"), "new");
}

#[test]
fn prompt_answer_no_keeps_file() {
    let fixture = MirrorFixture::new();
    fixture.write_source("a.txt", "new");
    fixture.write_replica("a.txt", "old");
    let prompt = mirror_core::LinePrompt::new(Cursor::new("n\n"), io::sink());

    let mut engine = SyncEngine::new(&fixture.config(5)).unwrap().with_prompt(prompt);
    engine.initial_pass().unwrap();

    assert_eq!(fixture.read_replica("a.txt"), "old");
}

#[test]
fn closed_prompt_input_aborts_the_pass() {
    let fixture = MirrorFixture::new();
    fixture.write_source("a.txt", "new");
    fixture.write_replica("a.txt", "old");
    let prompt = mirror_core::LinePrompt::new(Cursor::new(""), io::sink());

    let mut engine = SyncEngine::new(&fixture.config(5)).unwrap().with_prompt(prompt);
    let report = engine.initial_pass().unwrap();

    assert!(!report.success);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(fixture.read_replica("a.txt"), "old");
}

#[test]
fn overwrite_replaces_directory_standing_where_source_has_file() {
    let fixture = MirrorFixture::new();
    let source = fixture.write_source("x", "file now");
    let stale = fixture.write_replica("x/inner.txt", "old");
    let config = fixture.config(5).with_collision_policy(CollisionPolicy::Overwrite);

    let mut engine = SyncEngine::new(&config).unwrap();
    let report = engine.initial_pass().unwrap();

    assert!(report.success, "pass failed: {:?}", report.errors);
    fixture.assert_converged();
    let replica_x = fixture.replica().join("x");
    assert_eq!(
        events(&report),
        vec![
            (Operation::Removal, stale),
            (Operation::Removal, replica_x),
            (Operation::Copy, source),
        ]
    );
}

#[test]
fn overwrite_replaces_file_standing_where_source_has_directory() {
    let fixture = MirrorFixture::new();
    let inner = fixture.write_source("x/inner.txt", "nested");
    let stale = fixture.write_replica("x", "old file");
    let config = fixture.config(5).with_collision_policy(CollisionPolicy::Overwrite);

    let mut engine = SyncEngine::new(&config).unwrap();
    let report = engine.initial_pass().unwrap();

    assert!(report.success, "pass failed: {:?}", report.errors);
    fixture.assert_converged();
    assert_eq!(
        events(&report),
        vec![
            (Operation::Removal, stale.clone()),
            (Operation::Creation, stale),
            (Operation::Copy, inner),
        ]
    );
}

#[test]
fn keep_leaves_entry_of_other_kind_alone() {
    let fixture = MirrorFixture::new();
    fixture.write_source("x", "file");
    fixture.mkdir_replica("x");
    let config = fixture.config(5).with_collision_policy(CollisionPolicy::Keep);

    let mut engine = SyncEngine::new(&config).unwrap();
    let report = engine.initial_pass().unwrap();

    assert!(report.success);
    assert!(report.events.is_empty());
    assert!(fixture.replica().join("x").is_dir());
}

#[test]
fn prompt_names_the_existing_entry_kind() {
    let fixture = MirrorFixture::new();
    fixture.write_source("x", "file");
    fixture.mkdir_replica("x");
    let asked = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));

    struct Recording(std::rc::Rc<std::cell::RefCell<Vec<String>>>);
    impl mirror_core::CollisionPrompt for Recording {
        fn resolve(
            &mut self,
            collision: &mirror_core::Collision,
        ) -> mirror_core::Result<mirror_core::Resolution> {
            self.0.borrow_mut().push(collision.summary());
            Ok(mirror_core::Resolution::Keep)
        }
    }

    let mut engine = SyncEngine::new(&fixture.config(5))
        .unwrap()
        .with_prompt(Recording(asked.clone()));
    engine.initial_pass().unwrap();

    assert_eq!(
        *asked.borrow(),
        vec!["A directory with the name \"x\" already exists in the destination folder.".to_string()]
    );
}

// ============================================================================
// Root validation
// ============================================================================

#[test]
fn replica_inside_source_is_rejected() {
    let fixture = MirrorFixture::new();
    fixture.write_source("a.txt", "alpha");
    let mut config = fixture.config(5).with_collision_policy(CollisionPolicy::Overwrite);
    config.replica = fixture.source().join("backup");

    let result = SyncEngine::new(&config);

    assert!(matches!(result, Err(mirror_core::Error::NestedRoots { .. })));
}

#[test]
fn source_inside_replica_is_rejected() {
    let fixture = MirrorFixture::new();
    fixture.write_source("a.txt", "alpha");
    let mut config = fixture.config(5);
    config.replica = fixture.root().to_path_buf();

    let result = SyncEngine::new(&config);

    assert!(matches!(result, Err(mirror_core::Error::NestedRoots { .. })));
}

#[test]
fn same_directory_for_both_roots_is_rejected() {
    let fixture = MirrorFixture::new();
    let mut config = fixture.config(5);
    config.replica = fixture.source().to_path_buf();

    assert!(matches!(
        SyncEngine::new(&config),
        Err(mirror_core::Error::NestedRoots { .. })
    ));
}

#[test]
fn sibling_with_shared_name_prefix_is_allowed() {
    let fixture = MirrorFixture::new();
    fixture.write_source("a.txt", "alpha");
    let mut config = fixture.config(5);
    // "source-copy" starts with the string "source" but is not inside it.
    config.replica = fixture.source().with_file_name("source-copy");

    let mut engine = SyncEngine::new(&config).unwrap();

    assert!(engine.initial_pass().unwrap().success);
}
