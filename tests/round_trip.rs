use std::collections::HashSet;
use std::fs;

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use tasklet::io::storage::{FileStore, MemoryStore};
use tasklet::io::todo_io::{TodoIoError, export_todos_at, parse_todos, read_todos_file};
use tasklet::model::{Importance, Recurrence};
use tasklet::ops::todos::{NewTask, TodoStore};

fn sample_store() -> TodoStore {
    let mut store = TodoStore::default();
    store.add(NewTask {
        title: "Pay rent".into(),
        importance: Some(Importance::Urgent),
        due_date: chrono::NaiveDate::from_ymd_opt(2024, 7, 1),
        tags: vec!["home".into()],
        recurrence: Some(Recurrence::Weekly),
        ..Default::default()
    });
    let id = store
        .add(NewTask {
            title: "Read book".into(),
            notes: "chapter 3".into(),
            ..Default::default()
        })
        .unwrap();
    store.toggle(&id);
    store
}

#[test]
fn export_then_import_into_empty_store_is_identical() {
    let tmp = tempfile::TempDir::new().unwrap();
    let original = sample_store();
    let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 30, 0).unwrap();

    let path = export_todos_at(original.tasks(), tmp.path(), now).unwrap();
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "todos-2024-06-10T12-30-00-000Z.json"
    );

    let batch = read_todos_file(&path).unwrap();
    assert!(batch.rejected.is_empty());
    let mut restored = TodoStore::default();
    assert_eq!(restored.import_batch(batch.tasks), 2);
    assert_eq!(restored.tasks(), original.tasks());
}

#[test]
fn import_into_non_empty_store_remaps_collisions() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut store = sample_store();
    let path = export_todos_at(store.tasks(), tmp.path(), Utc::now()).unwrap();
    let before: Vec<String> = store.tasks().iter().map(|t| t.id.clone()).collect();

    let batch = read_todos_file(&path).unwrap();
    assert_eq!(store.import_batch(batch.tasks), 2);
    assert_eq!(store.len(), 4);

    let ids: HashSet<&str> = store.tasks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids.len(), 4);
    // Imported copies land in front, in file order; the originals keep their ids
    assert_eq!(store.tasks()[0].title, "Read book");
    assert_eq!(store.tasks()[1].title, "Pay rent");
    let kept: Vec<String> = store.tasks()[2..].iter().map(|t| t.id.clone()).collect();
    assert_eq!(kept, before);
}

#[test]
fn object_top_level_is_rejected() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("obj.json");
    fs::write(&path, r#"{"todos": []}"#).unwrap();
    assert!(matches!(read_todos_file(&path), Err(TodoIoError::NotAnArray)));
}

#[test]
fn missing_file_is_a_read_error() {
    let tmp = tempfile::TempDir::new().unwrap();
    let err = read_todos_file(&tmp.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, TodoIoError::ReadError { .. }));
    assert!(err.to_string().starts_with("Failed to read file"));
}

#[test]
fn legacy_records_are_normalized() {
    let batch = parse_todos(
        r#"[
            {"id": "old-1", "title": "Legacy", "priority": "low",
             "attachments": [{"link": "https://example.com"}]},
            {"text": "no title"},
            "not a record"
        ]"#,
    )
    .unwrap();
    assert_eq!(batch.rejected.len(), 1);
    assert_eq!(batch.tasks.len(), 2);

    let mut store = TodoStore::default();
    store.import_batch(batch.tasks);
    let legacy = store.get("old-1").unwrap();
    assert_eq!(legacy.importance, Importance::Optional);
    assert_eq!(legacy.attachments[0].url, "https://example.com");
    assert_eq!(legacy.attachments[0].name, "https://example.com");
    assert_eq!(store.tasks()[1].title, "Untitled task");
}

#[test]
fn saved_collection_reloads_from_disk() {
    let tmp = tempfile::TempDir::new().unwrap();
    let store = sample_store();
    let mut kv = FileStore::open(tmp.path()).unwrap();
    store.save(&mut kv).unwrap();

    let reloaded = TodoStore::load(&kv);
    assert_eq!(reloaded.tasks(), store.tasks());
}

#[test]
fn corrupt_storage_loads_empty() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("todos.json"), "{not json").unwrap();
    let kv = FileStore::open(tmp.path()).unwrap();
    assert!(TodoStore::load(&kv).is_empty());
    assert!(TodoStore::load(&MemoryStore::new()).is_empty());
}
