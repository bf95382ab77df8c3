use super::*;
use crate::kernel::services::adapters::{ChannelNotifier, MemoryStorage};
use crate::kernel::services::ports::NoticeLevel;
use std::sync::mpsc::{self, Receiver};

const NS: &str = "test";

fn persistence(storage: &MemoryStorage) -> (Persistence, Receiver<Notice>) {
    let (tx, rx) = mpsc::channel();
    let persistence = Persistence::new(
        Box::new(storage.clone()),
        Box::new(ChannelNotifier::new(tx)),
        NS,
    );
    (persistence, rx)
}

fn sample_files() -> Vec<FileRecord> {
    vec![
        FileRecord::new(FileId::new(10, 0), "index.html", "<p>hi</p>"),
        FileRecord::new(FileId::new(10, 1), "src/app.js", "console.log(1)"),
        FileRecord::new(FileId::new(11, 2), "docs/.keep", ""),
    ]
}

#[test]
fn save_then_load_round_trips() {
    let storage = MemoryStorage::new();
    let (persistence, rx) = persistence(&storage);
    let files = sample_files();
    let recent = vec![RecentFileEntry {
        id: FileId::new(10, 1),
        timestamp: 77,
        cached_name: "src/app.js".to_string(),
    }];

    persistence.save(&files, &recent).unwrap();
    let loaded = persistence.load(&mut IdGenerator::new(), 0);

    assert!(matches!(loaded.outcome, LoadOutcome::Restored));
    assert_eq!(loaded.files, files);
    assert_eq!(loaded.recent, recent);
    assert!(rx.try_recv().is_err());
}

#[test]
fn writes_two_keys_in_the_documented_layout() {
    let storage = MemoryStorage::new();
    let (persistence, _rx) = persistence(&storage);
    persistence.save(&sample_files()[..1], &[]).unwrap();

    let files = storage.get_item("test.files").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&files).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{"id": "10-0", "name": "index.html", "content": "<p>hi</p>", "type": "html"}])
    );
    assert_eq!(storage.get_item("test.recent_files").unwrap().as_deref(), Some("[]"));
}

#[test]
fn missing_data_seeds_starter_document() {
    let storage = MemoryStorage::new();
    let (persistence, rx) = persistence(&storage);
    let loaded = persistence.load(&mut IdGenerator::new(), 5);

    assert!(matches!(loaded.outcome, LoadOutcome::Seeded));
    assert_eq!(loaded.files.len(), 1);
    assert_eq!(loaded.files[0].name, STARTER_FILE_NAME);
    assert_eq!(loaded.files[0].content, STARTER_FILE_CONTENT);
    assert!(loaded.recent.is_empty());
    assert!(rx.try_recv().is_err());
    assert_eq!(storage.get_item("test.files").unwrap(), None);
}

#[test]
fn corrupt_files_reset_to_seed_and_notify() {
    let storage = MemoryStorage::new();
    storage.set_item("test.files", "{not json").unwrap();
    storage.set_item("test.recent_files", "[]").unwrap();
    let (persistence, rx) = persistence(&storage);

    let loaded = persistence.load(&mut IdGenerator::new(), 5);

    assert!(matches!(
        loaded.outcome,
        LoadOutcome::Recovered(StorageError::Corrupt { .. })
    ));
    assert_eq!(loaded.files.len(), 1);
    assert_eq!(loaded.files[0].name, STARTER_FILE_NAME);
    let notice = rx.try_recv().unwrap();
    assert_eq!(notice.level, NoticeLevel::Warning);
}

#[test]
fn corrupt_recent_list_only_drops_recent() {
    let storage = MemoryStorage::new();
    let (persistence, _rx) = persistence(&storage);
    persistence.save(&sample_files(), &[]).unwrap();
    storage.set_item("test.recent_files", "[{").unwrap();

    let loaded = persistence.load(&mut IdGenerator::new(), 0);
    assert!(matches!(loaded.outcome, LoadOutcome::Restored));
    assert_eq!(loaded.files.len(), 3);
    assert!(loaded.recent.is_empty());
}

#[test]
fn load_filters_recent_entries_for_missing_files() {
    let storage = MemoryStorage::new();
    let (persistence, _rx) = persistence(&storage);
    let recent = vec![
        RecentFileEntry {
            id: FileId::new(99, 9),
            timestamp: 2,
            cached_name: "gone.js".to_string(),
        },
        RecentFileEntry {
            id: FileId::new(10, 0),
            timestamp: 1,
            cached_name: "index.html".to_string(),
        },
    ];
    persistence.save(&sample_files(), &recent).unwrap();

    let loaded = persistence.load(&mut IdGenerator::new(), 0);
    assert_eq!(loaded.recent.len(), 1);
    assert_eq!(loaded.recent[0].id, FileId::new(10, 0));
}

#[test]
fn load_advances_id_counter_past_stored_ids() {
    let storage = MemoryStorage::new();
    let (persistence, _rx) = persistence(&storage);
    persistence.save(&sample_files(), &[]).unwrap();

    let mut ids = IdGenerator::new();
    persistence.load(&mut ids, 0);
    assert_eq!(ids.next_id(11).seq(), 3);
}

#[test]
fn stored_empty_list_stays_empty() {
    let storage = MemoryStorage::new();
    let (persistence, _rx) = persistence(&storage);
    persistence.save(&[], &[]).unwrap();

    let loaded = persistence.load(&mut IdGenerator::new(), 0);
    assert!(matches!(loaded.outcome, LoadOutcome::Restored));
    assert!(loaded.files.is_empty());
}

#[test]
fn duplicate_stored_names_keep_the_first() {
    let storage = MemoryStorage::new();
    let (persistence, _rx) = persistence(&storage);
    let files = vec![
        FileRecord::new(FileId::new(1, 0), "a.txt", "first"),
        FileRecord::new(FileId::new(1, 1), "a.txt", "second"),
    ];
    persistence.save(&files, &[]).unwrap();

    let loaded = persistence.load(&mut IdGenerator::new(), 0);
    assert_eq!(loaded.files.len(), 1);
    assert_eq!(loaded.files[0].content, "first");
}

#[test]
fn failed_save_reports_error_and_notifies_once() {
    let storage = MemoryStorage::with_quota(16);
    let (persistence, rx) = persistence(&storage);

    let err = persistence.save(&sample_files(), &[]).unwrap_err();
    assert!(matches!(err, StorageError::QuotaExceeded { .. }));

    let notice = rx.try_recv().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(rx.try_recv().is_err());
}

#[test]
fn stored_names_breaking_path_grammar_are_dropped() {
    let storage = MemoryStorage::new();
    storage
        .set_item(
            "test.files",
            r#"[{"id":"1-0","name":"/bad name//x","content":"","type":"plaintext"},
                {"id":"1-1","name":"src/ok.js","content":"","type":"javascript"},
                {"id":"1-2","name":"noext","content":"","type":"plaintext"}]"#,
        )
        .unwrap();
    let (persistence, _rx) = persistence(&storage);

    let loaded = persistence.load(&mut IdGenerator::new(), 0);
    assert!(matches!(loaded.outcome, LoadOutcome::Restored));
    let names: Vec<&str> = loaded.files.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["src/ok.js"]);
}
