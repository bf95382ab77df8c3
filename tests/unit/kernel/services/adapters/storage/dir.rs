use super::*;
use tempfile::tempdir;

#[test]
fn set_then_get_round_trips_through_disk() {
    let tmp = tempdir().unwrap();
    let storage = DirStorage::new(tmp.path().join("store"));

    assert_eq!(storage.get_item("zplay.files").unwrap(), None);
    storage.set_item("zplay.files", "[1,2]").unwrap();

    assert_eq!(storage.get_item("zplay.files").unwrap().as_deref(), Some("[1,2]"));
    assert!(tmp.path().join("store").join("zplay.files.json").is_file());
}

#[test]
fn overwrite_leaves_no_temp_file() {
    let tmp = tempdir().unwrap();
    let storage = DirStorage::new(tmp.path());

    storage.set_item("k", "one").unwrap();
    storage.set_item("k", "two").unwrap();

    assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("two"));
    let entries: Vec<_> = std::fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(entries, vec!["k.json".to_string()]);
}

#[test]
fn keys_are_sanitized_into_file_names() {
    let storage = DirStorage::new("/data");
    assert_eq!(
        storage.path_for("../evil/key"),
        std::path::PathBuf::from("/data/.._evil_key.json")
    );
}

#[test]
fn remove_is_idempotent() {
    let tmp = tempdir().unwrap();
    let storage = DirStorage::new(tmp.path());

    storage.set_item("k", "v").unwrap();
    storage.remove_item("k").unwrap();
    storage.remove_item("k").unwrap();
    assert_eq!(storage.get_item("k").unwrap(), None);
}
