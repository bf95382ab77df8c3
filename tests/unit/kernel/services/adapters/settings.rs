use super::*;
use crate::kernel::services::ports::settings::{DEFAULT_NAMESPACE, DEFAULT_RECENT_LIMIT};

#[test]
fn write_default_settings_creates_file_once() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nested").join("settings.json");

    write_default_settings(&path).unwrap();
    let loaded = load_settings_from(&path).unwrap();
    assert_eq!(loaded, Settings::default());

    std::fs::write(&path, r#"{"recent": {"limit": 3}}"#).unwrap();
    write_default_settings(&path).unwrap();
    assert_eq!(load_settings_from(&path).unwrap().recent.limit, 3);
}

#[test]
fn partial_settings_fill_in_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("settings.json");
    std::fs::write(&path, r#"{"storage": {"data_dir": "/tmp/zplay-data"}}"#).unwrap();

    let settings = load_settings_from(&path).unwrap();
    assert_eq!(settings.storage.namespace, DEFAULT_NAMESPACE);
    assert_eq!(
        settings.storage.data_dir.as_deref(),
        Some(std::path::Path::new("/tmp/zplay-data"))
    );
    assert_eq!(settings.recent.limit, DEFAULT_RECENT_LIMIT);
    assert_eq!(settings.log.filter, None);
}

#[test]
fn unreadable_settings_return_none() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("settings.json");
    assert!(load_settings_from(&path).is_none());

    std::fs::write(&path, "{ not json").unwrap();
    assert!(load_settings_from(&path).is_none());
}

#[test]
fn zero_recent_limit_is_raised_to_one() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("settings.json");
    std::fs::write(&path, r#"{"recent": {"limit": 0}}"#).unwrap();

    assert_eq!(load_settings_from(&path).unwrap().recent.limit, 1);
}
