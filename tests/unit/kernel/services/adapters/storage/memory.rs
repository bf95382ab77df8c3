use super::*;

#[test]
fn missing_key_reads_as_none() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get_item("nope").unwrap(), None);
}

#[test]
fn clones_share_items() {
    let storage = MemoryStorage::new();
    let other = storage.clone();

    storage.set_item("k", "v").unwrap();
    assert_eq!(other.get_item("k").unwrap().as_deref(), Some("v"));

    other.remove_item("k").unwrap();
    assert_eq!(storage.get_item("k").unwrap(), None);
}

#[test]
fn quota_counts_keys_and_values() {
    let storage = MemoryStorage::with_quota(10);
    storage.set_item("ab", "cdef").unwrap();
    assert_eq!(storage.used_bytes(), 6);

    let err = storage.set_item("gh", "ijk").unwrap_err();
    assert!(matches!(err, StorageError::QuotaExceeded { limit: 10, .. }));
    assert_eq!(storage.get_item("gh").unwrap(), None);
}

#[test]
fn overwrite_only_counts_the_new_value() {
    let storage = MemoryStorage::with_quota(10);
    storage.set_item("ab", "cdefghij").unwrap();
    storage.set_item("ab", "12345678").unwrap();
    assert_eq!(storage.get_item("ab").unwrap().as_deref(), Some("12345678"));
}

#[test]
fn shared_quota_view_limits_writes_only_through_it() {
    let storage = MemoryStorage::new();
    let limited = storage.with_shared_quota(Some(4));

    storage.set_item("big", "0123456789").unwrap();
    assert!(limited.set_item("x", "y").is_err());
    assert_eq!(limited.get_item("big").unwrap().as_deref(), Some("0123456789"));
}
