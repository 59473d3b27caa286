use super::*;

// =============================================================
// MemoryStorage
// =============================================================

#[test]
fn memory_storage_starts_empty() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get(ACCESS_TOKEN_KEY), None);
}

#[test]
fn memory_storage_set_then_get() {
    let storage = MemoryStorage::new();
    storage.set(ACCESS_TOKEN_KEY, "abc");
    assert_eq!(storage.get(ACCESS_TOKEN_KEY), Some("abc".to_owned()));
}

#[test]
fn memory_storage_overwrites_existing_value() {
    let storage = MemoryStorage::new();
    storage.set(REFRESH_TOKEN_KEY, "old");
    storage.set(REFRESH_TOKEN_KEY, "new");
    assert_eq!(storage.get(REFRESH_TOKEN_KEY), Some("new".to_owned()));
}

#[test]
fn memory_storage_remove_clears_only_named_key() {
    let storage = MemoryStorage::new();
    storage.set(ACCESS_TOKEN_KEY, "a");
    storage.set(USER_DATA_KEY, "u");
    storage.remove(ACCESS_TOKEN_KEY);
    assert_eq!(storage.get(ACCESS_TOKEN_KEY), None);
    assert_eq!(storage.get(USER_DATA_KEY), Some("u".to_owned()));
}

#[test]
fn memory_storage_remove_missing_key_is_noop() {
    let storage = MemoryStorage::new();
    storage.remove("nope");
    assert_eq!(storage.get("nope"), None);
}
