//! Persisted client-side key/value storage.
//!
//! The session store and the HTTP gateway share three durable keys
//! (access token, refresh token, serialized user profile). Both read and
//! write them through the [`KeyValueStorage`] trait so the browser's
//! `localStorage` can be swapped for an in-memory map on the server render
//! path and in tests.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;

/// Durable key holding the short-lived bearer token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Durable key holding the long-lived refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
/// Durable key holding the serialized user profile.
pub const USER_DATA_KEY: &str = "userData";

/// String key/value storage over independent named keys.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory storage used on the server render path and in tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

/// Browser `localStorage` backend. Requires a browser environment; all
/// failures (storage disabled, quota) degrade to "key absent" rather than
/// panicking during hydration.
#[cfg(feature = "hydrate")]
#[derive(Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
impl BrowserStorage {
    fn raw() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

#[cfg(feature = "hydrate")]
impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::raw()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::raw() {
            if storage.set_item(key, value).is_err() {
                log::warn!("localStorage write failed for {key}");
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::raw() {
            let _ = storage.remove_item(key);
        }
    }
}
