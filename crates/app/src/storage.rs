//! Tab-scoped key/value storage used to restore state on back/forward.
//!
//! Writes are best effort. The controller logs failures and keeps going
//! with its in-memory state.

use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage quota exceeded: {needed} bytes needed, {available} available")]
    QuotaExceeded { needed: usize, available: usize },

    #[error("Storage is disabled")]
    Disabled,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub trait SessionStorage: Send {
    fn set_item(&mut self, key: &str, value: String) -> Result<(), StorageError>;

    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Writes `value` as JSON under `key`.
pub fn store_json<T: Serialize>(
    storage: &mut dyn SessionStorage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    storage.set_item(key, raw)
}

/// Reads the JSON blob under `key`. `Ok(None)` when nothing is stored.
pub fn load_json<T: DeserializeOwned>(
    storage: &dyn SessionStorage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match storage.get_item(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Key layout under a common prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    prefix: String,
}

impl StorageKeys {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn event(&self, route_key: &str) -> String {
        format!("{}:event:{}", self.prefix, route_key)
    }

    pub fn checkout(&self) -> String {
        format!("{}:checkout", self.prefix)
    }

    pub fn transaction(&self) -> String {
        format!("{}:transaction", self.prefix)
    }

    pub fn business(&self, slug: &str) -> String {
        format!("{}:business:{}", self.prefix, slug)
    }
}

/// In-memory storage with an optional byte quota over keys and values.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            items: HashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl SessionStorage for MemoryStorage {
    fn set_item(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        if let Some(quota) = self.quota_bytes {
            let available = quota.saturating_sub(self.used_bytes_without(key));
            let needed = key.len() + value.len();
            if needed > available {
                return Err(StorageError::QuotaExceeded { needed, available });
            }
        }
        self.items.insert(key.to_string(), value);
        Ok(())
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

/// Storage that refuses every access, as in a private browsing tab.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledStorage;

impl SessionStorage for DisabledStorage {
    fn set_item(&mut self, _key: &str, _value: String) -> Result<(), StorageError> {
        Err(StorageError::Disabled)
    }

    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Disabled)
    }

    fn remove_item(&mut self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Disabled)
    }
}
