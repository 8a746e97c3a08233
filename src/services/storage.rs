// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tab-scoped key/value storage.
//!
//! Every piece of client session state (credential, provider, diary
//! hand-off) lives behind [`SessionStorage`]. Access is synchronous and
//! never fails; a missing backend simply reads as empty.

use dashmap::DashMap;
use std::sync::Arc;

/// Key/value store with browser session-storage semantics.
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// In-memory storage for one tab.
///
/// Clones share the same map, so two page mounts in the same tab see each
/// other's writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<DashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).map(|v| v.value().clone())
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }

    fn remove_item(&self, key: &str) {
        self.items.remove(key);
    }
}

/// Storage for contexts with no session storage at all (server rendering).
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedStorage;

impl SessionStorage for DetachedStorage {
    fn get_item(&self, _key: &str) -> Option<String> {
        None
    }

    fn set_item(&self, _key: &str, _value: &str) {}

    fn remove_item(&self, _key: &str) {}
}

/// Shared handle to whichever storage backs the current tab.
pub type SharedStorage = Arc<dyn SessionStorage>;
