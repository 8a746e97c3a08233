// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Diary hand-off slots in tab-scoped storage.
//!
//! Three keys move together: the draft written by the authoring form, the
//! result written once the backend answers, and the in-flight marker set
//! while a create call is outstanding.

use crate::models::{DiaryDraft, DiaryResult};
use crate::services::storage::SharedStorage;
use serde_json::Value;

pub const KEY_DIARY_DRAFT: &str = "diary:draft";
pub const KEY_DIARY_RESULT: &str = "diary:result";
pub const KEY_DIARY_CREATING: &str = "diary:creating";

const CREATING_FLAG: &str = "1";

#[derive(Clone)]
pub struct DiaryStore {
    storage: SharedStorage,
}

impl DiaryStore {
    pub fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }

    fn read_json(&self, key: &str) -> Option<Value> {
        let raw = self.storage.get_item(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(key, error = %e, "Ignoring corrupt stored value");
                None
            }
        }
    }

    pub fn write_draft(&self, draft: &DiaryDraft) {
        match serde_json::to_string(draft) {
            Ok(json) => self.storage.set_item(KEY_DIARY_DRAFT, &json),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize diary draft"),
        }
    }

    /// Stored draft, or `None` when absent or malformed.
    pub fn read_draft(&self) -> Option<DiaryDraft> {
        self.read_json(KEY_DIARY_DRAFT)
            .and_then(|v| DiaryDraft::from_value(&v))
    }

    pub fn write_result(&self, result: &DiaryResult) {
        match serde_json::to_string(result) {
            Ok(json) => self.storage.set_item(KEY_DIARY_RESULT, &json),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize diary result"),
        }
    }

    /// Stored result, or `None` when absent or lacking a string summary.
    pub fn read_result(&self) -> Option<DiaryResult> {
        self.read_json(KEY_DIARY_RESULT)
            .and_then(|v| DiaryResult::from_value(&v))
    }

    pub fn is_creating(&self) -> bool {
        self.storage.get_item(KEY_DIARY_CREATING).as_deref() == Some(CREATING_FLAG)
    }

    pub fn mark_creating(&self) {
        self.storage.set_item(KEY_DIARY_CREATING, CREATING_FLAG);
    }

    pub fn clear_creating(&self) {
        self.storage.remove_item(KEY_DIARY_CREATING);
    }

    /// Terminal cleanup: draft, result and marker go together.
    pub fn clear_all(&self) {
        self.storage.remove_item(KEY_DIARY_RESULT);
        self.storage.remove_item(KEY_DIARY_DRAFT);
        self.storage.remove_item(KEY_DIARY_CREATING);
    }
}
