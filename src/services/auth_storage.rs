// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Credential accessors over tab-scoped storage.

use crate::models::{OAuthProvider, OAuthType, StoredSession};
use crate::services::storage::SharedStorage;

pub const KEY_OAUTH_TYPE: &str = "oauth:type";
pub const KEY_OAUTH_TOKEN: &str = "oauth:token";
pub const KEY_OAUTH_PROVIDER: &str = "oauth:provider";

/// The single credential slot of a tab.
#[derive(Clone)]
pub struct AuthStorage {
    storage: SharedStorage,
}

impl AuthStorage {
    pub fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }

    pub fn set_provider(&self, provider: OAuthProvider) {
        self.storage.set_item(KEY_OAUTH_PROVIDER, provider.as_str());
    }

    /// Stored provider, or `None` for anything but the three known names.
    pub fn get_provider(&self) -> Option<OAuthProvider> {
        self.storage.get_item(KEY_OAUTH_PROVIDER)?.parse().ok()
    }

    pub fn set_session(&self, flow_type: OAuthType, token: &str) {
        self.storage.set_item(KEY_OAUTH_TYPE, flow_type.as_str());
        self.storage.set_item(KEY_OAUTH_TOKEN, token);
    }

    pub fn get_session(&self) -> StoredSession {
        StoredSession {
            flow_type: self
                .storage
                .get_item(KEY_OAUTH_TYPE)
                .and_then(|t| t.parse().ok()),
            token: self.storage.get_item(KEY_OAUTH_TOKEN),
        }
    }

    /// Current bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.storage.get_item(KEY_OAUTH_TOKEN)
    }

    /// Replace the token only; flow type and provider are left alone.
    pub fn update_token(&self, next_token: &str) {
        self.storage.set_item(KEY_OAUTH_TOKEN, next_token);
    }

    /// Drop the credential. The provider choice survives.
    pub fn clear_session(&self) {
        self.storage.remove_item(KEY_OAUTH_TYPE);
        self.storage.remove_item(KEY_OAUTH_TOKEN);
        tracing::debug!("Session credential cleared");
    }
}
