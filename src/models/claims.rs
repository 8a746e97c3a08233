// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Unverified token claims.
//!
//! These are read from the payload segment of the bearer token without any
//! signature check. They drive navigation hints only; the backend makes
//! every real authorization decision.

use serde_json::{Map, Value};

/// Fallback label shown when the token carries no usable name.
pub const DEFAULT_DISPLAY_NAME: &str = "사용자";

/// Role claim values understood by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

/// Decoded claims payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn role(&self) -> Option<Role> {
        match self.0.get("role").and_then(Value::as_str)? {
            "ADMIN" => Some(Role::Admin),
            "USER" => Some(Role::User),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }

    /// Expiry in epoch seconds. Fractional values are truncated.
    pub fn exp(&self) -> Option<i64> {
        let exp = self.0.get("exp")?;
        exp.as_i64().or_else(|| exp.as_f64().map(|f| f as i64))
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// Email claim, falling back to the `userEmail` spelling some tokens use.
    pub fn email(&self) -> Option<&str> {
        self.0
            .get("email")
            .and_then(Value::as_str)
            .or_else(|| self.0.get("userEmail").and_then(Value::as_str))
    }

    /// Name for the navigation shell.
    pub fn display_name(&self) -> String {
        match self.name().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => DEFAULT_DISPLAY_NAME.to_string(),
        }
    }
}
