// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth credential model held in tab-scoped storage.

use crate::error::UnknownValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome tag the backend attaches to an OAuth login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OAuthType {
    /// Existing account, fully registered
    Success,
    /// First login, registration still required
    New,
    /// Email already bound to another provider
    DuplicateEmail,
}

impl OAuthType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthType::Success => "SUCCESS",
            OAuthType::New => "NEW",
            OAuthType::DuplicateEmail => "DUPLICATE_EMAIL",
        }
    }
}

impl FromStr for OAuthType {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUCCESS" => Ok(OAuthType::Success),
            "NEW" => Ok(OAuthType::New),
            "DUPLICATE_EMAIL" => Ok(OAuthType::DuplicateEmail),
            _ => Err(UnknownValue(s.to_string())),
        }
    }
}

impl fmt::Display for OAuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity provider the user picked on the login screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    Google,
    Naver,
    Kakao,
}

impl OAuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
            OAuthProvider::Naver => "naver",
            OAuthProvider::Kakao => "kakao",
        }
    }
}

impl FromStr for OAuthProvider {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "google" => Ok(OAuthProvider::Google),
            "naver" => Ok(OAuthProvider::Naver),
            "kakao" => Ok(OAuthProvider::Kakao),
            _ => Err(UnknownValue(s.to_string())),
        }
    }
}

/// Credential as read back from storage.
///
/// Both fields are independently optional: a tab may hold a token whose
/// flow tag was lost, or nothing at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredSession {
    pub flow_type: Option<OAuthType>,
    pub token: Option<String>,
}
