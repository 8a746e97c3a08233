// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Navigation capability and per-mount latches.

use std::sync::atomic::{AtomicBool, Ordering};

pub const LOGIN_PATH: &str = "/login";
pub const EXPIRED_LOGIN_PATH: &str = "/login?reason=expired";
pub const INVALID_CALLBACK_PATH: &str = "/login?error=invalid_callback";
pub const DUPLICATE_EMAIL_PATH: &str = "/login/duplicate-email";
pub const HOME_PATH: &str = "/home";
pub const REGISTER_PATH: &str = "/register";
pub const REGISTER_QUESTIONS_PATH: &str = "/register/questions";
pub const ADMIN_HOME_PATH: &str = "/admin/users";
pub const DIARY_WRITE_PATH: &str = "/diary/write";
pub const DIARY_SUMMARY_PATH: &str = "/diary/summary";

/// Client-side router. `replace` swaps the current history entry.
pub trait Navigator: Send + Sync {
    fn replace(&self, path: &str);
}

/// Outcome of a route-level check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(String),
}

impl RouteDecision {
    pub fn redirect(path: impl Into<String>) -> Self {
        RouteDecision::Redirect(path.into())
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, RouteDecision::Allow)
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            RouteDecision::Allow => None,
            RouteDecision::Redirect(path) => Some(path),
        }
    }
}

/// One-shot latch for effects that must run once per mount even if the
/// host invokes the mount hook twice.
#[derive(Debug, Default)]
pub struct MountLatch(AtomicBool);

impl MountLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` for the first caller only.
    pub fn try_start(&self) -> bool {
        !self.0.swap(true, Ordering::SeqCst)
    }

    pub fn is_started(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Append `next=<path>` to a login URL, URL-encoding the path.
pub fn with_return_target(base: &str, next: &str) -> String {
    let sep = if base.contains('?') { '&' } else { '?' };
    format!("{}{}next={}", base, sep, urlencoding::encode(next))
}
