// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route-level session guards.
//!
//! Two guards layer over the page tree:
//! - the authenticated-area guard requires some token and evicts it once the
//!   `exp` claim has passed;
//! - the admin-area guard, nested inside it, requires `role == ADMIN`.
//!
//! Both are advisory redirects driven by unverified claims.

use crate::services::auth_storage::AuthStorage;
use crate::services::navigation::{
    with_return_target, MountLatch, Navigator, RouteDecision, EXPIRED_LOGIN_PATH, HOME_PATH,
    LOGIN_PATH,
};
use crate::services::token::decode_claims;
use crate::time_utils::now_millis;
use std::sync::OnceLock;

/// Which guard a route scope applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardKind {
    Authenticated,
    Admin,
}

impl GuardKind {
    pub fn evaluate(&self, auth: &AuthStorage, now_ms: i64) -> RouteDecision {
        match self {
            GuardKind::Authenticated => authenticated_area_guard(auth, now_ms),
            GuardKind::Admin => admin_area_guard(auth),
        }
    }
}

/// Guard for the signed-in area.
///
/// A token that fails to decode is let through: only an explicit, elapsed
/// `exp` evicts the credential.
pub fn authenticated_area_guard(auth: &AuthStorage, now_ms: i64) -> RouteDecision {
    let Some(token) = auth.token().filter(|t| !t.is_empty()) else {
        tracing::debug!("No credential, redirecting to login");
        return RouteDecision::redirect(LOGIN_PATH);
    };

    let expired = decode_claims(&token)
        .and_then(|claims| claims.exp())
        .is_some_and(|exp| exp.saturating_mul(1000) < now_ms);

    if expired {
        tracing::info!("Credential expired, clearing session");
        auth.clear_session();
        return RouteDecision::redirect(EXPIRED_LOGIN_PATH);
    }

    RouteDecision::Allow
}

/// Guard for the admin area. Anything short of an ADMIN role claim,
/// including an undecodable token, goes back to the user landing page.
pub fn admin_area_guard(auth: &AuthStorage) -> RouteDecision {
    let is_admin = auth
        .token()
        .filter(|t| !t.is_empty())
        .and_then(|token| decode_claims(&token))
        .is_some_and(|claims| claims.is_admin());

    if is_admin {
        RouteDecision::Allow
    } else {
        tracing::debug!("Non-admin claims in admin area");
        RouteDecision::redirect(HOME_PATH)
    }
}

/// Evict the credential after the backend rejected it, returning the login
/// URL that brings the user back to `origin` afterwards.
pub fn expire_session(auth: &AuthStorage, origin: &str) -> String {
    auth.clear_session();
    with_return_target(EXPIRED_LOGIN_PATH, origin)
}

/// A mounted route scope with its guard chain.
///
/// The chain is evaluated outermost first and stops at the first redirect.
/// Evaluation and the resulting navigation happen once per mount.
pub struct GuardedArea<N: Navigator> {
    chain: Vec<GuardKind>,
    auth: AuthStorage,
    navigator: N,
    latch: MountLatch,
    decision: OnceLock<RouteDecision>,
}

impl<N: Navigator> GuardedArea<N> {
    pub fn new(chain: Vec<GuardKind>, auth: AuthStorage, navigator: N) -> Self {
        Self {
            chain,
            auth,
            navigator,
            latch: MountLatch::new(),
            decision: OnceLock::new(),
        }
    }

    /// Signed-in user pages.
    pub fn user_area(auth: AuthStorage, navigator: N) -> Self {
        Self::new(vec![GuardKind::Authenticated], auth, navigator)
    }

    /// Admin pages, nested in the signed-in area.
    pub fn admin_area(auth: AuthStorage, navigator: N) -> Self {
        Self::new(vec![GuardKind::Authenticated, GuardKind::Admin], auth, navigator)
    }

    /// Run the guard chain using the wall clock.
    pub fn on_mount(&self) -> RouteDecision {
        self.on_mount_at(now_millis())
    }

    /// Run the guard chain against `now_ms`. Repeat calls return the first
    /// decision without re-navigating.
    pub fn on_mount_at(&self, now_ms: i64) -> RouteDecision {
        if !self.latch.try_start() {
            return self
                .decision
                .get()
                .cloned()
                .unwrap_or(RouteDecision::Allow);
        }

        let decision = self
            .chain
            .iter()
            .map(|guard| guard.evaluate(&self.auth, now_ms))
            .find(|d| !d.is_allow())
            .unwrap_or(RouteDecision::Allow);

        if let Some(target) = decision.redirect_target() {
            self.navigator.replace(target);
        }

        self.decision.get_or_init(|| decision).clone()
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }
}
