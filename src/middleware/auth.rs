// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session cookie path guard.
//!
//! Runs before any page is served. It only checks that a session cookie is
//! present; the page-level guards validate the credential once mounted.

use crate::services::navigation::{with_return_target, LOGIN_PATH};
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Static asset extensions served without a session.
const ASSET_EXTENSIONS: &[&str] = &[
    ".svg", ".png", ".jpg", ".jpeg", ".webp", ".ico", ".css", ".js", ".map", ".woff", ".woff2",
];

/// How the guard treats a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    Asset,
    Public,
    Protected,
}

/// Backend API paths bypass the guard entirely.
pub fn is_api_path(path: &str) -> bool {
    path.starts_with("/api")
}

fn is_asset_path(path: &str) -> bool {
    path.starts_with("/_next")
        || path == "/favicon.ico"
        || ASSET_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

fn is_public_path(path: &str) -> bool {
    path == "/login"
        || path.starts_with("/login/")
        || path == "/register"
        || path.starts_with("/register/")
        || path.starts_with("/callback")
        || path.starts_with("/oauth2")
}

pub fn classify_path(path: &str) -> PathClass {
    if is_asset_path(path) {
        PathClass::Asset
    } else if is_public_path(path) {
        PathClass::Public
    } else {
        PathClass::Protected
    }
}

/// Middleware that requires a session cookie on protected paths.
///
/// Missing cookies redirect to `/login?next=<path>`.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();

    if is_api_path(path) || classify_path(path) != PathClass::Protected {
        return next.run(request).await;
    }

    let has_session = jar
        .get(&state.config.session_cookie_name)
        .is_some_and(|cookie| !cookie.value().is_empty());

    if has_session {
        return next.run(request).await;
    }

    let target = with_return_target(LOGIN_PATH, path);
    tracing::debug!(path = %path, "No session cookie, redirecting to login");
    Redirect::temporary(&target).into_response()
}
