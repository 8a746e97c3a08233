// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules (session path guard).

pub mod auth;

pub use auth::{classify_path, require_session, PathClass};
