// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Care diary client session core and edge server.
//!
//! This crate provides the session store, token decoding, route guards and
//! the diary draft/result hand-off used by the care diary frontend, plus
//! the edge server that guards and serves the exported pages.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;

/// Shared application state.
pub struct AppState {
    pub config: Config,
}
