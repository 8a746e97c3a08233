// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - client session logic.

pub mod auth_storage;
pub mod callback;
pub mod diary_api;
pub mod diary_store;
pub mod guard;
pub mod handoff;
pub mod navigation;
pub mod poll;
pub mod storage;
pub mod token;

pub use auth_storage::AuthStorage;
pub use callback::{handle_oauth_callback, CallbackConfig, CallbackOutcome, CallbackParams};
pub use diary_api::{DiaryApi, HttpDiaryClient};
pub use diary_store::DiaryStore;
pub use guard::{admin_area_guard, authenticated_area_guard, GuardKind, GuardedArea};
pub use handoff::{HandoffConfig, HandoffState, MountOutcome, SummaryPage, SummaryView};
pub use navigation::{MountLatch, Navigator, RouteDecision};
pub use poll::await_with_deadline;
pub use storage::{DetachedStorage, MemoryStorage, SessionStorage, SharedStorage};
pub use token::decode_claims;
