// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod claims;
pub mod credential;
pub mod diary;

pub use claims::{Claims, Role};
pub use credential::{OAuthProvider, OAuthType, StoredSession};
pub use diary::{
    clamp_score, DiaryCreateRequest, DiaryDraft, DiaryResult, DraftForm, Emotion, QuestionScore,
};
