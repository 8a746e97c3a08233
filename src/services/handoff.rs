// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Diary authoring → summary hand-off.
//!
//! The authoring form and the summary view are separate page mounts with a
//! full navigation in between. The form only writes a draft; the summary
//! view owns the create call and reconciles three storage slots:
//!
//! 1. A stored result wins: show it and clear everything.
//! 2. An in-flight marker means another mount already submitted: poll for
//!    its result until the deadline, then fall back to the write step.
//! 3. Otherwise submit the draft ourselves, guarded by the marker.
//!
//! Two idempotency guards cooperate: the per-mount latch stops a doubled
//! mount hook from submitting twice, and the stored marker stops a second
//! mount (back navigation, reload) from doing the same.

use crate::error::ApiError;
use crate::models::{DiaryCreateRequest, DiaryDraft, DiaryResult, DraftForm};
use crate::services::diary_api::{extract_result, DiaryApi};
use crate::services::diary_store::DiaryStore;
use crate::services::navigation::{MountLatch, Navigator, DIARY_SUMMARY_PATH, DIARY_WRITE_PATH};
use crate::services::poll::await_with_deadline;
use crate::time_utils::iso_date_to_utc_noon;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::watch;

/// Default probe interval while waiting on another mount's result.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(150);
/// Default upper bound on that wait.
pub const DEFAULT_RESULT_TIMEOUT: Duration = Duration::from_millis(8000);

/// Timer settings for the summary view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandoffConfig {
    pub poll_interval: Duration,
    pub result_timeout: Duration,
}

impl Default for HandoffConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            result_timeout: DEFAULT_RESULT_TIMEOUT,
        }
    }
}

/// Hand-off state machine positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffState {
    Idle,
    SubmittingDraft,
    AwaitingResult,
    HasResult,
    NoDraft,
    ShowResult,
    RedirectToAuthoring,
    SessionExpired,
}

/// What the summary view renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub loading: bool,
    pub draft: Option<DiaryDraft>,
    pub summary: String,
}

impl Default for SummaryView {
    fn default() -> Self {
        Self {
            loading: true,
            draft: None,
            summary: String::new(),
        }
    }
}

/// How a mount finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountOutcome {
    ShowResult {
        summary: String,
        draft: Option<DiaryDraft>,
    },
    RedirectToAuthoring,
    /// The backend rejected the credential. The client already navigated
    /// to the expired login page, so the view stays put.
    SessionExpired,
    /// The mount hook already ran for this page instance.
    AlreadyMounted,
    /// The page was torn down before reaching a terminal state.
    Unmounted,
}

/// Validate the authoring form, store the draft and return the route to
/// navigate to.
pub fn submit_draft(
    form: DraftForm,
    store: &DiaryStore,
) -> Result<&'static str, validator::ValidationErrors> {
    let draft = form.into_draft()?;
    store.write_draft(&draft);
    tracing::debug!(emotion = draft.emotion.as_str(), "Diary draft stored");
    Ok(DIARY_SUMMARY_PATH)
}

/// Build the create-diary request for a draft. `None` if the draft date is
/// not a `YYYY-MM-DD` calendar date.
pub fn build_create_request(draft: &DiaryDraft) -> Option<DiaryCreateRequest> {
    Some(DiaryCreateRequest {
        date: iso_date_to_utc_noon(&draft.created_at_iso)?,
        emotion: draft.emotion,
        content: draft.content.clone(),
        question_scores: draft.question_scores(),
    })
}

/// Resolves once the page owning `alive` is unmounted or dropped.
async fn torn_down(mut alive: watch::Receiver<bool>) {
    loop {
        if !*alive.borrow_and_update() {
            return;
        }
        if alive.changed().await.is_err() {
            return;
        }
    }
}

/// One mounted instance of the summary view.
pub struct SummaryPage<A: DiaryApi, N: Navigator> {
    store: DiaryStore,
    api: A,
    navigator: N,
    config: HandoffConfig,
    latch: MountLatch,
    alive: watch::Sender<bool>,
    state: Mutex<HandoffState>,
    view: Mutex<SummaryView>,
}

impl<A: DiaryApi, N: Navigator> SummaryPage<A, N> {
    pub fn new(store: DiaryStore, api: A, navigator: N, config: HandoffConfig) -> Self {
        Self {
            store,
            api,
            navigator,
            config,
            latch: MountLatch::new(),
            alive: watch::channel(true).0,
            state: Mutex::new(HandoffState::Idle),
            view: Mutex::new(SummaryView::default()),
        }
    }

    pub fn state(&self) -> HandoffState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Snapshot of the rendered view.
    pub fn view(&self) -> SummaryView {
        self.view.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_alive(&self) -> bool {
        *self.alive.borrow()
    }

    /// Tear the page down. Pending polls stop; an outstanding create call is
    /// left to finish but no longer touches the view or the router.
    pub fn unmount(&self) {
        self.alive.send_replace(false);
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    fn transition(&self, next: HandoffState) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        tracing::debug!(from = ?*state, to = ?next, "Diary hand-off transition");
        *state = next;
    }

    fn update_view(&self, f: impl FnOnce(&mut SummaryView)) {
        if self.is_alive() {
            f(&mut self.view.lock().unwrap_or_else(|e| e.into_inner()));
        }
    }

    fn show(&self, result: DiaryResult, draft: Option<DiaryDraft>) -> MountOutcome {
        self.transition(HandoffState::ShowResult);
        self.update_view(|view| {
            view.loading = false;
            view.summary = result.summary.clone();
            if draft.is_some() {
                view.draft = draft.clone();
            }
        });
        MountOutcome::ShowResult {
            summary: result.summary,
            draft,
        }
    }

    fn go_write(&self) -> MountOutcome {
        self.transition(HandoffState::RedirectToAuthoring);
        if !self.is_alive() {
            return MountOutcome::Unmounted;
        }
        self.update_view(|view| view.loading = false);
        self.navigator.replace(DIARY_WRITE_PATH);
        MountOutcome::RedirectToAuthoring
    }

    /// Consume a result found in storage along with its draft.
    fn consume(&self, result: DiaryResult) -> MountOutcome {
        let draft = self.store.read_draft();
        self.store.clear_all();
        self.show(result, draft)
    }

    /// Mount hook. Runs the hand-off once per page instance.
    pub async fn mount(&self) -> MountOutcome {
        if !self.latch.try_start() {
            return MountOutcome::AlreadyMounted;
        }

        if let Some(result) = self.store.read_result() {
            self.transition(HandoffState::HasResult);
            return self.consume(result);
        }

        if self.store.is_creating() {
            return self.await_other_mount().await;
        }

        self.submit().await
    }

    async fn await_other_mount(&self) -> MountOutcome {
        self.transition(HandoffState::AwaitingResult);
        tracing::debug!("Create already in flight, waiting for its result");

        let store = self.store.clone();
        let wait = await_with_deadline(
            || store.read_result(),
            self.config.poll_interval,
            self.config.result_timeout,
        );

        let found = tokio::select! {
            found = wait => found,
            _ = torn_down(self.alive.subscribe()) => return MountOutcome::Unmounted,
        };

        match found {
            Some(result) => self.consume(result),
            None => {
                tracing::info!(
                    timeout_ms = self.config.result_timeout.as_millis() as u64,
                    "No diary result before deadline, returning to write step"
                );
                self.store.clear_creating();
                self.go_write()
            }
        }
    }

    async fn submit(&self) -> MountOutcome {
        let Some(draft) = self.store.read_draft() else {
            self.transition(HandoffState::NoDraft);
            return self.go_write();
        };
        let Some(request) = build_create_request(&draft) else {
            tracing::warn!(date = %draft.created_at_iso, "Diary draft has an unusable date");
            self.transition(HandoffState::NoDraft);
            return self.go_write();
        };

        self.transition(HandoffState::SubmittingDraft);
        self.update_view(|view| view.draft = Some(draft.clone()));
        self.store.mark_creating();

        let response = self.api.create_diary(&request).await;

        let result = match response {
            Ok(envelope) => extract_result(&envelope),
            Err(ApiError::Unauthorized) => {
                // Draft stays so the page can resubmit after login.
                self.store.clear_creating();
                self.transition(HandoffState::SessionExpired);
                return MountOutcome::SessionExpired;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Create diary failed");
                None
            }
        };

        let Some(result) = result else {
            self.store.clear_creating();
            return self.go_write();
        };

        self.store.write_result(&result);
        self.store.clear_creating();

        if !self.is_alive() {
            tracing::info!("Summary view gone, leaving diary result for the next mount");
            self.transition(HandoffState::HasResult);
            return MountOutcome::Unmounted;
        }

        self.store.clear_all();
        self.show(result, Some(draft))
    }
}
