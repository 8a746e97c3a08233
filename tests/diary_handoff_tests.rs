// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Diary summary hand-off tests.
//!
//! These drive the summary view's mount logic against in-memory storage,
//! a scripted backend and a recording router, on a paused tokio clock.

use care_diary::error::ApiError;
use care_diary::models::{DiaryResult, DraftForm, Emotion};
use care_diary::services::diary_store::{KEY_DIARY_CREATING, KEY_DIARY_DRAFT, KEY_DIARY_RESULT};
use care_diary::services::handoff::submit_draft;
use care_diary::services::{
    HandoffConfig, HandoffState, MountOutcome, SessionStorage, SummaryPage,
};
use chrono::NaiveDate;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

mod common;
use common::{sample_draft, tab, FakeDiaryApi, RecordingNavigator};

fn page(
    t: &common::Tab,
    api: FakeDiaryApi,
) -> SummaryPage<FakeDiaryApi, RecordingNavigator> {
    SummaryPage::new(
        t.diary.clone(),
        api,
        RecordingNavigator::new(),
        HandoffConfig::default(),
    )
}

fn assert_slots_cleared(t: &common::Tab) {
    assert!(!t.storage.contains_key(KEY_DIARY_DRAFT));
    assert!(!t.storage.contains_key(KEY_DIARY_RESULT));
    assert!(!t.storage.contains_key(KEY_DIARY_CREATING));
}

#[tokio::test]
async fn test_malformed_drafts_redirect_without_backend_call() {
    let malformed = [
        "not json at all".to_string(),
        json!(null).to_string(),
        json!({"content": "x", "reflections": [1], "createdAtISO": "2026-01-01"}).to_string(),
        json!({"emotion": 3, "content": "x", "reflections": [1], "createdAtISO": "2026-01-01"}).to_string(),
        json!({"emotion": "ANGRY", "content": "x", "reflections": [1], "createdAtISO": "2026-01-01"}).to_string(),
        json!({"emotion": "SAD", "content": ["x"], "reflections": [1], "createdAtISO": "2026-01-01"}).to_string(),
        json!({"emotion": "SAD", "content": "x", "reflections": {"0": 1}, "createdAtISO": "2026-01-01"}).to_string(),
        json!({"emotion": "SAD", "content": "x", "reflections": 5, "createdAtISO": "2026-01-01"}).to_string(),
        json!({"emotion": "SAD", "content": "x", "reflections": [1]}).to_string(),
        json!({"emotion": "SAD", "content": "x", "reflections": [1], "createdAtISO": "not-a-date"}).to_string(),
    ];

    for raw in malformed {
        let t = tab();
        t.storage.set_item(KEY_DIARY_DRAFT, &raw);
        let api = FakeDiaryApi::with_summary("never");
        let p = page(&t, api.clone());

        let outcome = p.mount().await;

        assert_eq!(outcome, MountOutcome::RedirectToAuthoring, "draft {raw}");
        assert_eq!(api.calls(), 0, "backend called for {raw}");
        assert_eq!(p.navigator().paths(), vec!["/diary/write"]);
        assert!(!t.storage.contains_key(KEY_DIARY_CREATING));
    }
}

#[tokio::test]
async fn test_missing_draft_redirects() {
    let t = tab();
    let api = FakeDiaryApi::with_summary("never");
    let p = page(&t, api.clone());

    assert_eq!(p.mount().await, MountOutcome::RedirectToAuthoring);
    assert_eq!(p.state(), HandoffState::RedirectToAuthoring);
    assert_eq!(api.calls(), 0);
    assert!(!p.view().loading);
}

#[tokio::test]
async fn test_submit_success_shows_summary_and_clears_slots() {
    let t = tab();
    t.diary.write_draft(&sample_draft());
    let api = FakeDiaryApi::with_summary("따뜻한 하루였어요");
    let p = page(&t, api.clone());

    let outcome = p.mount().await;

    assert_eq!(
        outcome,
        MountOutcome::ShowResult {
            summary: "따뜻한 하루였어요".to_string(),
            draft: Some(sample_draft()),
        }
    );
    assert_eq!(p.state(), HandoffState::ShowResult);
    let view = p.view();
    assert!(!view.loading);
    assert_eq!(view.summary, "따뜻한 하루였어요");
    assert_eq!(view.draft, Some(sample_draft()));
    assert!(p.navigator().paths().is_empty());
    assert_slots_cleared(&t);

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.emotion, Emotion::Happy);
    assert_eq!(request.date.to_rfc3339(), "2026-10-19T12:00:00+00:00");
    assert_eq!(request.question_scores.len(), 6);
    assert_eq!(
        request.question_scores.iter().map(|q| q.score).collect::<Vec<_>>(),
        vec![7, 2, 1, 8, 9, 10]
    );
}

#[tokio::test]
async fn test_request_serializes_camel_case() {
    let t = tab();
    t.diary.write_draft(&sample_draft());
    let api = FakeDiaryApi::with_summary("ok");
    page(&t, api.clone()).mount().await;

    let body = serde_json::to_value(&api.requests()[0]).unwrap();
    assert_eq!(body["emotion"], "HAPPY");
    assert_eq!(body["date"], "2026-10-19T12:00:00Z");
    assert!(body["questionScores"][0]["questionText"].is_string());
    assert_eq!(body["questionScores"][5]["score"], 10);
}

#[tokio::test]
async fn test_stored_reflections_are_clamped_before_submit() {
    let t = tab();
    t.storage.set_item(
        KEY_DIARY_DRAFT,
        &json!({
            "emotion": "SAD",
            "content": "비가 왔다",
            "reflections": [-5, 10.6, "3", null, 4.5, 99],
            "createdAtISO": "2026-01-31"
        })
        .to_string(),
    );
    let api = FakeDiaryApi::with_summary("ok");
    page(&t, api.clone()).mount().await;

    let scores: Vec<u8> = api.requests()[0]
        .question_scores
        .iter()
        .map(|q| q.score)
        .collect();
    assert_eq!(scores, vec![0, 10, 3, 0, 5, 10]);
}

#[tokio::test]
async fn test_result_envelope_under_result_key() {
    let t = tab();
    t.diary.write_draft(&sample_draft());
    let api = FakeDiaryApi::replying(|| Ok(json!({"result": {"summary": "결과 필드"}})));
    let p = page(&t, api);

    match p.mount().await {
        MountOutcome::ShowResult { summary, .. } => assert_eq!(summary, "결과 필드"),
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_response_redirects_and_keeps_draft() {
    let t = tab();
    t.diary.write_draft(&sample_draft());
    let api = FakeDiaryApi::replying(|| Ok(json!({"data": {"summary": 42}})));
    let p = page(&t, api.clone());

    assert_eq!(p.mount().await, MountOutcome::RedirectToAuthoring);
    assert_eq!(api.calls(), 1);
    assert_eq!(p.navigator().paths(), vec!["/diary/write"]);
    assert!(!t.storage.contains_key(KEY_DIARY_CREATING));
    assert!(!t.storage.contains_key(KEY_DIARY_RESULT));
    assert_eq!(t.diary.read_draft(), Some(sample_draft()));
}

#[tokio::test]
async fn test_backend_failure_redirects() {
    let t = tab();
    t.diary.write_draft(&sample_draft());
    let api = FakeDiaryApi::replying(|| {
        Err(ApiError::Status {
            status: 500,
            message: "서버 오류".to_string(),
        })
    });
    let p = page(&t, api.clone());

    assert_eq!(p.mount().await, MountOutcome::RedirectToAuthoring);
    assert_eq!(p.navigator().paths(), vec!["/diary/write"]);
    assert!(!t.storage.contains_key(KEY_DIARY_CREATING));
    assert_eq!(t.diary.read_draft(), Some(sample_draft()));
}

#[tokio::test]
async fn test_rejected_credential_leaves_navigation_to_client() {
    let t = tab();
    t.diary.write_draft(&sample_draft());
    let api = FakeDiaryApi::replying(|| Err(ApiError::Unauthorized));
    let p = page(&t, api.clone());

    assert_eq!(p.mount().await, MountOutcome::SessionExpired);
    assert_eq!(p.state(), HandoffState::SessionExpired);
    assert!(p.navigator().paths().is_empty());
    assert!(!t.storage.contains_key(KEY_DIARY_CREATING));
    assert_eq!(t.diary.read_draft(), Some(sample_draft()));
}

#[tokio::test]
async fn test_existing_result_is_consumed_once() {
    let t = tab();
    t.diary.write_draft(&sample_draft());
    t.diary.write_result(&DiaryResult {
        summary: "이미 완료".to_string(),
    });
    t.diary.mark_creating();
    let api = FakeDiaryApi::with_summary("never");
    let p = page(&t, api.clone());

    let outcome = p.mount().await;

    assert_eq!(
        outcome,
        MountOutcome::ShowResult {
            summary: "이미 완료".to_string(),
            draft: Some(sample_draft()),
        }
    );
    assert_eq!(p.view().summary, "이미 완료");
    assert_eq!(api.calls(), 0);
    assert_slots_cleared(&t);

    // A fresh mount finds nothing left and goes back to writing.
    let again = page(&t, api.clone());
    assert_eq!(again.mount().await, MountOutcome::RedirectToAuthoring);
}

#[tokio::test]
async fn test_existing_result_with_malformed_draft_still_shows() {
    let t = tab();
    t.storage.set_item(KEY_DIARY_DRAFT, "{broken");
    t.diary.write_result(&DiaryResult {
        summary: "요약".to_string(),
    });
    let p = page(&t, FakeDiaryApi::with_summary("never"));

    assert_eq!(
        p.mount().await,
        MountOutcome::ShowResult {
            summary: "요약".to_string(),
            draft: None,
        }
    );
    assert_slots_cleared(&t);
}

#[tokio::test]
async fn test_double_mount_hook_submits_once() {
    let t = tab();
    t.diary.write_draft(&sample_draft());
    let api = FakeDiaryApi::with_summary("한 번만");
    let p = page(&t, api.clone());

    let (first, second) = tokio::join!(p.mount(), p.mount());

    assert_eq!(api.calls(), 1);
    assert!(matches!(first, MountOutcome::ShowResult { .. }));
    assert_eq!(second, MountOutcome::AlreadyMounted);
}

#[tokio::test(start_paused = true)]
async fn test_second_page_instance_waits_for_first_submission() {
    let t = tab();
    t.diary.write_draft(&sample_draft());
    let api = FakeDiaryApi::with_summary("같은 결과").delayed(Duration::from_millis(400));

    let first = Arc::new(page(&t, api.clone()));
    let second = Arc::new(page(&t, api.clone()));

    let first_task = {
        let first = first.clone();
        tokio::spawn(async move { first.mount().await })
    };
    tokio::task::yield_now().await;
    assert!(t.diary.is_creating());

    // The first page goes away before its call resolves; the second mount
    // picks the stored result up.
    first.unmount();
    let second_outcome = second.mount().await;

    assert_eq!(first_task.await.unwrap(), MountOutcome::Unmounted);
    assert_eq!(api.calls(), 1);
    assert_eq!(
        second_outcome,
        MountOutcome::ShowResult {
            summary: "같은 결과".to_string(),
            draft: Some(sample_draft()),
        }
    );
    assert_eq!(second.state(), HandoffState::ShowResult);
    assert!(first.navigator().paths().is_empty());
    assert!(second.navigator().paths().is_empty());
    assert_slots_cleared(&t);
}

#[tokio::test(start_paused = true)]
async fn test_marker_then_result_after_50ms_shows_result() {
    let t = tab();
    t.diary.mark_creating();
    let api = FakeDiaryApi::with_summary("never");
    let p = page(&t, api.clone());

    let writer = {
        let diary = t.diary.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            diary.write_result(&DiaryResult {
                summary: "늦게 도착".to_string(),
            });
        })
    };

    let outcome = p.mount().await;
    writer.await.unwrap();

    assert_eq!(
        outcome,
        MountOutcome::ShowResult {
            summary: "늦게 도착".to_string(),
            draft: None,
        }
    );
    assert_eq!(p.view().summary, "늦게 도착");
    assert_eq!(api.calls(), 0);
    assert!(p.navigator().paths().is_empty());
    assert_slots_cleared(&t);
}

#[tokio::test(start_paused = true)]
async fn test_marker_without_result_times_out_to_write_step() {
    let t = tab();
    t.diary.write_draft(&sample_draft());
    t.diary.mark_creating();
    let api = FakeDiaryApi::with_summary("never");
    let p = page(&t, api.clone());

    let started = tokio::time::Instant::now();
    let outcome = p.mount().await;

    assert_eq!(outcome, MountOutcome::RedirectToAuthoring);
    assert_eq!(started.elapsed(), Duration::from_millis(8000));
    assert_eq!(p.navigator().paths(), vec!["/diary/write"]);
    assert!(!t.storage.contains_key(KEY_DIARY_CREATING));
    assert_eq!(api.calls(), 0);
    // The draft is kept so the write step can restore it.
    assert_eq!(t.diary.read_draft(), Some(sample_draft()));
}

#[tokio::test(start_paused = true)]
async fn test_unmount_while_polling_stops_quietly() {
    let t = tab();
    t.diary.mark_creating();
    let p = Arc::new(page(&t, FakeDiaryApi::with_summary("never")));

    let task = {
        let p = p.clone();
        tokio::spawn(async move { p.mount().await })
    };
    tokio::time::sleep(Duration::from_millis(300)).await;
    p.unmount();

    assert_eq!(task.await.unwrap(), MountOutcome::Unmounted);
    assert!(p.navigator().paths().is_empty());
    // Another mount's request may still be running.
    assert!(t.diary.is_creating());
}

#[tokio::test(start_paused = true)]
async fn test_custom_timers_are_honored() {
    let t = tab();
    t.diary.mark_creating();
    let config = HandoffConfig {
        poll_interval: Duration::from_millis(20),
        result_timeout: Duration::from_millis(100),
    };
    let p = SummaryPage::new(
        t.diary.clone(),
        FakeDiaryApi::with_summary("never"),
        RecordingNavigator::new(),
        config,
    );

    let started = tokio::time::Instant::now();
    assert_eq!(p.mount().await, MountOutcome::RedirectToAuthoring);
    assert_eq!(started.elapsed(), Duration::from_millis(100));
}

#[tokio::test]
async fn test_authoring_form_feeds_summary_page() {
    let t = tab();
    let form = DraftForm {
        emotion: Some(Emotion::Love),
        content: "  손주가 놀러 왔다 ".to_string(),
        reflections: vec![5, 0, 0, 9, 8, 7],
        written_on: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
    };

    let next = submit_draft(form, &t.diary).expect("valid form");
    assert_eq!(next, "/diary/summary");

    let api = FakeDiaryApi::with_summary("사랑 가득");
    page(&t, api.clone()).mount().await;

    let request = &api.requests()[0];
    assert_eq!(request.content, "손주가 놀러 왔다");
    assert_eq!(request.emotion, Emotion::Love);
    assert_eq!(request.date.to_rfc3339(), "2026-10-18T12:00:00+00:00");
}

#[test]
fn test_invalid_form_writes_nothing() {
    let t = tab();
    let form = DraftForm {
        emotion: None,
        content: "내용".to_string(),
        reflections: vec![5; 6],
        written_on: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
    };

    assert!(submit_draft(form, &t.diary).is_err());
    assert!(t.storage.is_empty());
}
