// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use care_diary::config::Config;
use care_diary::error::ApiError;
use care_diary::models::{DiaryCreateRequest, DiaryDraft, Emotion};
use care_diary::routes::create_router;
use care_diary::services::{AuthStorage, DiaryApi, DiaryStore, MemoryStorage, Navigator};
use care_diary::AppState;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mint a signed token carrying `claims`.
#[allow(dead_code)]
pub fn make_token(claims: &Value) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(b"test_signing_key_32_bytes_long!!"),
    )
    .expect("Failed to create JWT")
}

#[allow(dead_code)]
pub fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

/// One browser tab: shared storage plus its credential and diary views.
#[allow(dead_code)]
pub struct Tab {
    pub storage: MemoryStorage,
    pub auth: AuthStorage,
    pub diary: DiaryStore,
}

#[allow(dead_code)]
pub fn tab() -> Tab {
    let storage = MemoryStorage::new();
    Tab {
        auth: AuthStorage::new(Arc::new(storage.clone())),
        diary: DiaryStore::new(Arc::new(storage.clone())),
        storage,
    }
}

#[allow(dead_code)]
pub fn sample_draft() -> DiaryDraft {
    DiaryDraft {
        emotion: Emotion::Happy,
        content: "오늘은 어머니와 산책을 했다".to_string(),
        reflections: vec![7, 2, 1, 8, 9, 10],
        created_at_iso: "2026-10-19".to_string(),
    }
}

/// Router that records every `replace` call.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct RecordingNavigator {
    paths: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn replace(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

/// Scripted diary backend that counts calls.
#[allow(dead_code)]
#[derive(Clone)]
pub struct FakeDiaryApi {
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<DiaryCreateRequest>>>,
    reply: Arc<dyn Fn() -> Result<Value, ApiError> + Send + Sync>,
    delay: Duration,
}

#[allow(dead_code)]
impl FakeDiaryApi {
    pub fn replying(reply: impl Fn() -> Result<Value, ApiError> + Send + Sync + 'static) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            reply: Arc::new(reply),
            delay: Duration::ZERO,
        }
    }

    /// Backend that answers with `{"data": {"summary": ...}}`.
    pub fn with_summary(summary: &str) -> Self {
        let body = serde_json::json!({ "data": { "summary": summary } });
        Self::replying(move || Ok(body.clone()))
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<DiaryCreateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl DiaryApi for FakeDiaryApi {
    async fn create_diary(&self, request: &DiaryCreateRequest) -> Result<Value, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        (self.reply)()
    }
}

/// Fresh directory under the system temp dir holding a small exported site.
#[allow(dead_code)]
pub fn static_site(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("care-diary-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(dir.join("home")).unwrap();
    std::fs::create_dir_all(dir.join("login")).unwrap();
    std::fs::write(dir.join("index.html"), "<html>root</html>").unwrap();
    std::fs::write(dir.join("home").join("index.html"), "<html>home</html>").unwrap();
    std::fs::write(dir.join("login").join("index.html"), "<html>login</html>").unwrap();
    std::fs::write(dir.join("logo.svg"), "<svg/>").unwrap();
    dir
}

/// Create a test app serving `static_dir`.
#[allow(dead_code)]
pub fn create_test_app(static_dir: PathBuf) -> (axum::Router, Arc<AppState>) {
    let config = Config {
        static_dir,
        ..Config::default()
    };
    let state = Arc::new(AppState { config });
    (create_router(state.clone()), state)
}
