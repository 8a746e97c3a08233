// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Diary backend client.
//!
//! Handles:
//! - Bearer auth from the tab's credential
//! - Failure notices probed from error bodies
//! - Session eviction on 401
//! - Envelope unwrapping (`data` or `result`)

use crate::error::{failure_notice, ApiError};
use crate::models::{DiaryCreateRequest, DiaryResult};
use crate::services::auth_storage::AuthStorage;
use crate::services::guard::expire_session;
use crate::services::navigation::Navigator;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Create-diary endpoint, relative to the API base URL.
pub const CREATE_DIARY_PATH: &str = "/api/v1/diaries";

/// Backend operations the diary pages consume.
#[async_trait]
pub trait DiaryApi: Send + Sync {
    /// Submit a diary entry. Returns the raw response envelope.
    async fn create_diary(&self, request: &DiaryCreateRequest) -> Result<Value, ApiError>;
}

#[async_trait]
impl<T: DiaryApi + ?Sized> DiaryApi for Arc<T> {
    async fn create_diary(&self, request: &DiaryCreateRequest) -> Result<Value, ApiError> {
        (**self).create_diary(request).await
    }
}

/// Payload of a loosely-typed envelope: `data` first, then `result`.
pub fn pick_data(envelope: &Value) -> Option<&Value> {
    let obj = envelope.as_object()?;
    obj.get("data").or_else(|| obj.get("result"))
}

/// Summary carried by a create-diary envelope, if it has the expected shape.
pub fn extract_result(envelope: &Value) -> Option<DiaryResult> {
    pick_data(envelope).and_then(DiaryResult::from_value)
}

/// User-facing notice for a failed response: `message`, then
/// `error.message`, then a generic status line.
pub fn failure_message(status: u16, body: Option<&Value>) -> String {
    let non_empty = |v: Option<&Value>| {
        v.and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    body.and_then(|json| {
        non_empty(json.get("message"))
            .or_else(|| non_empty(json.get("error").and_then(|e| e.get("message"))))
    })
    .unwrap_or_else(|| failure_notice(status))
}

/// HTTP implementation of [`DiaryApi`].
#[derive(Clone)]
pub struct HttpDiaryClient {
    http: reqwest::Client,
    base_url: String,
    auth: AuthStorage,
    expiry: Option<(Arc<dyn Navigator>, String)>,
}

impl HttpDiaryClient {
    pub fn new(base_url: impl Into<String>, auth: AuthStorage) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
            expiry: None,
        }
    }

    /// Navigate to the login page (with `origin` as return target) when the
    /// backend rejects the credential.
    pub fn with_expiry_redirect(
        mut self,
        navigator: Arc<dyn Navigator>,
        origin: impl Into<String>,
    ) -> Self {
        self.expiry = Some((navigator, origin.into()));
        self
    }

    async fn check_response(&self, response: reqwest::Response) -> Result<Value, ApiError> {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            tracing::warn!("Backend rejected credential");
            let origin = self
                .expiry
                .as_ref()
                .map(|(_, origin)| origin.as_str())
                .unwrap_or("/");
            let target = expire_session(&self.auth, origin);
            if let Some((navigator, _)) = &self.expiry {
                navigator.replace(&target);
            }
            return Err(ApiError::Unauthorized);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            let body = serde_json::from_slice::<Value>(&bytes).ok();
            let message = failure_message(status.as_u16(), body.as_ref());
            tracing::warn!(status = status.as_u16(), notice = %message, "Diary API request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl DiaryApi for HttpDiaryClient {
    async fn create_diary(&self, request: &DiaryCreateRequest) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, CREATE_DIARY_PATH);

        let mut builder = self.http.post(&url).json(request);
        if let Some(token) = self.auth.token() {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        self.check_response(response).await
    }
}
