// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth login, callback and registration hand-over.

use crate::models::{OAuthProvider, OAuthType};
use crate::services::auth_storage::AuthStorage;
use crate::services::navigation::{
    RouteDecision, ADMIN_HOME_PATH, DUPLICATE_EMAIL_PATH, HOME_PATH, INVALID_CALLBACK_PATH,
    LOGIN_PATH, REGISTER_PATH, REGISTER_QUESTIONS_PATH,
};
use crate::services::token::decode_claims;
use axum::extract::Query;
use axum::http::Uri;
use serde::Deserialize;

/// Callback behavior switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallbackConfig {
    /// Route `DUPLICATE_EMAIL` logins to the dedicated notice page. When
    /// off, the callback stores the credential and stays put.
    pub duplicate_email_notice: bool,
}

impl Default for CallbackConfig {
    fn default() -> Self {
        Self {
            duplicate_email_notice: true,
        }
    }
}

/// Query parameters the backend appends to the callback URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackParams {
    #[serde(rename = "type", default)]
    pub flow_type: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

impl CallbackParams {
    /// Parse from a callback URI. An unparseable query reads as empty.
    pub fn from_uri(uri: &Uri) -> Self {
        Query::<CallbackParams>::try_from_uri(uri)
            .map(|Query(params)| params)
            .unwrap_or_default()
    }
}

/// Where the callback page goes next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackOutcome {
    /// Route to replace the callback page with, if any.
    pub redirect: Option<String>,
    /// Callback URL with the token stripped, for the history entry.
    pub sanitized_url: Option<String>,
}

/// Backend URL that starts the provider's authorization flow. Remembers
/// the provider for the rest of the tab session.
pub fn start_login(api_base: &str, provider: OAuthProvider, auth: &AuthStorage) -> String {
    auth.set_provider(provider);
    format!(
        "{}/oauth2/authorization/{}",
        api_base.trim_end_matches('/'),
        provider.as_str()
    )
}

/// Store the credential delivered to the callback page and pick the next
/// route from its flow type.
pub fn handle_oauth_callback(
    params: &CallbackParams,
    auth: &AuthStorage,
    config: &CallbackConfig,
) -> CallbackOutcome {
    let flow_type = params
        .flow_type
        .as_deref()
        .and_then(|t| t.parse::<OAuthType>().ok());
    let token = params.token.as_deref().filter(|t| !t.is_empty());

    let (Some(flow_type), Some(token)) = (flow_type, token) else {
        tracing::warn!(flow_type = ?params.flow_type, "Invalid OAuth callback");
        return CallbackOutcome {
            redirect: Some(INVALID_CALLBACK_PATH.to_string()),
            sanitized_url: None,
        };
    };

    auth.set_session(flow_type, token);
    tracing::info!(flow_type = %flow_type, "OAuth callback stored credential");

    let sanitized_url = Some(format!(
        "/callback?type={}",
        urlencoding::encode(flow_type.as_str())
    ));

    let redirect = match flow_type {
        OAuthType::Success => Some(HOME_PATH),
        OAuthType::New => Some(REGISTER_PATH),
        OAuthType::DuplicateEmail if config.duplicate_email_notice => Some(DUPLICATE_EMAIL_PATH),
        OAuthType::DuplicateEmail => None,
    };

    CallbackOutcome {
        redirect: redirect.map(str::to_string),
        sanitized_url,
    }
}

/// The registration form is only reachable mid-signup.
pub fn registration_guard(auth: &AuthStorage) -> RouteDecision {
    let session = auth.get_session();
    match (session.flow_type, session.token) {
        (Some(OAuthType::New), Some(_)) => RouteDecision::Allow,
        _ => RouteDecision::redirect(LOGIN_PATH),
    }
}

/// Email to prefill on the registration form.
pub fn registration_email(auth: &AuthStorage) -> String {
    auth.token()
        .and_then(|token| decode_claims(&token))
        .and_then(|claims| claims.email().map(str::to_string))
        .unwrap_or_default()
}

/// Swap in the token issued after registration and route by its role.
pub fn complete_registration(auth: &AuthStorage, next_token: &str) -> &'static str {
    auth.update_token(next_token);
    let is_admin = decode_claims(next_token).is_some_and(|claims| claims.is_admin());
    if is_admin {
        ADMIN_HOME_PATH
    } else {
        REGISTER_QUESTIONS_PATH
    }
}

pub fn logout(auth: &AuthStorage) -> &'static str {
    auth.clear_session();
    LOGIN_PATH
}
