// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Best-effort bearer token payload decoding.
//!
//! No signature verification happens here. The decoded claims are a UX
//! hint for routing and display; the backend re-validates every request.

use crate::models::Claims;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value;

/// Strip an optional case-insensitive `Bearer ` prefix and surrounding space.
fn strip_bearer(token: &str) -> &str {
    let trimmed = token.trim_start();
    let rest = match trimmed.get(..6) {
        Some(scheme) if scheme.eq_ignore_ascii_case("bearer") => &trimmed[6..],
        _ => return trimmed.trim(),
    };

    if rest.starts_with(char::is_whitespace) {
        rest.trim()
    } else {
        trimmed.trim()
    }
}

/// Decode a base64url segment: swap in the standard alphabet and pad to a
/// multiple of four before decoding.
fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    let mut standard: String = segment
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    while standard.len() % 4 != 0 {
        standard.push('=');
    }
    STANDARD.decode(standard.as_bytes()).ok()
}

/// Extract the claims object from a compact three-segment token.
///
/// Returns `None` on any failure: wrong segment count, bad base64, invalid
/// UTF-8, invalid JSON, or a payload that is not a JSON object.
pub fn decode_claims(token: &str) -> Option<Claims> {
    let raw = strip_bearer(token);
    let parts: Vec<&str> = raw.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    let decoded = decode_segment(parts[1])
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .and_then(|json| serde_json::from_str::<Value>(&json).ok());

    match decoded {
        Some(Value::Object(map)) => Some(Claims::new(map)),
        _ => {
            let head: String = raw.chars().take(12).collect();
            tracing::debug!(token_head = %head, "Token payload decode failed");
            None
        }
    }
}
