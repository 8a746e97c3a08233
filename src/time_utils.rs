// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time handling.

use chrono::{DateTime, NaiveDate, Utc};

/// Interpret a `YYYY-MM-DD` calendar date as 12:00 UTC on that day, so the
/// date survives conversion to any local timezone unchanged.
pub fn iso_date_to_utc_noon(date_iso: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(date_iso.trim(), "%Y-%m-%d")
        .ok()?
        .and_hms_opt(12, 0, 0)
        .map(|dt| dt.and_utc())
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
