// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting and day arithmetic.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 with millisecond precision and a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Whole days remaining in `remaining`, counting any partial day as a full one.
///
/// Negative durations yield 0.
pub fn ceil_days(remaining: Duration) -> i64 {
    if remaining <= Duration::zero() {
        return 0;
    }
    let whole = remaining.num_days();
    if remaining > Duration::days(whole) {
        whole + 1
    } else {
        whole
    }
}
