// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::DateTime;

/// Format a quest creation time (Unix seconds) as e.g. `Jan 5, 2025`.
///
/// Returns `None` for timestamps chrono cannot represent.
pub fn format_quest_date(epoch_secs: i64) -> Option<String> {
    DateTime::from_timestamp(epoch_secs, 0).map(|date| date.format("%b %-d, %Y").to_string())
}

/// Format elapsed seconds as `m:ss`.
pub fn format_elapsed(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
