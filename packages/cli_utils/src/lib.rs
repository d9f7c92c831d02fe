#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared CLI utilities for the sauti toolchain.
//!
//! Logger bootstrap plus the small formatting helpers every command
//! needs: dates, styled status badges, and text truncation.

use chrono::{DateTime, Local, Utc};
use console::Style;
use sauti_record_models::RecordStatus;

/// Default truncation width for descriptions in list views.
pub const TRUNCATE_LEN: usize = 100;

/// Initializes the global logger from `RUST_LOG`, defaulting to `info`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logger() {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(log::LevelFilter::Info);
    builder.parse_env("RUST_LOG");
    // Ignore error if logger was already set (e.g., in tests)
    builder.try_init().ok();
}

/// Formats a server timestamp in the reader's local time, e.g.
/// `"Mar  1, 2024 11:30"`.
#[must_use]
pub fn format_date(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%b %e, %Y %H:%M")
        .to_string()
}

/// The terminal style for a status badge.
#[must_use]
pub fn status_style(status: RecordStatus) -> Style {
    match status {
        RecordStatus::Draft => Style::new().dim(),
        RecordStatus::UnderInvestigation => Style::new().blue(),
        RecordStatus::Resolved => Style::new().green(),
        RecordStatus::Rejected => Style::new().red(),
    }
}

/// A status rendered with its badge style.
#[must_use]
pub fn styled_status(status: RecordStatus) -> String {
    status_style(status).apply_to(status).to_string()
}

/// Truncates to at most `max_len` characters, appending `...` when text
/// was dropped. Splits on character boundaries, never mid-codepoint.
#[must_use]
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_owned();
    }
    let cut: String = text.chars().take(max_len).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate("pothole", TRUNCATE_LEN), "pothole");
    }

    #[test]
    fn long_text_is_cut_with_ellipsis() {
        let text = "x".repeat(150);
        let out = truncate(&text, TRUNCATE_LEN);
        assert_eq!(out.chars().count(), TRUNCATE_LEN + 3);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "über".repeat(60);
        let out = truncate(&text, 10);
        assert_eq!(out.chars().count(), 13);
    }

    #[test]
    fn every_status_has_a_style() {
        for status in RecordStatus::all() {
            // Styling must never panic, piped or not.
            let _ = styled_status(*status);
        }
    }
}
