//! Display helpers shared by the page renderers
//!
//! Every server-provided string goes through [`sanitize`] before it is drawn.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthChar;

/// Regex to match ANSI escape codes (CSI and OSC sequences)
static ANSI_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b(\[[0-9;?]*[ -/]*[@-~]|\][^\x07\x1b]*(\x07|\x1b\\)|[@-Z\\-_])").unwrap()
});

pub const MISSING: &str = "N/A";
pub const NEVER: &str = "Never";
pub const WEBSITE_WIDTH: usize = 30;

/// Strip terminal escape sequences and control characters, keeping newlines
pub fn sanitize(text: &str) -> String {
    ANSI_REGEX
        .replace_all(text, "")
        .chars()
        .filter(|c| *c == '\n' || !c.is_control())
        .collect()
}

/// Single-line variant of [`sanitize`] for table cells and titles
pub fn sanitize_line(text: &str) -> String {
    sanitize(&text.replace(['\n', '\t'], " "))
}

/// Missing or empty text renders as `N/A`
pub fn or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => sanitize_line(v),
        _ => MISSING.to_string(),
    }
}

/// Cut `text` to `max` display columns and append `...` when anything was cut
pub fn truncate(text: &str, max: usize) -> String {
    let mut width = 0;
    let mut cut = String::new();
    for c in text.chars() {
        width += c.width().unwrap_or(0);
        if width > max {
            cut.push_str("...");
            return cut;
        }
        cut.push(c);
    }
    cut
}

/// Website column text
pub fn website(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => truncate(&sanitize_line(v), WEBSITE_WIDTH),
        _ => String::new(),
    }
}

/// `Never` for a missing timestamp, otherwise `Mon D, YYYY`
pub fn format_date(value: Option<&str>) -> String {
    let Some(raw) = value.filter(|v| !v.is_empty()) else {
        return NEVER.to_string();
    };

    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok());

    match date {
        Some(d) => d.format("%b %-d, %Y").to_string(),
        None => sanitize_line(raw),
    }
}
