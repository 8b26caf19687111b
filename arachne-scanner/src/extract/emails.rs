use crate::error::Result;
use crate::result::EmailFinding;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

const MAX_PER_PAGE: usize = 10;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
        .expect("hardcoded regex pattern is valid")
});

/// Unique addresses in order of first appearance, at most ten.
pub fn extract_emails(page_url: &str, html: &str) -> Result<Vec<EmailFinding>> {
    let mut seen = HashSet::new();

    Ok(EMAIL_REGEX
        .find_iter(html)
        .map(|m| m.as_str())
        .filter(|email| seen.insert(*email))
        .take(MAX_PER_PAGE)
        .map(|email| EmailFinding {
            email: email.to_string(),
            page: page_url.to_string(),
        })
        .collect())
}
