use super::{truncate_chars, truncate_display};
use crate::error::Result;
use crate::result::{SecretFinding, SecretKind};
use regex::Regex;
use std::sync::LazyLock;

const VALUE_MAX_CHARS: usize = 50;
const PATTERN_HINT_CHARS: usize = 30;

// AWS key ids are upper-case only, so only the assignment name is matched
// case-insensitively there.
static SECRET_PATTERNS: LazyLock<Vec<(SecretKind, Regex)>> = LazyLock::new(|| {
    [
        (SecretKind::ApiKey, r#"(?i)api[_-]?key["']?\s*[:=]\s*["']([a-zA-Z0-9_-]{20,})["']"#),
        (SecretKind::ApiKey, r#"(?i)secret["']?\s*[:=]\s*["']([a-zA-Z0-9_-]{20,})["']"#),
        (SecretKind::ApiKey, r#"(?i)token["']?\s*[:=]\s*["']([a-zA-Z0-9_-]{20,})["']"#),
        (SecretKind::AwsKey, r#"(?i:aws[_-]?access[_-]?key)["']?\s*[:=]\s*["']([A-Z0-9]{20})["']"#),
        (SecretKind::AwsKey, r#"(?i)aws[_-]?secret[_-]?key["']?\s*[:=]\s*["']([a-zA-Z0-9/+]{40})["']"#),
        (SecretKind::Password, r#"(?i)password["']?\s*[:=]\s*["']([^"']{6,})["']"#),
        (SecretKind::Password, r#"(?i)pass["']?\s*[:=]\s*["']([^"']{6,})["']"#),
        (SecretKind::Jwt, r"(?i)eyJ[a-zA-Z0-9_-]{5,}\.[a-zA-Z0-9_-]{5,}\.[a-zA-Z0-9_-]{5,}"),
    ]
    .into_iter()
    .map(|(kind, pattern)| {
        (
            kind,
            Regex::new(pattern).expect("hardcoded regex pattern is valid"),
        )
    })
    .collect()
});

/// Every match of every pattern, duplicates included.
pub fn extract_secrets(page_url: &str, html: &str) -> Result<Vec<SecretFinding>> {
    let mut findings = Vec::new();

    for (kind, regex) in SECRET_PATTERNS.iter() {
        for caps in regex.captures_iter(html) {
            let Some(matched) = caps.get(1).or_else(|| caps.get(0)) else {
                continue;
            };
            findings.push(SecretFinding {
                kind: *kind,
                value: truncate_display(matched.as_str(), VALUE_MAX_CHARS),
                page: page_url.to_string(),
                pattern: truncate_chars(regex.as_str(), PATTERN_HINT_CHARS),
            });
        }
    }

    Ok(findings)
}
