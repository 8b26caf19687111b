// Pentest follow-ups derived from what a crawl turned up

use arachne_scanner::CrawlResult;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub severity: Severity,
    pub title: String,
    pub detail: String,
}

// Files whose mere exposure is worth escalating, by path fragment.
const CRITICAL_FILE_PATTERNS: &[(&str, Severity)] = &[
    (".env", Severity::Critical),
    (".sql", Severity::High),
    (".config", Severity::High),
    ("backup", Severity::Medium),
];

pub fn check_exposed_secrets(result: &CrawlResult) -> Vec<Recommendation> {
    if result.secrets.is_empty() {
        return Vec::new();
    }

    let pages: std::collections::HashSet<&str> =
        result.secrets.iter().map(|s| s.page.as_str()).collect();
    vec![Recommendation {
        severity: Severity::High,
        title: "Validate discovered keys".to_string(),
        detail: format!(
            "{} potential secrets on {} page(s). Check whether they are live and what they grant.",
            result.secrets.len(),
            pages.len()
        ),
    }]
}

pub fn check_forms(result: &CrawlResult) -> Vec<Recommendation> {
    if result.forms.is_empty() {
        return Vec::new();
    }

    vec![Recommendation {
        severity: Severity::Medium,
        title: "Test forms for SQL injection and XSS".to_string(),
        detail: format!(
            "{} form(s) accept user input; fuzz every named field.",
            result.forms.len()
        ),
    }]
}

pub fn check_insecure_form_transport(result: &CrawlResult) -> Vec<Recommendation> {
    result
        .forms
        .iter()
        .filter(|form| form.sensitive_inputs().next().is_some())
        .filter(|form| {
            Url::parse(&form.action).is_ok_and(|action| {
                action.scheme() == "http"
                    && action
                        .host_str()
                        .is_some_and(|h| !h.starts_with("127.") && h != "localhost")
            })
        })
        .map(|form| {
            let fields: Vec<&str> = form.sensitive_inputs().map(|i| i.name.as_str()).collect();
            Recommendation {
                severity: Severity::High,
                title: "Sensitive form submitted over HTTP".to_string(),
                detail: format!(
                    "{} {} sends {} in cleartext (found on {}).",
                    form.method.to_uppercase(),
                    form.action,
                    fields.join(", "),
                    form.page
                ),
            }
        })
        .collect()
}

pub fn check_api_endpoints(result: &CrawlResult) -> Vec<Recommendation> {
    if result.api_endpoints.is_empty() {
        return Vec::new();
    }

    vec![Recommendation {
        severity: Severity::Medium,
        title: "Analyse API endpoints".to_string(),
        detail: format!(
            "{} endpoint reference(s) found in page source; probe them for missing authorization.",
            result.api_endpoints.len()
        ),
    }]
}

pub fn check_emails(result: &CrawlResult) -> Vec<Recommendation> {
    if result.emails.is_empty() {
        return Vec::new();
    }

    vec![Recommendation {
        severity: Severity::Low,
        title: "Use harvested emails for phishing simulation".to_string(),
        detail: format!("{} address(es) collected.", result.emails.len()),
    }]
}

pub fn check_exposed_files(result: &CrawlResult) -> Vec<Recommendation> {
    let mut findings = Vec::new();

    for file in &result.files {
        let name = file.filename.to_lowercase();
        if let Some((_, severity)) = CRITICAL_FILE_PATTERNS
            .iter()
            .find(|(pattern, _)| name.contains(pattern))
        {
            findings.push(Recommendation {
                severity: *severity,
                title: "Sensitive file referenced".to_string(),
                detail: format!("Try fetching {} (linked from {}).", file.url, file.page),
            });
        }
    }

    findings
}

/// All follow-ups, most severe first.
pub fn analyze_crawl_result(result: &CrawlResult) -> Vec<Recommendation> {
    let mut all = Vec::new();

    all.extend(check_exposed_secrets(result));
    all.extend(check_insecure_form_transport(result));
    all.extend(check_exposed_files(result));
    all.extend(check_forms(result));
    all.extend(check_api_endpoints(result));
    all.extend(check_emails(result));

    all.sort_by_key(|r| r.severity);
    all
}
