// Console summary and JSON persistence for crawl results

use crate::crawl::extract_url_path;
use crate::security::analyze_crawl_result;
use anyhow::{Context, Result};
use arachne_scanner::CrawlResult;
use chrono::{DateTime, Local};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

const RULE: &str = "════════════════════════════════════════════════════════════════════════════════";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
        }
    }
}

/// First `n` distinct values, in order of appearance.
fn unique_sample<'a>(values: impl Iterator<Item = &'a str>, n: usize) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(*v)).take(n).collect()
}

pub fn generate_text_report(result: &CrawlResult) -> String {
    let mut report = String::new();
    let summary = result.summary();

    report.push_str(&format!("{}\n", RULE));
    report.push_str(&format!("{} {}\n", "Spider report:".bold(), result.target));
    report.push_str(&format!("{}\n\n", RULE));

    report.push_str("Statistics\n");
    report.push_str(&format!("  Pages crawled:    {}\n", summary.pages));
    report.push_str(&format!("  URLs processed:   {}\n", summary.pages_processed));
    report.push_str(&format!("  Fetch failures:   {}\n", summary.fetch_failures));
    report.push_str(&format!("  Stopped because:  {}\n", result.state.as_str()));
    if let Some(deepest) = result.pages.iter().map(|p| p.depth).max() {
        report.push_str(&format!("  Deepest page:     {}\n", deepest));
    }
    report.push('\n');

    report.push_str(&format!("{}\n", RULE));
    report.push_str("Findings\n");

    if !result.secrets.is_empty() {
        report.push_str(&format!("\n  Secrets ({}):\n", summary.secrets));
        for (i, secret) in result.secrets.iter().take(5).enumerate() {
            report.push_str(&format!("    {}. {}: {}\n", i + 1, secret.kind.as_str(), secret.value));
            report.push_str(&format!("       page: {}\n", secret.page));
        }
    }

    if !result.forms.is_empty() {
        report.push_str(&format!("\n  Forms ({}):\n", summary.forms));
        for (i, form) in result.forms.iter().take(3).enumerate() {
            report.push_str(&format!("    {}. {} {}\n", i + 1, form.method.to_uppercase(), form.action));
            let sensitive: Vec<&str> = form.sensitive_inputs().map(|f| f.name.as_str()).collect();
            if !sensitive.is_empty() {
                report.push_str(&format!("       sensitive fields: {}\n", sensitive.join(", ")));
            }
        }
    }

    if !result.emails.is_empty() {
        report.push_str(&format!("\n  Emails ({}):\n", summary.emails));
        let sample = unique_sample(result.emails.iter().map(|e| e.email.as_str()), 5);
        for (i, email) in sample.iter().enumerate() {
            report.push_str(&format!("    {}. {}\n", i + 1, email));
        }
    }

    if !result.api_endpoints.is_empty() {
        report.push_str(&format!("\n  API endpoints ({}):\n", summary.api_endpoints));
        let sample = unique_sample(result.api_endpoints.iter().map(|e| e.endpoint.as_str()), 5);
        for (i, endpoint) in sample.iter().enumerate() {
            report.push_str(&format!("    {}. {}\n", i + 1, endpoint));
        }
    }

    if !result.files.is_empty() {
        report.push_str(&format!("\n  Files ({}):\n", summary.files));
        let sample = unique_sample(result.files.iter().map(|f| f.filename.as_str()), 5);
        for (i, file) in sample.iter().enumerate() {
            report.push_str(&format!("    {}. {}\n", i + 1, file));
        }
    }

    if summary.comments > 0 || summary.metadata > 0 {
        report.push_str(&format!(
            "\n  Comments: {}   Meta tags: {}\n",
            summary.comments, summary.metadata
        ));
    }
    report.push('\n');

    report.push_str(&format!("{}\n", RULE));
    report.push_str("Recommendations\n");
    let recommendations = analyze_crawl_result(result);
    if recommendations.is_empty() {
        report.push_str("  None - too little data collected\n");
    } else {
        for (i, rec) in recommendations.iter().enumerate() {
            report.push_str(&format!(
                "  {}. [{}] {}\n",
                i + 1,
                rec.severity.as_str().to_uppercase(),
                rec.title
            ));
            report.push_str(&format!("     {}\n", rec.detail));
        }
    }
    report.push('\n');

    if !result.pages.is_empty() {
        report.push_str(&format!("{}\n", RULE));
        report.push_str("Sample pages\n");
        for page in result.pages.iter().take(3) {
            report.push_str(&format!("  {} [{}]\n", extract_url_path(&page.url), page.id));
            report.push_str(&format!("    title: {}\n", page.title));
            report.push_str(&format!(
                "    links: {}, forms: {}\n",
                page.links_count, page.forms_count
            ));
        }
        report.push('\n');
    }

    report.push_str(&format!("{}\n", RULE));
    if let Some(finished) = result.finished_at {
        report.push_str(&format!(
            "Finished at {}\n",
            finished.with_timezone(&Local).format("%H:%M:%S")
        ));
    }
    report.push_str("For authorized security testing only.\n");

    report
}

pub fn generate_json_report(result: &CrawlResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

/// `spider_report_<host>_<YYYYmmdd_HHMMSS>.<ext>`
pub fn report_filename(result: &CrawlResult, format: ReportFormat, at: DateTime<Local>) -> String {
    let host = result.host().unwrap_or_else(|| "unknown".to_string());
    format!(
        "spider_report_{}_{}.{}",
        host.replace(':', "_"),
        at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Write `result` into `dir` under a timestamped name and return the path.
pub fn persist_report(result: &CrawlResult, dir: &Path, format: ReportFormat) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create report directory {}", dir.display()))?;

    let content = match format {
        ReportFormat::Json => generate_json_report(result).context("Failed to serialize report")?,
        ReportFormat::Text => generate_text_report(result),
    };

    let path = dir.join(report_filename(result, format, Local::now()));
    save_report(&content, &path)
        .with_context(|| format!("Failed to write report {}", path.display()))?;
    info!("Report for {} written to {}", result.target, path.display());

    Ok(path)
}
