// Extraction pipeline: raw page bytes in, categorized findings out.
//
// Every extractor is a pure function of (page url, html) and returns its own
// Result. `analyze_page` runs all of them and turns an individual failure into
// an empty set for that category, so one broken extractor never costs the page.

pub mod api;
pub mod comments;
pub mod emails;
pub mod files;
pub mod forms;
pub mod links;
pub mod metadata;
pub mod secrets;

use crate::error::{Result, ScanError};
use crate::result::{
    ApiEndpointFinding, CommentFinding, EmailFinding, FileReferenceFinding, FormRecord,
    MetadataFinding, SecretFinding,
};
use crate::target::Target;
use scraper::{Html, Selector};
use tracing::warn;

const TITLE_MAX_CHARS: usize = 100;

/// Everything the pipeline pulled out of one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageAnalysis {
    pub title: String,
    pub links_count: usize,
    pub forms_count: usize,
    /// Normalized, deduplicated, in discovery order. Not yet scope filtered.
    pub links: Vec<String>,
    pub forms: Vec<FormRecord>,
    pub secrets: Vec<SecretFinding>,
    pub emails: Vec<EmailFinding>,
    pub comments: Vec<CommentFinding>,
    pub api_endpoints: Vec<ApiEndpointFinding>,
    pub files: Vec<FileReferenceFinding>,
    pub metadata: Vec<MetadataFinding>,
}

pub fn analyze_page(target: &Target, page_url: &str, html: &str) -> PageAnalysis {
    let document = Html::parse_document(html);

    PageAnalysis {
        title: or_empty("title", page_url, page_title(&document)),
        links_count: or_empty("anchors", page_url, count(&document, "a[href]")),
        forms_count: or_empty("form count", page_url, count(&document, "form")),
        links: or_empty("links", page_url, links::links_in(target, page_url, &document)),
        forms: or_empty("forms", page_url, forms::forms_in(page_url, &document)),
        secrets: or_empty("secrets", page_url, secrets::extract_secrets(page_url, html)),
        emails: or_empty("emails", page_url, emails::extract_emails(page_url, html)),
        comments: or_empty("comments", page_url, comments::extract_comments(page_url, html)),
        api_endpoints: or_empty("api", page_url, api::extract_api_endpoints(page_url, html)),
        files: or_empty("files", page_url, files::extract_files(page_url, html)),
        metadata: or_empty("metadata", page_url, metadata::metadata_in(page_url, &document)),
    }
}

fn or_empty<T: Default>(extractor: &str, page_url: &str, result: Result<T>) -> T {
    result.unwrap_or_else(|e| {
        warn!("{} extractor failed on {}: {}", extractor, page_url, e);
        T::default()
    })
}

fn page_title(document: &Html) -> Result<String> {
    let title = selector("title")?;
    Ok(document
        .select(&title)
        .next()
        .map(|t| truncate_chars(t.text().collect::<String>().trim(), TITLE_MAX_CHARS))
        .unwrap_or_default())
}

fn count(document: &Html, css: &str) -> Result<usize> {
    Ok(document.select(&selector(css)?).count())
}

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScanError::ParseError(format!("selector {}: {}", css, e)))
}

pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Cuts to `max` chars and marks the cut with "...".
pub(crate) fn truncate_display(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        format!("{}...", truncate_chars(s, max))
    } else {
        s.to_string()
    }
}
