use super::truncate_display;
use crate::error::Result;
use crate::result::CommentFinding;
use regex::Regex;
use std::sync::LazyLock;

const MAX_PER_PAGE: usize = 5;
const MIN_LEN: usize = 5;
const COMMENT_MAX_CHARS: usize = 100;

// html, block, line; in that order
static COMMENT_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [r"(?s)<!--(.*?)-->", r"(?s)/\*(.*?)\*/", r"//(.*?)\n"]
        .map(|p| Regex::new(p).expect("hardcoded regex pattern is valid"))
});

pub fn extract_comments(page_url: &str, html: &str) -> Result<Vec<CommentFinding>> {
    Ok(COMMENT_PATTERNS
        .iter()
        .flat_map(|regex| regex.captures_iter(html))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|text| text.chars().count() > MIN_LEN)
        .take(MAX_PER_PAGE)
        .map(|text| CommentFinding {
            comment: truncate_display(text, COMMENT_MAX_CHARS),
            page: page_url.to_string(),
        })
        .collect())
}
