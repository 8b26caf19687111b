use super::{selector, truncate_chars};
use crate::error::Result;
use crate::result::MetadataFinding;
use scraper::Html;

const MAX_META_TAGS: usize = 20;
const CONTENT_MAX_CHARS: usize = 100;

pub fn extract_metadata(page_url: &str, html: &str) -> Result<Vec<MetadataFinding>> {
    let document = Html::parse_document(html);
    metadata_in(page_url, &document)
}

/// `name` (or `property`) and `content` of the first twenty `<meta>` tags.
pub(crate) fn metadata_in(page_url: &str, document: &Html) -> Result<Vec<MetadataFinding>> {
    let meta = selector("meta")?;

    Ok(document
        .select(&meta)
        .take(MAX_META_TAGS)
        .filter_map(|tag| {
            let el = tag.value();
            let name = el
                .attr("name")
                .filter(|n| !n.is_empty())
                .or_else(|| el.attr("property"))
                .filter(|n| !n.is_empty())?;
            let content = el.attr("content").filter(|c| !c.is_empty())?;
            Some(MetadataFinding {
                name: name.to_string(),
                content: truncate_chars(content, CONTENT_MAX_CHARS),
                page: page_url.to_string(),
            })
        })
        .collect())
}
