use super::selector;
use crate::error::Result;
use crate::target::Target;
use scraper::Html;
use std::collections::HashSet;

const LINK_BEARERS: &str =
    "a[href], link[href], script[href], img[href], script[src], img[src], form[action]";

/// Every followable reference on the page, normalized and deduplicated in
/// document order.
pub fn extract_links(target: &Target, page_url: &str, html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    links_in(target, page_url, &document)
}

pub(crate) fn links_in(target: &Target, page_url: &str, document: &Html) -> Result<Vec<String>> {
    let bearers = selector(LINK_BEARERS)?;

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&bearers) {
        let el = element.value();
        let refs = match el.name() {
            "form" => [el.attr("action"), None],
            "script" | "img" => [el.attr("href"), el.attr("src")],
            _ => [el.attr("href"), None],
        };

        for raw in refs.into_iter().flatten() {
            if let Some(normalized) = target.normalize(raw, page_url)
                && seen.insert(normalized.clone())
            {
                links.push(normalized);
            }
        }
    }

    Ok(links)
}
