use crate::error::Result;
use crate::result::ApiEndpointFinding;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static API_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"(?i)["'](/api/v[0-9]/[^"']+)["']"#,
        r#"(?i)["'](/rest/[^"']+)["']"#,
        r#"(?i)["'](/graphql[^"']*)["']"#,
        r#"(?i)["'](/soap/[^"']+)["']"#,
        r#"(?i)["'](/ajax/[^"']+)["']"#,
        r#"(?i)["'](/json/[^"']+)["']"#,
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("hardcoded regex pattern is valid"))
    .collect()
});

/// Quoted string literals that look like API routes, resolved against the page.
pub fn extract_api_endpoints(page_url: &str, html: &str) -> Result<Vec<ApiEndpointFinding>> {
    let base = Url::parse(page_url)?;
    let mut endpoints = Vec::new();

    for regex in API_PATTERNS.iter() {
        for caps in regex.captures_iter(html) {
            let Some(endpoint) = caps.get(1).map(|m| m.as_str()) else {
                continue;
            };
            let Ok(full_url) = base.join(endpoint) else {
                continue;
            };
            endpoints.push(ApiEndpointFinding {
                endpoint: endpoint.to_string(),
                full_url: full_url.into(),
                page: page_url.to_string(),
            });
        }
    }

    Ok(endpoints)
}
