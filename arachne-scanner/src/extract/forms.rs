use super::{selector, truncate_chars};
use crate::error::Result;
use crate::result::{FormInput, FormRecord};
use scraper::Html;
use url::Url;

const VALUE_MAX_CHARS: usize = 50;

/// Field-name fragments that mark an input as carrying something worth stealing.
pub const SENSITIVE_PATTERNS: &[&str] = &[
    "pass", "pwd", "secret", "token", "key", "auth", "credit", "card", "cvv", "cvc", "ssn",
    "security", "private", "hidden",
];

pub fn is_sensitive_field(name: &str) -> bool {
    let name = name.to_lowercase();
    SENSITIVE_PATTERNS.iter().any(|p| name.contains(p))
}

pub fn extract_forms(page_url: &str, html: &str) -> Result<Vec<FormRecord>> {
    let document = Html::parse_document(html);
    forms_in(page_url, &document)
}

pub(crate) fn forms_in(page_url: &str, document: &Html) -> Result<Vec<FormRecord>> {
    let base = Url::parse(page_url)?;
    let form_selector = selector("form")?;
    let input_selector = selector("input, textarea, select")?;

    let mut forms = Vec::new();

    for form in document.select(&form_selector) {
        let method = form
            .value()
            .attr("method")
            .map(|m| m.trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "get".to_string());

        let action = match form.value().attr("action").map(str::trim) {
            Some(raw) if !raw.is_empty() => base
                .join(raw)
                .map(String::from)
                .unwrap_or_else(|_| raw.to_string()),
            _ => page_url.to_string(),
        };

        let inputs: Vec<FormInput> = form
            .select(&input_selector)
            .filter_map(|input| {
                let el = input.value();
                let name = el.attr("name").filter(|n| !n.is_empty())?;
                Some(FormInput {
                    name: name.to_string(),
                    input_type: el.attr("type").unwrap_or("text").to_string(),
                    value: truncate_chars(el.attr("value").unwrap_or_default(), VALUE_MAX_CHARS),
                    sensitive: is_sensitive_field(name),
                })
            })
            .collect();

        if inputs.is_empty() {
            continue;
        }

        forms.push(FormRecord {
            page: page_url.to_string(),
            action,
            method,
            inputs,
        });
    }

    Ok(forms)
}
