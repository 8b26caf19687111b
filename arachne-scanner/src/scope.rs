// Which normalized URLs the frontier may accept

use crate::target::Target;
use url::Url;

/// Binary and media extensions never worth fetching for recon.
pub const EXCLUDED_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".pdf", ".zip", ".rar", ".tar", ".gz",
];

/// Substrings that usually mark session-terminating links.
const SESSION_KILLERS: &[&str] = &["logout", "exit"];

pub fn is_in_scope(target: &Target, url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };

    let Some(host) = parsed.host_str() else {
        return false;
    };
    if !is_same_domain(host, target.host()) {
        return false;
    }

    let path = parsed.path().to_ascii_lowercase();
    if EXCLUDED_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return false;
    }

    if url.contains('#') {
        return false;
    }

    let lower = url.to_lowercase();
    !SESSION_KILLERS.iter().any(|s| lower.contains(s))
}

fn is_same_domain(host: &str, base_domain: &str) -> bool {
    host.eq_ignore_ascii_case(base_domain)
        || host
            .to_ascii_lowercase()
            .ends_with(&format!(".{}", base_domain.to_ascii_lowercase()))
}
