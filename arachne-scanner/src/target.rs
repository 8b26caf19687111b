use crate::error::{Result, ScanError};
use url::Url;

/// The seed of a crawl. Fixes the scheme and host every discovered link is
/// measured against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    url: Url,
    host: String,
    authority: String,
}

impl Target {
    /// Parse a seed string. A missing scheme defaults to `https`.
    pub fn parse(seed: &str) -> Result<Self> {
        let seed = seed.trim();
        if seed.is_empty() {
            return Err(ScanError::InvalidUrl("seed URL is empty".to_string()));
        }

        let with_scheme = if has_http_scheme(seed) {
            seed.to_string()
        } else {
            format!("https://{}", seed)
        };

        let mut url = Url::parse(&with_scheme)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", seed, e)))?;
        url.set_fragment(None);

        let host = url
            .host_str()
            .ok_or_else(|| ScanError::InvalidUrl(format!("{}: no host", seed)))?
            .to_string();
        let authority = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.clone(),
        };

        Ok(Self {
            url,
            host,
            authority,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Host plus explicit port, if any.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Canonicalize `raw` as found on the page at `base`.
    ///
    /// Protocol-relative references take the target's scheme, root-relative
    /// ones take the target's scheme and authority, anything else that is not
    /// already `http(s)` is joined onto `base`. The fragment is dropped and a
    /// result without a host is rejected.
    pub fn normalize(&self, raw: &str, base: &str) -> Option<String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let mut url = if raw.starts_with("//") {
            Url::parse(&format!("{}:{}", self.scheme(), raw)).ok()?
        } else if raw.starts_with('/') {
            Url::parse(&format!("{}://{}{}", self.scheme(), self.authority, raw)).ok()?
        } else if has_http_scheme(raw) {
            Url::parse(raw).ok()?
        } else {
            Url::parse(base).ok()?.join(raw).ok()?
        };

        url.set_fragment(None);
        url.host_str()?;

        Some(url.into())
    }
}

fn has_http_scheme(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> Target {
        Target::parse("https://x.com").unwrap()
    }

    #[test]
    fn test_parse_defaults_to_https() {
        let t = Target::parse("example.com").unwrap();
        assert_eq!(t.scheme(), "https");
        assert_eq!(t.host(), "example.com");
        assert_eq!(t.as_str(), "https://example.com/");
    }

    #[test]
    fn test_parse_keeps_explicit_scheme_and_port() {
        let t = Target::parse("http://127.0.0.1:8080/start#top").unwrap();
        assert_eq!(t.scheme(), "http");
        assert_eq!(t.host(), "127.0.0.1");
        assert_eq!(t.authority(), "127.0.0.1:8080");
        assert_eq!(t.as_str(), "http://127.0.0.1:8080/start");
    }

    #[test]
    fn test_parse_rejects_empty_and_garbage() {
        assert!(matches!(Target::parse(""), Err(ScanError::InvalidUrl(_))));
        assert!(matches!(Target::parse("   "), Err(ScanError::InvalidUrl(_))));
        assert!(matches!(
            Target::parse("not a valid url!!!"),
            Err(ScanError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_normalize_root_relative() {
        assert_eq!(
            target().normalize("/a/b", "https://x.com/p"),
            Some("https://x.com/a/b".to_string())
        );
    }

    #[test]
    fn test_normalize_protocol_relative() {
        assert_eq!(
            target().normalize("//cdn.x.com/y", "https://x.com/p"),
            Some("https://cdn.x.com/y".to_string())
        );
    }

    #[test]
    fn test_normalize_fragment_only_never_keeps_hash() {
        let normalized = target().normalize("#frag", "https://x.com/p");
        if let Some(url) = normalized {
            assert!(!url.contains('#'));
            assert_eq!(url, "https://x.com/p");
        }
    }

    #[test]
    fn test_normalize_relative_against_base() {
        assert_eq!(
            target().normalize("c/d?q=1#x", "https://x.com/a/b"),
            Some("https://x.com/a/c/d?q=1".to_string())
        );
        assert_eq!(
            target().normalize("../up", "https://x.com/a/b/"),
            Some("https://x.com/a/up".to_string())
        );
    }

    #[test]
    fn test_normalize_absolute_keeps_query() {
        assert_eq!(
            target().normalize("  https://other.com/s?id=7#frag  ", "https://x.com/"),
            Some("https://other.com/s?id=7".to_string())
        );
    }

    #[test]
    fn test_normalize_rejects_hostless() {
        let t = target();
        assert_eq!(t.normalize("", "https://x.com/"), None);
        assert_eq!(t.normalize("mailto:a@x.com", "https://x.com/"), None);
        assert_eq!(t.normalize("javascript:void(0)", "https://x.com/"), None);
    }

    #[test]
    fn test_normalize_root_relative_keeps_target_port() {
        let t = Target::parse("http://127.0.0.1:8080").unwrap();
        assert_eq!(
            t.normalize("/login", "http://127.0.0.1:8080/a/b"),
            Some("http://127.0.0.1:8080/login".to_string())
        );
    }
}
