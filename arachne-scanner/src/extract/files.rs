use crate::error::Result;
use crate::result::FileReferenceFinding;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Document and data extensions worth pulling down by hand.
pub const FILE_EXTENSIONS: &[&str] = &[
    r"pdf", r"docx?", r"xlsx?", r"csv", r"json", r"xml", r"sql", r"env", r"config",
];

static FILE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    FILE_EXTENSIONS
        .iter()
        .map(|ext| {
            Regex::new(&format!(r#"(?i)["']([^"']+\.{})["']"#, ext))
                .expect("hardcoded regex pattern is valid")
        })
        .collect()
});

pub fn extract_files(page_url: &str, html: &str) -> Result<Vec<FileReferenceFinding>> {
    let base = Url::parse(page_url)?;
    let mut files = Vec::new();

    for regex in FILE_PATTERNS.iter() {
        for caps in regex.captures_iter(html) {
            let Some(filename) = caps.get(1).map(|m| m.as_str()) else {
                continue;
            };
            let Ok(url) = base.join(filename) else {
                continue;
            };
            files.push(FileReferenceFinding {
                filename: filename.to_string(),
                url: url.into(),
                page: page_url.to_string(),
            });
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_document_references() {
        let html = r#"
            <a href="/docs/annual.PDF">report</a>
            <a href='export/users.csv'>users</a>
            <script src="/app.js"></script>
            <link href="backup.sql">
        "#;
        let found = extract_files("https://x.com/admin/", html).unwrap();
        let names: Vec<&str> = found.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(names, vec!["/docs/annual.PDF", "export/users.csv", "backup.sql"]);
        assert_eq!(found[1].url, "https://x.com/admin/export/users.csv");
        assert_eq!(found[0].url, "https://x.com/docs/annual.PDF");
    }

    #[test]
    fn test_word_and_excel_variants() {
        let html = r#""a.doc" "b.docx" "c.xls" "d.xlsx""#;
        let found = extract_files("https://x.com/", html).unwrap();
        assert_eq!(found.len(), 4);
    }

    #[test]
    fn test_dotfiles_and_config() {
        let html = r#"<a href="/.env">x</a><a href="/web.config">y</a>"#;
        let found = extract_files("https://x.com/", html).unwrap();
        let names: Vec<&str> = found.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(names, vec!["/.env", "/web.config"]);
    }

    #[test]
    fn test_absolute_reference_kept() {
        let html = r#"<a href="https://cdn.x.com/feed.xml">feed</a>"#;
        let found = extract_files("https://x.com/", html).unwrap();
        assert_eq!(found[0].url, "https://cdn.x.com/feed.xml");
    }
}
