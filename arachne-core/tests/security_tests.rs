// Tests for security recommendations

use arachne_core::security::{
    Severity, analyze_crawl_result, check_api_endpoints, check_emails, check_exposed_files,
    check_exposed_secrets, check_forms, check_insecure_form_transport,
};
use arachne_scanner::CrawlResult;
use arachne_scanner::result::{
    ApiEndpointFinding, EmailFinding, FileReferenceFinding, FormInput, FormRecord, SecretFinding,
    SecretKind,
};

fn empty_result() -> CrawlResult {
    CrawlResult::new("http://target.example.com/".to_string())
}

fn form(action: &str, fields: &[(&str, bool)]) -> FormRecord {
    FormRecord {
        page: "http://target.example.com/login".to_string(),
        action: action.to_string(),
        method: "post".to_string(),
        inputs: fields
            .iter()
            .map(|(name, sensitive)| FormInput {
                name: name.to_string(),
                input_type: "text".to_string(),
                value: String::new(),
                sensitive: *sensitive,
            })
            .collect(),
    }
}

fn file(filename: &str) -> FileReferenceFinding {
    FileReferenceFinding {
        filename: filename.to_string(),
        url: format!("http://target.example.com{}", filename),
        page: "http://target.example.com/".to_string(),
    }
}

#[test]
fn test_empty_result_has_no_recommendations() {
    assert!(analyze_crawl_result(&empty_result()).is_empty());
}

#[test]
fn test_check_exposed_secrets_counts_pages() {
    let mut result = empty_result();
    for page in ["/a", "/a", "/b"] {
        result.secrets.push(SecretFinding {
            kind: SecretKind::Jwt,
            value: "eyJhbGciOi...".to_string(),
            page: format!("http://target.example.com{}", page),
            pattern: "eyJ".to_string(),
        });
    }

    let recs = check_exposed_secrets(&result);
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].severity, Severity::High);
    assert!(recs[0].detail.contains("3 potential secrets on 2 page(s)"));
}

#[test]
fn test_check_forms() {
    let mut result = empty_result();
    assert!(check_forms(&result).is_empty());

    result.forms.push(form("http://target.example.com/search", &[("q", false)]));
    let recs = check_forms(&result);
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].severity, Severity::Medium);
}

#[test]
fn test_check_insecure_form_transport_flags_http() {
    let mut result = empty_result();
    result.forms.push(form(
        "http://target.example.com/session",
        &[("user", false), ("password", true)],
    ));

    let recs = check_insecure_form_transport(&result);
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].severity, Severity::High);
    assert!(recs[0].detail.contains("password"));
    assert!(!recs[0].detail.contains("user,"));
}

#[test]
fn test_check_insecure_form_transport_ignores_https_and_local() {
    let mut result = empty_result();
    result
        .forms
        .push(form("https://target.example.com/session", &[("password", true)]));
    result
        .forms
        .push(form("http://127.0.0.1:8080/session", &[("password", true)]));
    result
        .forms
        .push(form("http://localhost/session", &[("token", true)]));

    assert!(check_insecure_form_transport(&result).is_empty());
}

#[test]
fn test_check_insecure_form_transport_ignores_non_sensitive() {
    let mut result = empty_result();
    result
        .forms
        .push(form("http://target.example.com/search", &[("q", false)]));

    assert!(check_insecure_form_transport(&result).is_empty());
}

#[test]
fn test_check_api_endpoints() {
    let mut result = empty_result();
    result.api_endpoints.push(ApiEndpointFinding {
        endpoint: "/graphql".to_string(),
        full_url: "http://target.example.com/graphql".to_string(),
        page: "http://target.example.com/".to_string(),
    });

    let recs = check_api_endpoints(&result);
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].severity, Severity::Medium);
}

#[test]
fn test_check_emails() {
    let mut result = empty_result();
    result.emails.push(EmailFinding {
        email: "admin@target.example.com".to_string(),
        page: "http://target.example.com/".to_string(),
    });

    let recs = check_emails(&result);
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].severity, Severity::Low);
}

#[test]
fn test_check_exposed_files_severity_by_name() {
    let mut result = empty_result();
    result.files.push(file("/.env"));
    result.files.push(file("/dump.sql"));
    result.files.push(file("/backup_2023.zip.json"));
    result.files.push(file("/data.csv"));

    let recs = check_exposed_files(&result);
    let severities: Vec<Severity> = recs.iter().map(|r| r.severity).collect();
    assert_eq!(
        severities,
        vec![Severity::Critical, Severity::High, Severity::Medium]
    );
}

#[test]
fn test_check_exposed_files_case_insensitive() {
    let mut result = empty_result();
    result.files.push(file("/APP.CONFIG"));

    let recs = check_exposed_files(&result);
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].severity, Severity::High);
}

#[test]
fn test_analyze_crawl_result_sorted_by_severity() {
    let mut result = empty_result();
    result.emails.push(EmailFinding {
        email: "a@b.co".to_string(),
        page: "http://target.example.com/".to_string(),
    });
    result.forms.push(form("http://target.example.com/login", &[("pass", true)]));
    result.files.push(file("/.env"));

    let recs = analyze_crawl_result(&result);
    let severities: Vec<Severity> = recs.iter().map(|r| r.severity).collect();
    let mut sorted = severities.clone();
    sorted.sort();

    assert_eq!(severities, sorted);
    assert_eq!(severities.first(), Some(&Severity::Critical));
    assert_eq!(severities.last(), Some(&Severity::Low));
}

#[test]
fn test_severity_as_str() {
    assert_eq!(Severity::Critical.as_str(), "critical");
    assert_eq!(Severity::Info.as_str(), "info");
}
