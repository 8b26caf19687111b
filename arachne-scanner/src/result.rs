use crate::crawler::CrawlState;
use crate::extract::PageAnalysis;
use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

/// One successfully fetched page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    /// First 8 hex chars of MD5(url).
    pub id: String,
    pub url: String,
    pub final_url: String,
    pub status_code: u16,
    pub depth: usize,
    pub title: String,
    pub links_count: usize,
    pub forms_count: usize,
    pub secrets_found: usize,
    pub timestamp: DateTime<Utc>,
}

impl PageRecord {
    pub fn page_id(url: &str) -> String {
        let digest = Md5::digest(url.as_bytes());
        let hex = format!("{:x}", digest);
        hex[..8].to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormInput {
    pub name: String,
    #[serde(rename = "type")]
    pub input_type: String,
    pub value: String,
    pub sensitive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormRecord {
    pub page: String,
    pub action: String,
    pub method: String,
    pub inputs: Vec<FormInput>,
}

impl FormRecord {
    pub fn sensitive_inputs(&self) -> impl Iterator<Item = &FormInput> {
        self.inputs.iter().filter(|i| i.sensitive)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretKind {
    ApiKey,
    AwsKey,
    Password,
    Jwt,
}

impl SecretKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecretKind::ApiKey => "api_key",
            SecretKind::AwsKey => "aws_key",
            SecretKind::Password => "password",
            SecretKind::Jwt => "jwt",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecretFinding {
    pub kind: SecretKind,
    pub value: String,
    pub page: String,
    pub pattern: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailFinding {
    pub email: String,
    pub page: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentFinding {
    pub comment: String,
    pub page: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEndpointFinding {
    pub endpoint: String,
    pub full_url: String,
    pub page: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReferenceFinding {
    pub filename: String,
    pub url: String,
    pub page: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataFinding {
    pub name: String,
    pub content: String,
    pub page: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlSummary {
    pub pages: usize,
    pub pages_processed: usize,
    pub fetch_failures: usize,
    pub forms: usize,
    pub secrets: usize,
    pub emails: usize,
    pub comments: usize,
    pub api_endpoints: usize,
    pub files: usize,
    pub metadata: usize,
}

/// Everything a crawl produced. Valid to inspect at any point; a crawl that
/// stops early leaves a consistent partial result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlResult {
    pub target: String,
    pub state: CrawlState,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub pages_processed: usize,
    pub fetch_failures: usize,
    pub pages: Vec<PageRecord>,
    pub forms: Vec<FormRecord>,
    pub secrets: Vec<SecretFinding>,
    pub emails: Vec<EmailFinding>,
    pub comments: Vec<CommentFinding>,
    pub api_endpoints: Vec<ApiEndpointFinding>,
    pub files: Vec<FileReferenceFinding>,
    pub metadata: Vec<MetadataFinding>,
}

impl CrawlResult {
    pub fn new(target: String) -> Self {
        Self {
            target,
            state: CrawlState::Idle,
            started_at: Utc::now(),
            finished_at: None,
            pages_processed: 0,
            fetch_failures: 0,
            pages: Vec::new(),
            forms: Vec::new(),
            secrets: Vec::new(),
            emails: Vec::new(),
            comments: Vec::new(),
            api_endpoints: Vec::new(),
            files: Vec::new(),
            metadata: Vec::new(),
        }
    }

    /// Appends the page record and every finding of one analysed page.
    pub fn record_page(&mut self, page: PageRecord, analysis: PageAnalysis) {
        self.pages.push(page);
        self.forms.extend(analysis.forms);
        self.secrets.extend(analysis.secrets);
        self.emails.extend(analysis.emails);
        self.comments.extend(analysis.comments);
        self.api_endpoints.extend(analysis.api_endpoints);
        self.files.extend(analysis.files);
        self.metadata.extend(analysis.metadata);
    }

    pub fn record_fetch_failure(&mut self) {
        self.fetch_failures += 1;
    }

    pub fn finish(&mut self, state: CrawlState) {
        self.state = state;
        self.finished_at = Some(Utc::now());
    }

    pub fn host(&self) -> Option<String> {
        url::Url::parse(&self.target)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
    }

    pub fn summary(&self) -> CrawlSummary {
        CrawlSummary {
            pages: self.pages.len(),
            pages_processed: self.pages_processed,
            fetch_failures: self.fetch_failures,
            forms: self.forms.len(),
            secrets: self.secrets.len(),
            emails: self.emails.len(),
            comments: self.comments.len(),
            api_endpoints: self.api_endpoints.len(),
            files: self.files.len(),
            metadata: self.metadata.len(),
        }
    }
}
