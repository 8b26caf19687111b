use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unexpected status {status} for {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<url::ParseError> for ScanError {
    fn from(e: url::ParseError) -> Self {
        ScanError::ParseError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
