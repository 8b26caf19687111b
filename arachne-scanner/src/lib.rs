pub mod config;
pub mod crawler;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod frontier;
pub mod result;
pub mod scope;
pub mod target;

pub use config::CrawlConfig;
pub use crawler::{CrawlState, Crawler, ProgressCallback};
pub use error::ScanError;
pub use result::{CrawlResult, CrawlSummary, PageRecord};
pub use target::Target;
