use crate::config::CrawlConfig;
use crate::error::Result;
use crate::extract::analyze_page;
use crate::fetcher::{FetchedPage, Fetcher};
use crate::frontier::{Frontier, FrontierEntry};
use crate::result::{CrawlResult, PageRecord};
use crate::scope::is_in_scope;
use crate::target::Target;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Called before each fetch with the running count of processed entries and the URL.
pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlState {
    Idle,
    Running,
    /// Frontier ran dry.
    Exhausted,
    PageLimitReached,
    /// Stop flag was raised; the result is partial.
    Interrupted,
}

impl CrawlState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CrawlState::Exhausted | CrawlState::PageLimitReached | CrawlState::Interrupted
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CrawlState::Idle => "idle",
            CrawlState::Running => "running",
            CrawlState::Exhausted => "exhausted",
            CrawlState::PageLimitReached => "page limit reached",
            CrawlState::Interrupted => "interrupted",
        }
    }
}

/// Single-worker breadth-first crawler. Exactly one fetch is in flight at a time.
pub struct Crawler {
    config: CrawlConfig,
    progress_callback: Option<ProgressCallback>,
    stop_flag: Option<Arc<AtomicBool>>,
}

impl Crawler {
    pub fn new() -> Self {
        Self::with_config(CrawlConfig::default())
    }

    pub fn with_config(config: CrawlConfig) -> Self {
        Self {
            config,
            progress_callback: None,
            stop_flag: None,
        }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.config.delay = delay;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Checked before every frontier pop; raising it ends the crawl as `Interrupted`.
    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(flag);
        self
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Crawl outward from `seed`. Only an unusable seed (or HTTP client setup)
    /// fails; everything that goes wrong per page is absorbed into the result.
    pub async fn crawl(&self, seed: &str) -> Result<CrawlResult> {
        let target = Target::parse(seed)?;
        // dropped on every exit path, which closes the pool
        let fetcher = Fetcher::new(&self.config)?;

        info!(
            "Starting crawl of {} (max pages {}, max depth {})",
            target.as_str(),
            self.config.max_pages,
            self.config.max_depth
        );

        let mut frontier = Frontier::new(self.config.max_depth);
        frontier.enqueue(target.as_str().to_string(), 0);

        let mut result = CrawlResult::new(target.as_str().to_string());
        result.state = CrawlState::Running;

        let final_state = loop {
            if self.stop_requested() {
                break CrawlState::Interrupted;
            }
            if frontier.is_empty() {
                break CrawlState::Exhausted;
            }
            if result.pages_processed >= self.config.max_pages {
                break CrawlState::PageLimitReached;
            }
            let Some(entry) = frontier.dequeue() else {
                break CrawlState::Exhausted;
            };

            if result.pages_processed > 0 && !self.config.delay.is_zero() {
                tokio::time::sleep(self.config.delay).await;
            }

            result.pages_processed += 1;
            if let Some(ref callback) = self.progress_callback {
                callback(result.pages_processed, entry.url.clone());
            }

            match fetcher.fetch(&entry.url).await {
                Ok(page) => self.process_page(&target, &mut frontier, &mut result, entry, page),
                Err(e) => {
                    warn!("Skipping {}: {}", entry.url, e);
                    result.record_fetch_failure();
                }
            }
        };

        result.finish(final_state);
        info!(
            "Crawl of {} finished ({}): {} pages, {} fetch failures, {} visited",
            target.as_str(),
            final_state.as_str(),
            result.pages.len(),
            result.fetch_failures,
            frontier.visited_count()
        );

        Ok(result)
    }

    fn stop_requested(&self) -> bool {
        self.stop_flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn process_page(
        &self,
        target: &Target,
        frontier: &mut Frontier,
        result: &mut CrawlResult,
        entry: FrontierEntry,
        page: FetchedPage,
    ) {
        let mut analysis = analyze_page(target, &entry.url, &page.body);
        let links = std::mem::take(&mut analysis.links);

        let record = PageRecord {
            id: PageRecord::page_id(&entry.url),
            url: entry.url.clone(),
            final_url: page.final_url,
            status_code: page.status,
            depth: entry.depth,
            title: analysis.title.clone(),
            links_count: analysis.links_count,
            forms_count: analysis.forms_count,
            secrets_found: analysis.secrets.len(),
            timestamp: Utc::now(),
        };
        result.record_page(record, analysis);

        if entry.depth >= self.config.max_depth {
            return;
        }

        let mut queued = 0;
        for link in links {
            if !is_in_scope(target, &link) {
                debug!("  -> Out of scope: {}", link);
                continue;
            }
            if frontier.enqueue(link, entry.depth + 1) {
                queued += 1;
            }
        }
        debug!("Queued {} new URLs from {}", queued, entry.url);
    }
}

impl Default for Crawler {
    fn default() -> Self {
        Self::new()
    }
}
