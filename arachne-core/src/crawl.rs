use arachne_scanner::{CrawlConfig, CrawlResult, Crawler};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;
use url::Url;

/// Options for configuring a crawl operation
pub struct CrawlOptions {
    /// Seeds, crawled one after another, each as its own target.
    pub urls: Vec<String>,
    pub config: CrawlConfig,
    pub show_progress_bars: bool,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

/// Callback for reporting crawl progress
pub type CrawlProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Extract the path component from a URL
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() || path == "/" {
                "/".to_string()
            } else {
                path
            }
        })
        .unwrap_or_else(|| url.to_string())
}

/// Execute a crawl with the given options.
/// A target that cannot be crawled is reported through the callback and
/// skipped; the call only fails when no target produced a result.
pub async fn execute_crawl(
    options: CrawlOptions,
    progress_callback: Option<CrawlProgressCallback>,
) -> Result<Vec<CrawlResult>, String> {
    let CrawlOptions {
        urls,
        config,
        show_progress_bars,
        stop_flag,
    } = options;

    let max_pages = config.max_pages;

    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Starting crawl...");
        Some(Arc::new(pb))
    } else {
        None
    };

    let mut crawler = Crawler::with_config(config);
    if let Some(ref pb) = progress_bar {
        let pb_clone = pb.clone();
        crawler = crawler.with_progress_callback(Arc::new(move |count: usize, url: String| {
            pb_clone.set_message(format!(
                "Crawling... [{}/{}] {}",
                count,
                max_pages,
                extract_url_path(&url)
            ));
        }));
    }
    if let Some(flag) = stop_flag {
        crawler = crawler.with_stop_flag(flag);
    }

    let mut all_results = Vec::new();
    let mut errors = Vec::new();

    for (idx, url_str) in urls.iter().enumerate() {
        if let Some(ref callback) = progress_callback
            && urls.len() > 1
        {
            callback(format!(
                "Crawling host {}/{}: {}",
                idx + 1,
                urls.len(),
                url_str
            ));
        }

        match crawler.crawl(url_str).await {
            Ok(result) => all_results.push(result),
            Err(e) => {
                if let Some(ref callback) = progress_callback {
                    callback(format!("[!]  Failed to crawl {}: {}", url_str, e));
                }
                errors.push(format!("{}: {}", url_str, e));
            }
        }
    }

    if let Some(ref pb) = progress_bar {
        let total: usize = all_results.iter().map(|r| r.pages_processed).sum();
        pb.finish_with_message(format!("Crawl complete! {} URLs processed", total));
    }

    if all_results.is_empty() && !errors.is_empty() {
        return Err(errors.join("; "));
    }

    Ok(all_results)
}
