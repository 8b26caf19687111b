use arachne_core::report::{ReportFormat, generate_text_report, persist_report};
use arachne_scanner::{CrawlConfig, Target};
use clap::ArgMatches;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::warn;

// Helper functions for crawl handler

/// Load URLs from either a file or a single URL argument
pub fn load_urls_from_source(
    url: Option<&String>,
    hosts_file: Option<&PathBuf>,
) -> Result<Vec<String>, String> {
    if let Some(hosts_file_path) = hosts_file {
        load_urls_from_file(hosts_file_path)
    } else if let Some(url) = url {
        Ok(vec![url.clone()])
    } else {
        Err("Either --url or --hosts-file must be provided".to_string())
    }
}

/// Load and parse URLs from a file. Blank lines and `#` comments are skipped.
pub fn load_urls_from_file(path: &Path) -> Result<Vec<String>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read hosts file {}: {}", path.display(), e))?;

    let urls: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(parse_url_line)
        .collect();

    if urls.is_empty() {
        return Err(format!("No valid URLs found in {}", path.display()));
    }

    Ok(urls)
}

/// Parse a single line as a crawl target, assuming https:// when no scheme is given
pub fn parse_url_line(line: &str) -> Option<String> {
    match Target::parse(line) {
        Ok(target) => Some(target.as_str().to_string()),
        Err(e) => {
            eprintln!("{} Skipping invalid URL '{}': {}", "⚠".yellow(), line, e);
            None
        }
    }
}

pub fn crawl_config_from(
    max_pages: usize,
    max_depth: usize,
    timeout_secs: u64,
    delay_ms: u64,
) -> CrawlConfig {
    CrawlConfig {
        max_pages,
        max_depth,
        timeout: Duration::from_secs(timeout_secs),
        delay: Duration::from_millis(delay_ms),
        ..CrawlConfig::default()
    }
}

/// Where reports go, if anywhere. `-o` implies saving; `--save` alone uses the
/// current directory.
pub fn report_directory(output: Option<&String>, save: bool) -> Option<PathBuf> {
    match output {
        Some(dir) => Some(PathBuf::from(shellexpand::tilde(dir).as_ref())),
        None if save => Some(PathBuf::from(".")),
        None => None,
    }
}

/// Raise `stop_flag` on Ctrl-C. The crawler notices it before its next fetch.
fn spawn_interrupt_handler(stop_flag: Arc<AtomicBool>) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Unable to listen for Ctrl-C: {}", e);
            return;
        }
        stop_flag.store(true, Ordering::SeqCst);
        eprintln!(
            "\n{} Interrupted, finishing with the pages collected so far",
            "⚠".yellow().bold()
        );
    });
}

// Re-export crawl types and functions from arachne-core
pub use arachne_core::crawl::{CrawlOptions, CrawlProgressCallback, execute_crawl, extract_url_path};

pub async fn handle_crawl(sub_matches: &ArgMatches, quiet: bool) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let url = sub_matches.get_one::<String>("url");
    let hosts_file = sub_matches.get_one::<PathBuf>("hosts-file");
    let max_pages = *sub_matches.get_one::<usize>("max-pages").unwrap_or(&50);
    let max_depth = *sub_matches.get_one::<usize>("max-depth").unwrap_or(&3);
    let timeout = *sub_matches.get_one::<u64>("timeout").unwrap_or(&30);
    let delay = *sub_matches.get_one::<u64>("delay").unwrap_or(&100);
    let format = sub_matches
        .get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Json);
    let report_dir = report_directory(
        sub_matches.get_one::<String>("output"),
        sub_matches.get_flag("save"),
    );

    // Load URLs from source
    let urls = match load_urls_from_source(url, hosts_file) {
        Ok(urls) => urls,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    if !quiet {
        println!("\n{} Crawling {} host(s)", "→".blue(), urls.len());
        println!("Max pages: {}", max_pages);
        println!("Max depth: {}", max_depth);
        println!("Delay: {} ms\n", delay);
    }

    let stop_flag = Arc::new(AtomicBool::new(false));
    spawn_interrupt_handler(stop_flag.clone());

    let options = CrawlOptions {
        urls,
        config: crawl_config_from(max_pages, max_depth, timeout, delay),
        show_progress_bars: !quiet,
        stop_flag: Some(stop_flag),
    };

    // Execute crawl with progress callback
    let progress_callback: CrawlProgressCallback = Arc::new(|msg: String| {
        println!("{}", msg);
    });

    let all_results = match execute_crawl(options, Some(progress_callback)).await {
        Ok(results) => results,
        Err(e) => {
            eprintln!("{} Crawl failed: {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    println!("\n{} Crawl complete!\n", "✓".green().bold());

    for result in &all_results {
        print!("{}", generate_text_report(result));
        println!();

        if let Some(ref dir) = report_dir {
            match persist_report(result, dir, format) {
                Ok(path) => println!(
                    "{} Report saved: {}",
                    "✓".green().bold(),
                    path.display().to_string().bright_white()
                ),
                Err(e) => eprintln!("{} {:#}", "✗".red().bold(), e),
            }
        }
    }
}
