use crate::config::CrawlConfig;
use crate::error::{Result, ScanError};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, UPGRADE_INSECURE_REQUESTS};
use reqwest::{Client, StatusCode};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// A page that came back with `200 OK`.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Where the redirect chain ended.
    pub final_url: String,
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub response_time: Duration,
}

/// Owns the connection pool for one crawl. Dropping it closes the pool.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: &CrawlConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool_size)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(10))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self { client })
    }

    /// GET `url`, following redirects. Anything but `200 OK` is an error.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        debug!("Fetching {}", url);

        let start = Instant::now();
        let response = self.client.get(url).send().await?;
        let response_time = start.elapsed();

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ScanError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response.text().await?;

        Ok(FetchedPage {
            final_url,
            status: status.as_u16(),
            headers,
            body,
            response_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header_exists, method, path},
    };

    fn quick_config() -> CrawlConfig {
        CrawlConfig {
            timeout: Duration::from_millis(500),
            connect_timeout: Duration::from_millis(250),
            ..CrawlConfig::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_ok_returns_body_and_headers() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .and(header_exists("user-agent"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .insert_header("x-powered-by", "PHP/5.6")
                    .set_body_string("<html><title>Hi</title></html>"),
            )
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new(&quick_config()).unwrap();
        let page = fetcher.fetch(&format!("{}/", mock_server.uri())).await.unwrap();

        assert_eq!(page.status, 200);
        assert_eq!(page.body, "<html><title>Hi</title></html>");
        assert_eq!(page.headers.get("x-powered-by").map(String::as_str), Some("PHP/5.6"));
        assert_eq!(page.final_url, format!("{}/", mock_server.uri()));
    }

    #[tokio::test]
    async fn test_fetch_follows_redirects() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(
                ResponseTemplate::new(301)
                    .insert_header("location", format!("{}/new", mock_server.uri()).as_str()),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new"))
            .respond_with(ResponseTemplate::new(200).set_body_string("moved"))
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new(&quick_config()).unwrap();
        let page = fetcher
            .fetch(&format!("{}/old", mock_server.uri()))
            .await
            .unwrap();

        assert_eq!(page.final_url, format!("{}/new", mock_server.uri()));
        assert_eq!(page.body, "moved");
    }

    #[tokio::test]
    async fn test_fetch_non_200_is_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new(&quick_config()).unwrap();
        let err = fetcher
            .fetch(&format!("{}/missing", mock_server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, ScanError::UnexpectedStatus { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new(&quick_config()).unwrap();
        let err = fetcher
            .fetch(&format!("{}/slow", mock_server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, ScanError::HttpError(_)));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_error() {
        let fetcher = Fetcher::new(&quick_config()).unwrap();
        let result = fetcher.fetch("http://127.0.0.1:1/").await;
        assert!(matches!(result, Err(ScanError::HttpError(_))));
    }
}
