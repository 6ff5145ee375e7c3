use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use url::Url;

/// Joins two location segments with exactly one `/` between them.
pub fn join_paths(base: &str, relative: &str) -> String {
    let base = base.trim_end_matches('/');
    let relative = relative.trim_start_matches('/');
    format!("{base}/{relative}")
}

/// Retrieves descriptor documents by location (a URL or a filesystem path).
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Returns the document body; any non-success retrieval is an error.
    async fn fetch_text(&self, location: &str) -> anyhow::Result<String>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .context("build schema http client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch_text(&self, location: &str) -> anyhow::Result<String> {
        let url = Url::parse(location).with_context(|| format!("parse url: {location}"))?;
        tracing::debug!(%url, "fetch document");

        let response = self
            .client
            .get(url.clone())
            .header(USER_AGENT, "schema-browser/0.1")
            .header(ACCEPT, "application/json,*/*;q=0.8")
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("GET {url} returned {status}");
        }

        response
            .text()
            .await
            .with_context(|| format!("read body: {url}"))
    }
}

/// Reads documents from the local filesystem; locations are plain paths.
#[derive(Debug, Clone, Default)]
pub struct FsFetcher;

#[async_trait]
impl DocumentFetcher for FsFetcher {
    async fn fetch_text(&self, location: &str) -> anyhow::Result<String> {
        let path = PathBuf::from(location);
        tracing::debug!(path = %path.display(), "read document");
        tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("read: {}", path.display()))
    }
}

pub fn is_remote_base(base: &str) -> bool {
    Url::parse(base)
        .map(|url| url.scheme() == "http" || url.scheme() == "https")
        .unwrap_or(false)
}

/// Picks the HTTP fetcher for `http(s)://` bases and the filesystem fetcher otherwise.
pub fn fetcher_for_base(base: &str, timeout: Duration) -> anyhow::Result<Arc<dyn DocumentFetcher>> {
    if is_remote_base(base) {
        Ok(Arc::new(HttpFetcher::new(timeout)?))
    } else {
        Ok(Arc::new(FsFetcher))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_normalizes_to_single_slash() {
        assert_eq!(join_paths("a/", "/b"), "a/b");
        assert_eq!(join_paths("a", "b"), "a/b");
        assert_eq!(join_paths("a///", "//b"), "a/b");
        assert_eq!(join_paths("a", "/b/c.json"), "a/b/c.json");
        assert_eq!(
            join_paths("http://host:8000/output/", "summary.json"),
            "http://host:8000/output/summary.json"
        );
    }

    #[test]
    fn remote_detection_only_accepts_http_schemes() {
        assert!(is_remote_base("http://localhost/output"));
        assert!(is_remote_base("https://example.com/schemas/summary.json"));
        assert!(!is_remote_base("./output"));
        assert!(!is_remote_base("/var/schemas"));
        assert!(!is_remote_base("file:///var/schemas"));
    }

    #[tokio::test]
    async fn fs_fetcher_reports_missing_files() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        let present = temp.path().join("summary.json");
        std::fs::write(&present, "{}")?;

        let fetcher = FsFetcher;
        assert_eq!(fetcher.fetch_text(&present.to_string_lossy()).await?, "{}");

        let missing = temp.path().join("missing.json");
        let err = fetcher
            .fetch_text(&missing.to_string_lossy())
            .await
            .expect_err("missing file must fail");
        assert!(format!("{err:#}").contains("missing.json"));
        Ok(())
    }
}
