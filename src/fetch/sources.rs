// Page sources: HTTP, local files, and a dispatcher between the two.

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use super::PageSource;

/// Default User-Agent for page requests.
pub const DEFAULT_USER_AGENT: &str = "dupecheck/0.1 (duplicate-content-checker)";

/// Fetches pages over HTTP(S). One GET per page; non-success statuses are errors.
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn load(&self, location: &str) -> Result<String> {
        debug!(url = location, "GET page");

        let response = self
            .client
            .get(location)
            .send()
            .await
            .with_context(|| format!("Request failed: {location}"))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("{location} returned {status}");
        }

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read body of {location}"))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Reads pages from the local filesystem.
#[derive(Default)]
pub struct FileSource;

#[async_trait]
impl PageSource for FileSource {
    async fn load(&self, location: &str) -> Result<String> {
        let bytes = tokio::fs::read(Path::new(location))
            .await
            .with_context(|| format!("Failed to read {location}"))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Sends `http://` and `https://` locations to HTTP, everything else to disk.
pub struct LocalOrRemote {
    pub http: HttpSource,
    pub files: FileSource,
}

impl LocalOrRemote {
    pub fn new(user_agent: &str) -> Result<Self> {
        Ok(Self {
            http: HttpSource::new(user_agent)?,
            files: FileSource,
        })
    }
}

pub fn is_remote(location: &str) -> bool {
    let lower = location.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[async_trait]
impl PageSource for LocalOrRemote {
    async fn load(&self, location: &str) -> Result<String> {
        if is_remote(location) {
            self.http.load(location).await
        } else {
            self.files.load(location).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.com/a"));
        assert!(is_remote("HTTP://example.com"));
        assert!(!is_remote("./pages/a.html"));
        assert!(!is_remote("/tmp/https-notes.html"));
    }

    #[tokio::test]
    async fn test_file_source_reads_lossy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, b"<p>ok \xff text</p>").unwrap();
        let html = FileSource.load(path.to_str().unwrap()).await.unwrap();
        assert!(html.starts_with("<p>ok "));
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let res = FileSource.load("/definitely/not/here.html").await;
        assert!(res.is_err());
    }
}
