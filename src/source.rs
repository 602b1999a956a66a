use crate::types::ThemeWords;
use anyhow::{Context, Result};
use std::future::Future;
use std::path::PathBuf;

/// Where theme vocabularies come from.
///
/// A fetch either yields the whole theme document or fails; partial data is
/// never returned.
pub trait WordListSource {
    fn fetch(&self, theme: &str) -> impl Future<Output = Result<ThemeWords>> + Send;
}

/// Themes bundled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl EmbeddedSource {
    pub const THEMES: [&'static str; 3] = ["space", "magic", "ocean"];

    fn document(theme: &str) -> Option<&'static str> {
        match theme {
            "space" => Some(include_str!("../wordlists/space.json")),
            "magic" => Some(include_str!("../wordlists/magic.json")),
            "ocean" => Some(include_str!("../wordlists/ocean.json")),
            _ => None,
        }
    }
}

impl WordListSource for EmbeddedSource {
    async fn fetch(&self, theme: &str) -> Result<ThemeWords> {
        let json = Self::document(theme)
            .ok_or_else(|| anyhow::anyhow!("No bundled word list for theme {}", theme))?;
        ThemeWords::from_json(json)
            .with_context(|| format!("Failed to parse bundled word list for theme {}", theme))
    }
}

/// Reads `<root>/<theme>.json` from disk
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, theme: &str) -> PathBuf {
        self.root.join(format!("{}.json", theme))
    }
}

impl WordListSource for DirectorySource {
    async fn fetch(&self, theme: &str) -> Result<ThemeWords> {
        let path = self.path_for(theme);
        let json = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read word list {:?}", path))?;
        ThemeWords::from_json(&json).with_context(|| format!("Failed to parse word list {:?}", path))
    }
}

/// Fetches `<base_url>/wordlists/<theme>.json` over HTTP
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Use a preconfigured client (timeouts, proxies, headers)
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn url_for(&self, theme: &str) -> String {
        format!("{}/wordlists/{}.json", self.base_url.trim_end_matches('/'), theme)
    }
}

impl WordListSource for HttpSource {
    async fn fetch(&self, theme: &str) -> Result<ThemeWords> {
        let url = self.url_for(theme);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("HTTP error! status: {}", status.as_u16());
        }

        response
            .json::<ThemeWords>()
            .await
            .with_context(|| format!("Failed to decode word list from {}", url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_embedded_themes_parse() {
        let source = EmbeddedSource;
        for theme in EmbeddedSource::THEMES {
            let words = source.fetch(theme).await.unwrap();
            for key in ["characters", "places", "objects", "actions", "colors"] {
                assert!(
                    words.category(key).is_some(),
                    "theme {} is missing category {}",
                    theme,
                    key
                );
            }
        }
    }

    #[tokio::test]
    async fn test_embedded_unknown_theme_fails() {
        assert!(EmbeddedSource.fetch("desert").await.is_err());
    }

    #[tokio::test]
    async fn test_directory_source_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(dir.path());
        assert!(source.fetch("space").await.is_err());
    }

    #[tokio::test]
    async fn test_directory_source_reads_theme() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("forest.json"),
            r#"{"words": {"characters": ["owl"], "colors": ["green"]}}"#,
        )
        .unwrap();

        let source = DirectorySource::new(dir.path());
        let words = source.fetch("forest").await.unwrap();
        assert_eq!(words.category("characters").unwrap()[0].word(), "owl");
    }

    /// Answer a single request on a local port with a canned response
    async fn serve_once(response: String) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;
        });
        format!("http://{}", addr)
    }

    fn local_source(base_url: String) -> HttpSource {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        HttpSource::with_client(base_url, client)
    }

    #[tokio::test]
    async fn test_http_source_error_status() {
        let base = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string(),
        )
        .await;

        let err = local_source(base).fetch("space").await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP error! status: 404");
    }

    #[tokio::test]
    async fn test_http_source_reads_theme() {
        let body = r#"{"words": {"characters": ["owl"], "colors": ["green"]}}"#;
        let base = serve_once(format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        ))
        .await;

        let words = local_source(base).fetch("forest").await.unwrap();
        assert_eq!(words.category("characters").unwrap()[0].word(), "owl");
        assert_eq!(words.category("colors").unwrap()[0].word(), "green");
    }

    #[test]
    fn test_http_url() {
        let source = HttpSource::new("http://localhost:8000/");
        assert_eq!(
            source.url_for("magic"),
            "http://localhost:8000/wordlists/magic.json"
        );
    }
}
