pub mod jobs;
pub mod pages;
pub mod reports;
pub mod request;

pub use pages::ApiResponse;

use reqwest::Url;

use crate::error::YtreportyError;

pub const BASE_URL: &str = "https://youtubereporting.googleapis.com";
pub const TOKEN_URL: &str = "https://www.googleapis.com/oauth2/v4/token";

/// HTTP entry point for the YouTube Reporting API.
///
/// Holds the shared connection pool plus the API base URL and the OAuth2
/// token endpoint. Production code uses [`Client::new`]; tests point both
/// URLs at a mock server.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: Url,
    pub(crate) token_url: Url,
}

impl Client {
    pub fn new() -> Self {
        Self::with_urls(BASE_URL, TOKEN_URL).expect("compiled-in URLs are valid")
    }

    pub fn with_urls(base_url: &str, token_url: &str) -> Result<Self, YtreportyError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| YtreportyError::Protocol(format!("Invalid base URL '{base_url}': {e}")))?;
        let token_url = Url::parse(token_url)
            .map_err(|e| YtreportyError::Protocol(format!("Invalid token URL '{token_url}': {e}")))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            token_url,
        })
    }

    /// Resolve a request path against the base URL. Absolute URLs (report
    /// download links) pass through untouched.
    pub(crate) fn resolve(&self, path: &str) -> Result<Url, YtreportyError> {
        match Url::parse(path) {
            Ok(url) => Ok(url),
            Err(_) => self
                .base_url
                .join(path)
                .map_err(|e| YtreportyError::Protocol(format!("Invalid request path '{path}': {e}"))),
        }
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_relative_path() {
        let client = Client::new();
        let url = client.resolve("/v1/jobs").unwrap();
        assert_eq!(url.as_str(), "https://youtubereporting.googleapis.com/v1/jobs");
    }

    #[test]
    fn resolve_absolute_url_passthrough() {
        let client = Client::new();
        let url = client
            .resolve("https://youtubereporting.googleapis.com/v1/media/report.csv?alt=media")
            .unwrap();
        assert_eq!(url.host_str(), Some("youtubereporting.googleapis.com"));
        assert_eq!(url.query(), Some("alt=media"));
    }

    #[test]
    fn with_urls_rejects_garbage() {
        let err = Client::with_urls("not a url", TOKEN_URL).unwrap_err();
        assert!(matches!(err, YtreportyError::Protocol(_)));
    }
}
