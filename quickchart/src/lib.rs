//! Minimal QuickChart GraphViz rendering client.
//!
//! This crate provides a focused client for QuickChart's GraphViz
//! endpoint: it posts DOT source and returns the rendered image bytes.
//! Building the DOT source is someone else's job; this is the thin
//! rendering gateway.

use serde::Serialize;
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://quickchart.io";
const DEFAULT_FORMAT: &str = "png";

/// Errors that can occur when rendering a graph.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// QuickChart GraphViz rendering client.
#[derive(Debug, Clone)]
pub struct QuickChart {
    client: reqwest::Client,
    base_url: String,
    format: String,
}

impl QuickChart {
    /// Create a client against the public QuickChart endpoint.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .connect_timeout(std::time::Duration::from_secs(15))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: DEFAULT_BASE_URL.to_string(),
            format: DEFAULT_FORMAT.to_string(),
        }
    }

    /// Point the client at a different endpoint (e.g. a self-hosted
    /// instance).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the output image format (defaults to png).
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Render DOT source and return the image bytes.
    pub async fn render(&self, dot: &str) -> Result<Vec<u8>, Error> {
        let request = RenderRequest {
            format: &self.format,
            graph: dot,
        };

        let response = self
            .client
            .post(format!("{}/graphviz", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status,
                message: body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

impl Default for QuickChart {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
struct RenderRequest<'a> {
    format: &'a str,
    graph: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = QuickChart::new();
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
        assert_eq!(client.format, DEFAULT_FORMAT);
    }

    #[test]
    fn test_client_builders() {
        let client = QuickChart::new()
            .with_base_url("http://localhost:3400")
            .with_format("svg");

        assert_eq!(client.base_url, "http://localhost:3400");
        assert_eq!(client.format, "svg");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_network_error() {
        // A closed local port fails fast without touching the real service.
        let client = QuickChart::new().with_base_url("http://127.0.0.1:9");

        match client.render("digraph G {}").await {
            Err(Error::Network(_)) => {}
            other => panic!("expected a network error, got {other:?}"),
        }
    }
}
