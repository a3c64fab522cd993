use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;
use crate::error::LoadError;
use crate::source::models::{Sample, TemperatureFile};

/// Where the readings document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Url(String),
    File(PathBuf),
}

impl SourceLocation {
    /// `http://` and `https://` locations are fetched, anything else is a file path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(raw.to_string())
        } else {
            Self::File(PathBuf::from(raw))
        }
    }
}

pub struct TemperatureSource {
    http_client: Client,
    location: SourceLocation,
}

impl TemperatureSource {
    /// # Errors
    ///
    /// Returns `LoadError::Network` if the HTTP client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self, LoadError> {
        Self::with_location(
            SourceLocation::parse(&config.temperatures_source),
            Duration::from_secs(config.fetch_timeout_seconds),
        )
    }

    /// # Errors
    ///
    /// Returns `LoadError::Network` if the HTTP client cannot be constructed.
    pub fn with_location(location: SourceLocation, timeout: Duration) -> Result<Self, LoadError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LoadError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            location,
        })
    }

    #[must_use]
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// Fetch and parse the readings document.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Network` if the document cannot be retrieved and
    /// `LoadError::Parse` if it is not a valid `{ temperatures: [...] }` document.
    pub async fn fetch_samples(&self) -> Result<Vec<Sample>, LoadError> {
        let body = match &self.location {
            SourceLocation::Url(url) => self.fetch_url(url).await?,
            SourceLocation::File(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
                LoadError::Network(format!("Failed to read {}: {e}", path.display()))
            })?,
        };

        let document = parse_document(&body)?;
        tracing::debug!(
            samples = document.temperatures.len(),
            "Temperature document loaded"
        );
        Ok(document.temperatures)
    }

    async fn fetch_url(&self, url: &str) -> Result<String, LoadError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| LoadError::Network(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(LoadError::Network(format!("HTTP {}", response.status())));
        }

        response
            .text()
            .await
            .map_err(|e| LoadError::Network(format!("Failed to get response text: {e}")))
    }
}

/// Parse a readings document.
///
/// # Errors
///
/// Returns `LoadError::Parse` if the JSON is malformed or lacks required fields.
pub fn parse_document(body: &str) -> Result<TemperatureFile, LoadError> {
    serde_json::from_str(body).map_err(|e| {
        tracing::error!(
            error = %e,
            body_preview = %body.chars().take(500).collect::<String>(),
            "Failed to parse temperature document"
        );
        LoadError::Parse(e.to_string())
    })
}
