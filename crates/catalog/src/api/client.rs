//! HTTP client for the two catalog documents.
//!
//! One load fetches the title list and the media-mix overrides
//! concurrently; a non-2xx response for either aborts the load before any
//! body is decoded. There are no retries — a failed fetch is terminal for
//! that load attempt and retry is left to the caller.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::models::{Manga, MediaMixMap};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Why a catalog load failed
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to fetch {resource}: {source}")]
    Request {
        resource: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Fetching {resource} returned status {status}")]
    Status {
        resource: &'static str,
        status: StatusCode,
    },

    #[error("Failed to decode {resource}: {source}")]
    Decode {
        resource: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

/// Where the catalog documents come from.
///
/// The store only needs the two fetch operations, so tests can substitute
/// an in-memory source.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the full title list
    async fn fetch_titles(&self) -> Result<Vec<Manga>, CatalogError>;

    /// Fetch the media-mix overrides, keyed by title id
    async fn fetch_media_mix(&self) -> Result<MediaMixMap, CatalogError>;
}

/// Catalog source fetching the documents over HTTP
pub struct HttpCatalogSource {
    client: Client,
    titles_url: String,
    media_mix_url: String,
}

impl HttpCatalogSource {
    /// Create a new HTTP catalog source
    pub fn new(
        titles_url: String,
        media_mix_url: String,
        timeout: Duration,
    ) -> shared::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("manga-catalog/0.1.0")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            titles_url,
            media_mix_url,
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        url: &str,
    ) -> Result<T, CatalogError> {
        debug!(resource = resource, url = url, "Fetching catalog document");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| CatalogError::Request { resource, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status { resource, status });
        }

        response
            .json()
            .await
            .map_err(|source| CatalogError::Decode { resource, source })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_titles(&self) -> Result<Vec<Manga>, CatalogError> {
        self.get("title list", &self.titles_url).await
    }

    async fn fetch_media_mix(&self) -> Result<MediaMixMap, CatalogError> {
        self.get("media-mix data", &self.media_mix_url).await
    }
}
