//! Client for the external movies/theaters backend.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::config::CatalogConfig;
use crate::models::{Movie, Theater};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("catalog backend answered {status} for {url}")]
    Status { status: StatusCode, url: String },
}

#[derive(Clone)]
pub struct CatalogClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// `None` when no backend URL is configured.
    pub fn from_config(config: &CatalogConfig) -> Result<Option<Self>, CatalogError> {
        config
            .base_url
            .as_deref()
            .map(|url| Self::new(url, Duration::from_secs(config.timeout_seconds)))
            .transpose()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn movies(&self) -> Result<Vec<Movie>, CatalogError> {
        self.get_json("/movies").await?.ok_or_else(|| self.missing("/movies"))
    }

    pub async fn movie(&self, id: u64) -> Result<Option<Movie>, CatalogError> {
        self.get_json(&format!("/movies/{}", id)).await
    }

    pub async fn theaters(&self) -> Result<Vec<Theater>, CatalogError> {
        self.get_json("/theaters").await?.ok_or_else(|| self.missing("/theaters"))
    }

    pub async fn theater(&self, id: u64) -> Result<Option<Theater>, CatalogError> {
        self.get_json(&format!("/theaters/{}", id)).await
    }

    // 404 maps to Ok(None), any other non-2xx status is an error
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, CatalogError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self.http_client.get(&url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json::<T>().await?)),
            status => Err(CatalogError::Status { status, url }),
        }
    }

    fn missing(&self, path: &str) -> CatalogError {
        CatalogError::Status {
            status: StatusCode::NOT_FOUND,
            url: format!("{}{}", self.base_url, path),
        }
    }
}
