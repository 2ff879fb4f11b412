use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

use crate::models::product::Product;

#[derive(Error, Debug)]
pub enum ProductRepositoryError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid product data: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of the catalog records. Fetched once per session.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Product>, ProductRepositoryError>;
}

/// Loads the product array with a single GET.
pub struct HttpProductRepository {
    client: reqwest::Client,
    url: Url,
}

impl HttpProductRepository {
    pub fn new(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl ProductRepository for HttpProductRepository {
    async fn fetch_all(&self) -> Result<Vec<Product>, ProductRepositoryError> {
        tracing::debug!("GET {}", self.url);
        let transport = |source| ProductRepositoryError::Transport {
            url: self.url.to_string(),
            source,
        };

        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProductRepositoryError::Status {
                url: self.url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Loads the product array from a JSON file on disk.
pub struct FileProductRepository {
    path: PathBuf,
}

impl FileProductRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ProductRepository for FileProductRepository {
    async fn fetch_all(&self) -> Result<Vec<Product>, ProductRepositoryError> {
        tracing::debug!("Reading products from {}", self.path.display());
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| ProductRepositoryError::Io {
                path: self.path.clone(),
                source,
            })?;

        Ok(serde_json::from_slice(&bytes)?)
    }
}
