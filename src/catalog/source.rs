use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use url::Url;

use crate::catalog::repositories::{FileProductRepository, HttpProductRepository, ProductRepository};

/// Where the catalog lives, resolved from the configured data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Http(Url),
    File(PathBuf),
}

impl DataSource {
    /// `http(s)://` goes over the network, `file://` and bare paths are read
    /// from disk relative to the working directory.
    pub fn from_url(data_url: &str) -> Result<Self, anyhow::Error> {
        let data_url = data_url.trim();
        if data_url.is_empty() {
            return Err(anyhow::anyhow!("Data URL is empty"));
        }

        match Url::parse(data_url) {
            Ok(url) => match url.scheme() {
                "http" | "https" => Ok(DataSource::Http(url)),
                "file" => {
                    let path = url
                        .to_file_path()
                        .map_err(|_| anyhow::anyhow!("Invalid file URL: {}", data_url))?;
                    Ok(DataSource::File(path))
                }
                // Windows drive letters parse as a one-letter scheme
                scheme if scheme.len() == 1 => Ok(DataSource::File(PathBuf::from(data_url))),
                scheme => Err(anyhow::anyhow!("Unsupported data URL scheme '{}'", scheme)),
            },
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Ok(DataSource::File(PathBuf::from(data_url)))
            }
            Err(e) => Err(e).context(format!("Invalid data URL: {}", data_url)),
        }
    }

    pub fn into_repository(self) -> Arc<dyn ProductRepository> {
        match self {
            DataSource::Http(url) => {
                tracing::info!("Product data source: {}", url);
                Arc::new(HttpProductRepository::new(url))
            }
            DataSource::File(path) => {
                tracing::info!("Product data source: {}", path.display());
                Arc::new(FileProductRepository::new(path))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_is_file_source() {
        assert_eq!(
            DataSource::from_url("data/items.json").unwrap(),
            DataSource::File(PathBuf::from("data/items.json"))
        );
    }

    #[test]
    fn test_http_url_is_http_source() {
        let source = DataSource::from_url("https://shop.example.com/data/items.json").unwrap();
        assert!(matches!(source, DataSource::Http(url) if url.path() == "/data/items.json"));
    }

    #[test]
    fn test_unsupported_scheme_and_empty_url_rejected() {
        assert!(DataSource::from_url("ftp://example.com/items.json").is_err());
        assert!(DataSource::from_url("   ").is_err());
    }
}
