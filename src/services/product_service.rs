use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, error, info};

use crate::{
    catalog::repositories::{ProductRepository, ProductRepositoryError},
    models::product::{Product, ProductError, ProductId},
    services::events::{CatalogEvent, EVENT_CHANNEL_CAPACITY},
};

#[derive(Error, Debug)]
pub enum ProductServiceError {
    #[error("Invalid product {id}: {source}")]
    InvalidProduct {
        id: ProductId,
        #[source]
        source: ProductError,
    },

    #[error("Duplicate product id: {0}")]
    DuplicateProduct(ProductId),

    #[error("Repository error: {0}")]
    RepositoryError(#[from] ProductRepositoryError),
}

/// The catalog: every product, sorted by title.
pub struct ProductCollection {
    repository: Arc<dyn ProductRepository>,
    products: RwLock<Vec<Arc<Product>>>,
    events: broadcast::Sender<CatalogEvent>,
}

impl ProductCollection {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            repository,
            products: RwLock::new(Vec::new()),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.events.subscribe()
    }

    /// Loads the catalog and replaces the member set wholesale.
    ///
    /// On any failure the current members are left as they were and no
    /// `Reset` is published.
    pub async fn fetch(&self) -> Result<usize, ProductServiceError> {
        info!("Fetching product catalog");

        let records = self.repository.fetch_all().await.map_err(|e| {
            error!("Failed to fetch products: {}", e);
            ProductServiceError::RepositoryError(e)
        })?;

        let mut seen = HashSet::with_capacity(records.len());
        let mut products = Vec::with_capacity(records.len());
        for record in records {
            let id = record.id.clone();
            let product = record
                .validated()
                .map_err(|source| ProductServiceError::InvalidProduct {
                    id: id.clone(),
                    source,
                })?;
            if !seen.insert(id.clone()) {
                return Err(ProductServiceError::DuplicateProduct(id));
            }
            products.push(Arc::new(product));
        }

        // stable: equal titles keep their data-file order
        products.sort_by(|a, b| a.title.cmp(&b.title));

        let count = products.len();
        *self.products.write() = products;

        // no receivers is fine
        let _ = self.events.send(CatalogEvent::Reset { count });

        info!("Loaded {} products", count);
        Ok(count)
    }

    pub fn products(&self) -> Vec<Arc<Product>> {
        self.products.read().clone()
    }

    pub fn find(&self, id: &ProductId) -> Option<Arc<Product>> {
        let found = self.products.read().iter().find(|p| &p.id == id).cloned();
        debug!("Lookup product {}: {}", id, if found.is_some() { "hit" } else { "miss" });
        found
    }

    pub fn len(&self) -> usize {
        self.products.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.read().is_empty()
    }
}
