#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use storefront_cli::catalog::repositories::{ProductRepository, ProductRepositoryError};
use storefront_cli::models::Product;
use storefront_cli::router::StoreRouter;
use storefront_cli::views::{TemplateRegistry, ViewOptions};

/// Serves a fixed product list and counts fetches.
pub struct MockProductRepository {
    records: Vec<Product>,
    fail: bool,
    pub fetches: AtomicUsize,
}

impl MockProductRepository {
    pub fn new(records: Vec<Product>) -> Self {
        Self {
            records,
            fail: false,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            records: Vec::new(),
            fail: true,
            fetches: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ProductRepository for MockProductRepository {
    async fn fetch_all(&self) -> Result<Vec<Product>, ProductRepositoryError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ProductRepositoryError::Decode(
                serde_json::from_str::<Vec<Product>>("not json").unwrap_err(),
            ));
        }
        Ok(self.records.clone())
    }
}

pub fn catalog() -> Vec<Product> {
    vec![
        Product::new("42", "Answer Blend", 42.0),
        Product::new("1", "Green Tea", 4.5),
        Product::new("2", "Espresso Beans", 12.0),
    ]
}

pub fn router_with(repository: MockProductRepository) -> StoreRouter {
    StoreRouter::new(
        Arc::new(repository),
        TemplateRegistry::default(),
        ViewOptions::instant(),
    )
    .unwrap()
}
