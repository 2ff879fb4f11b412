use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::models::product::{Product, ProductId};

/// A cart line: one product, how many of it, and where the order ships.
#[derive(Debug, Clone)]
pub struct Item {
    pub product: Arc<Product>,
    pub quantity: u32,
    pub address: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    pub fn new(product: Arc<Product>, quantity: u32, address: Option<String>) -> Self {
        Self {
            product,
            quantity,
            address,
            updated_at: Utc::now(),
        }
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    pub fn price(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }

    /// Sets the quantity, returning whether it actually changed.
    pub fn update(&mut self, amount: u32) -> bool {
        if self.quantity == amount {
            return false;
        }
        self.quantity = amount;
        self.updated_at = Utc::now();
        true
    }

    pub fn set_address(&mut self, address: Option<String>) {
        self.address = address;
    }
}
