use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::{
    models::{Item, Product, ProductId},
    services::events::{CartEvent, EVENT_CHANNEL_CAPACITY},
};

/// The session cart: at most one [`Item`] per product id, never persisted.
pub struct CartService {
    items: RwLock<Vec<Item>>,
    events: broadcast::Sender<CartEvent>,
}

impl Default for CartService {
    fn default() -> Self {
        Self::new()
    }
}

impl CartService {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            items: RwLock::new(Vec::new()),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }

    /// Sets the quantity (and shipping address) ordered for `product`.
    ///
    /// A missing amount counts as 0. The first call for a product inserts a
    /// line and publishes [`CartEvent::Added`]; later calls update the line in
    /// place and publish [`CartEvent::Updated`] only when the quantity
    /// changed. Lines are kept at quantity 0. The address is always
    /// overwritten and never publishes on its own.
    pub fn update_item_for_product(
        &self,
        product: &Arc<Product>,
        amount: Option<u32>,
        address: Option<String>,
    ) -> Item {
        let amount = amount.unwrap_or(0);

        let (item, event) = {
            let mut items = self.items.write();
            match items.iter_mut().find(|item| item.product_id() == &product.id) {
                Some(item) => {
                    item.set_address(address);
                    if item.update(amount) {
                        (item.clone(), Some(CartEvent::Updated(item.clone())))
                    } else {
                        debug!("Quantity for product {} unchanged at {}", product.id, amount);
                        (item.clone(), None)
                    }
                }
                None => {
                    let item = Item::new(Arc::clone(product), amount, address);
                    items.push(item.clone());
                    (item.clone(), Some(CartEvent::Added(item)))
                }
            }
        };

        if let Some(event) = event {
            info!(
                "Cart line for product {} set to quantity {}",
                product.id, item.quantity
            );
            let _ = self.events.send(event);
        }

        item
    }

    pub fn get_total_count(&self) -> u64 {
        self.items
            .read()
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum()
    }

    pub fn get_total_cost(&self) -> f64 {
        self.items.read().iter().map(Item::price).sum()
    }

    pub fn items(&self) -> Vec<Item> {
        self.items.read().clone()
    }

    pub fn item_for(&self, id: &ProductId) -> Option<Item> {
        self.items
            .read()
            .iter()
            .find(|item| item.product_id() == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}
