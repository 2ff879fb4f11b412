use crate::models::Item;

/// Capacity of each broadcast channel. Consumers drain after every
/// interaction, so this only bounds bursts between two drains.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Change notifications published by the product catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
    /// The full member set was replaced.
    Reset { count: usize },
}

/// Change notifications published by the cart.
#[derive(Debug, Clone)]
pub enum CartEvent {
    /// A new line was inserted.
    Added(Item),
    /// An existing line changed quantity.
    Updated(Item),
}

impl CartEvent {
    pub fn item(&self) -> &Item {
        match self {
            CartEvent::Added(item) | CartEvent::Updated(item) => item,
        }
    }
}
