use std::sync::Arc;

use crate::{
    models::{Item, Product},
    services::CartService,
    views::ViewError,
};

/// Key code that submits the quantity field.
pub const ENTER_KEY: u32 = 13;

/// Raw values of the quantity and address inputs on a detail or summary view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateForm {
    pub quantity: String,
    pub address: String,
}

impl UpdateForm {
    pub fn new(quantity: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            quantity: quantity.into(),
            address: address.into(),
        }
    }

    pub fn quantity(&self) -> Result<Option<u32>, ViewError> {
        parse_quantity(&self.quantity)
    }

    /// Blank addresses are stored as no address.
    pub fn address(&self) -> Option<String> {
        let address = self.address.trim();
        (!address.is_empty()).then(|| address.to_string())
    }
}

/// Reads the quantity field: blank is "no amount", otherwise it must be a
/// non-negative integer.
pub fn parse_quantity(raw: &str) -> Result<Option<u32>, ViewError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    raw.parse::<u32>()
        .map(Some)
        .map_err(|_| ViewError::InvalidQuantity(raw.to_string()))
}

/// Forwards a submitted form to the cart. An unreadable quantity leaves the
/// cart untouched.
pub(crate) fn submit(
    cart: &CartService,
    product: &Arc<Product>,
    form: &UpdateForm,
) -> Result<Item, ViewError> {
    let amount = form.quantity()?;
    Ok(cart.update_item_for_product(product, amount, form.address()))
}
