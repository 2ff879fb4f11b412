use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

use crate::{
    models::{Item, Product},
    services::{CartEvent, CartService},
    views::{
        base_view::BaseView,
        container::Container,
        drain,
        input::{self, UpdateForm, ENTER_KEY},
        templates::{Template, TemplateContext, TemplateRegistry, SUMMARY_ITEM_TEMPLATE},
        View, ViewError,
    },
};

/// Order summary for one product: its cart line and shipping address.
///
/// Unlike the detail view, this one follows the cart and re-renders whenever
/// the line for its product is added or changes quantity.
pub struct SummaryView {
    base: BaseView,
    template: Template,
    product: Arc<Product>,
    cart: Arc<CartService>,
    events: broadcast::Receiver<CartEvent>,
}

impl SummaryView {
    pub const CLASS_NAME: &'static str = "productitemview";

    pub fn new(
        container: &Container,
        templates: &TemplateRegistry,
        product: Arc<Product>,
        cart: Arc<CartService>,
        fade: Duration,
    ) -> Result<Self, ViewError> {
        let template = templates.get(SUMMARY_ITEM_TEMPLATE)?;
        let events = cart.subscribe();
        Ok(Self {
            base: BaseView::new(container, Self::CLASS_NAME, fade),
            template,
            product,
            cart,
            events,
        })
    }

    pub fn update(&self, form: &UpdateForm) -> Result<Item, ViewError> {
        input::submit(&self.cart, &self.product, form)
    }

    pub fn update_on_key(&self, key_code: u32, form: &UpdateForm) -> Result<Option<Item>, ViewError> {
        if key_code != ENTER_KEY {
            return Ok(None);
        }
        self.update(form).map(Some)
    }

    /// The back button.
    pub async fn back(&self) {
        self.base.hide().await;
    }

    /// Re-renders if any queued cart change concerns this product.
    pub fn sync(&mut self) -> Result<bool, ViewError> {
        let relevant = drain(&mut self.events).iter().any(|event| match event {
            Some(event) => event.item().product_id() == &self.product.id,
            None => true,
        });
        if relevant {
            self.render()?;
        }
        Ok(relevant)
    }
}

impl View for SummaryView {
    fn base(&self) -> &BaseView {
        &self.base
    }

    fn render(&self) -> Result<(), ViewError> {
        let item = self.cart.item_for(&self.product.id);
        let content = self.template.render(&TemplateContext::Summary {
            product: &self.product,
            item: item.as_ref(),
        })?;
        self.base.set_content(content);
        Ok(())
    }
}
