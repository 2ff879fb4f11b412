use std::sync::Arc;
use std::time::Duration;

use crate::{
    models::{Item, Product},
    services::CartService,
    views::{
        base_view::BaseView,
        container::Container,
        input::{self, UpdateForm, ENTER_KEY},
        templates::{Template, TemplateContext, TemplateRegistry, STORE_ITEM_TEMPLATE},
        View, ViewError,
    },
};

/// Detail screen for one product, with the quantity/address form.
pub struct ProductView {
    base: BaseView,
    template: Template,
    product: Arc<Product>,
    cart: Arc<CartService>,
}

impl ProductView {
    pub const CLASS_NAME: &'static str = "productitemview";

    pub fn new(
        container: &Container,
        templates: &TemplateRegistry,
        product: Arc<Product>,
        cart: Arc<CartService>,
        fade: Duration,
    ) -> Result<Self, ViewError> {
        let template = templates.get(STORE_ITEM_TEMPLATE)?;
        Ok(Self {
            base: BaseView::new(container, Self::CLASS_NAME, fade),
            template,
            product,
            cart,
        })
    }

    /// The update button.
    pub fn update(&self, form: &UpdateForm) -> Result<Item, ViewError> {
        input::submit(&self.cart, &self.product, form)
    }

    /// Keypress in the quantity field; only Enter submits.
    pub fn update_on_key(&self, key_code: u32, form: &UpdateForm) -> Result<Option<Item>, ViewError> {
        if key_code != ENTER_KEY {
            return Ok(None);
        }
        self.update(form).map(Some)
    }
}

impl View for ProductView {
    fn base(&self) -> &BaseView {
        &self.base
    }

    fn render(&self) -> Result<(), ViewError> {
        let content = self.template.render(&TemplateContext::Item {
            product: &self.product,
        })?;
        self.base.set_content(content);
        Ok(())
    }
}
