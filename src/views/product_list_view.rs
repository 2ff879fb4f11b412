use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::debug;

use crate::{
    services::{CatalogEvent, ProductCollection},
    views::{
        base_view::BaseView,
        container::Container,
        drain,
        templates::{Template, TemplateContext, TemplateRegistry, STORE_INDEX_TEMPLATE},
        View, ViewError,
    },
};

/// The index screen: the whole catalog as a table.
pub struct ProductListView {
    base: BaseView,
    template: Template,
    products: Arc<ProductCollection>,
    events: broadcast::Receiver<CatalogEvent>,
}

impl ProductListView {
    pub const CLASS_NAME: &'static str = "viewport";

    pub fn new(
        container: &Container,
        templates: &TemplateRegistry,
        products: Arc<ProductCollection>,
        fade: Duration,
    ) -> Result<Self, ViewError> {
        let template = templates.get(STORE_INDEX_TEMPLATE)?;
        let events = products.subscribe();
        Ok(Self {
            base: BaseView::new(container, Self::CLASS_NAME, fade),
            template,
            products,
            events,
        })
    }

    /// Re-renders once for every catalog reset seen since the last sync.
    pub fn sync(&mut self) -> Result<usize, ViewError> {
        let pending = drain(&mut self.events);
        for event in &pending {
            if let Some(CatalogEvent::Reset { count }) = event {
                debug!("Catalog reset with {} products, re-rendering list", count);
            }
            self.render()?;
        }
        Ok(pending.len())
    }
}

impl View for ProductListView {
    fn base(&self) -> &BaseView {
        &self.base
    }

    fn render(&self) -> Result<(), ViewError> {
        let products = self.products.products();
        let content = self.template.render(&TemplateContext::Index {
            products: &products,
        })?;
        self.base.set_content(content);
        Ok(())
    }
}
