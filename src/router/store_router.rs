use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    catalog::repositories::ProductRepository,
    models::{Item, Product, ProductId},
    router::route::{Route, RouteError},
    services::{CartService, ProductCollection, ProductServiceError},
    views::{
        BaseView, CartWidget, Container, ProductListView, ProductView, SummaryView, TemplateRegistry,
        UpdateForm, View, ViewError, ViewOptions,
    },
};

#[derive(Error, Debug)]
pub enum RouterError {
    #[error("Route error: {0}")]
    RouteError(#[from] RouteError),

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Catalog error: {0}")]
    CatalogError(#[from] ProductServiceError),

    #[error("View error: {0}")]
    ViewError(#[from] ViewError),

    #[error("The current screen has no order form")]
    NoActiveForm,
}

/// Owns every collection and view of a session and moves between routes.
///
/// Detail and summary views are built the first time their route is entered
/// and cached by product id for the rest of the session.
pub struct StoreRouter {
    options: ViewOptions,
    templates: TemplateRegistry,
    container: Container,
    products: Arc<ProductCollection>,
    cart: Arc<CartService>,
    cart_widget: CartWidget,
    index_view: ProductListView,
    views: HashMap<ProductId, ProductView>,
    summary_views: HashMap<ProductId, SummaryView>,
    current: Option<Route>,
    views_built: usize,
    summaries_built: usize,
}

impl StoreRouter {
    pub fn new(
        repository: Arc<dyn ProductRepository>,
        templates: TemplateRegistry,
        options: ViewOptions,
    ) -> Result<Self, RouterError> {
        let container = Container::new();
        let cart = Arc::new(CartService::new());
        let cart_widget = CartWidget::new(&templates, Arc::clone(&cart), options.pulse_step)?;
        let products = Arc::new(ProductCollection::new(repository));
        let index_view =
            ProductListView::new(&container, &templates, Arc::clone(&products), options.fade)?;

        Ok(Self {
            options,
            templates,
            container,
            products,
            cart,
            cart_widget,
            index_view,
            views: HashMap::new(),
            summary_views: HashMap::new(),
            current: None,
            views_built: 0,
            summaries_built: 0,
        })
    }

    /// Loads the catalog, then lands on the index.
    ///
    /// When the fetch fails the session never leaves its initial state.
    pub async fn start(&mut self) -> Result<(), RouterError> {
        let count = self.products.fetch().await?;
        self.index_view.sync()?;
        info!("Store ready with {} products", count);
        self.navigate(Route::Index).await
    }

    pub async fn navigate_to(&mut self, fragment: &str) -> Result<(), RouterError> {
        let route = Route::parse(fragment)?;
        self.navigate(route).await
    }

    /// Hides every other view (in parallel), then shows the target.
    ///
    /// An unknown product id fails before anything is built or hidden.
    pub async fn navigate(&mut self, route: Route) -> Result<(), RouterError> {
        debug!("Navigating to '{}'", route);

        match &route {
            Route::Index => {}
            Route::Item(id) => self.ensure_product_view(id)?,
            Route::Summary(id) => self.ensure_summary_view(id)?,
        }

        self.hide_all_except(&route).await;
        if let Some(view) = self.base_for(&route) {
            view.show().await;
        }

        self.current = Some(route);
        Ok(())
    }

    fn ensure_product_view(&mut self, id: &ProductId) -> Result<(), RouterError> {
        if self.views.contains_key(id) {
            return Ok(());
        }

        let product = self.find_product(id)?;
        let view = ProductView::new(
            &self.container,
            &self.templates,
            product,
            Arc::clone(&self.cart),
            self.options.fade,
        )?;
        view.render()?;

        self.views.insert(id.clone(), view);
        self.views_built += 1;
        info!("Built detail view for product {}", id);
        Ok(())
    }

    fn ensure_summary_view(&mut self, id: &ProductId) -> Result<(), RouterError> {
        if self.summary_views.contains_key(id) {
            return Ok(());
        }

        let product = self.find_product(id)?;
        let view = SummaryView::new(
            &self.container,
            &self.templates,
            product,
            Arc::clone(&self.cart),
            self.options.fade,
        )?;
        view.render()?;

        self.summary_views.insert(id.clone(), view);
        self.summaries_built += 1;
        info!("Built summary view for product {}", id);
        Ok(())
    }

    fn find_product(&self, id: &ProductId) -> Result<Arc<Product>, RouterError> {
        self.products.find(id).ok_or_else(|| {
            warn!("No product with id {}", id);
            RouterError::ProductNotFound(id.clone())
        })
    }

    fn base_for(&self, route: &Route) -> Option<&BaseView> {
        match route {
            Route::Index => Some(self.index_view.base()),
            Route::Item(id) => self.views.get(id).map(|view| view.base()),
            Route::Summary(id) => self.summary_views.get(id).map(|view| view.base()),
        }
    }

    async fn hide_all_except(&self, keep: &Route) {
        let mut hiding = Vec::new();
        if *keep != Route::Index {
            hiding.push(self.index_view.base().hide());
        }
        for (id, view) in &self.views {
            if !matches!(keep, Route::Item(kept) if kept == id) {
                hiding.push(view.base().hide());
            }
        }
        for (id, view) in &self.summary_views {
            if !matches!(keep, Route::Summary(kept) if kept == id) {
                hiding.push(view.base().hide());
            }
        }
        join_all(hiding).await;
    }

    /// Submits the order form of the screen currently showing.
    pub async fn update_current(&mut self, form: &UpdateForm) -> Result<Item, RouterError> {
        let item = match &self.current {
            Some(Route::Item(id)) => self
                .views
                .get(id)
                .ok_or(RouterError::NoActiveForm)?
                .update(form)?,
            Some(Route::Summary(id)) => self
                .summary_views
                .get(id)
                .ok_or(RouterError::NoActiveForm)?
                .update(form)?,
            _ => return Err(RouterError::NoActiveForm),
        };

        self.sync_views()?;
        Ok(item)
    }

    /// Same as [`Self::update_current`], but driven by a keypress in the
    /// quantity field.
    pub async fn key_press(&mut self, key_code: u32, form: &UpdateForm) -> Result<Option<Item>, RouterError> {
        let item = match &self.current {
            Some(Route::Item(id)) => self
                .views
                .get(id)
                .ok_or(RouterError::NoActiveForm)?
                .update_on_key(key_code, form)?,
            Some(Route::Summary(id)) => self
                .summary_views
                .get(id)
                .ok_or(RouterError::NoActiveForm)?
                .update_on_key(key_code, form)?,
            _ => return Err(RouterError::NoActiveForm),
        };

        if item.is_some() {
            self.sync_views()?;
        }
        Ok(item)
    }

    /// The summary screen's back button: hides it, leaving the route as is.
    pub async fn back(&mut self) {
        if let Some(Route::Summary(id)) = &self.current {
            if let Some(view) = self.summary_views.get(id) {
                view.back().await;
            }
        }
    }

    /// Delivers queued catalog and cart events to the views listening for them.
    pub fn sync_views(&mut self) -> Result<(), RouterError> {
        self.index_view.sync()?;
        for view in self.summary_views.values_mut() {
            view.sync()?;
        }
        self.cart_widget.sync()?;
        Ok(())
    }

    pub fn current_route(&self) -> Option<&Route> {
        self.current.as_ref()
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn products(&self) -> &Arc<ProductCollection> {
        &self.products
    }

    pub fn cart(&self) -> &Arc<CartService> {
        &self.cart
    }

    pub fn cart_widget(&self) -> &CartWidget {
        &self.cart_widget
    }

    pub fn index_view(&self) -> &ProductListView {
        &self.index_view
    }

    pub fn product_view(&self, id: &ProductId) -> Option<&ProductView> {
        self.views.get(id)
    }

    pub fn summary_view(&self, id: &ProductId) -> Option<&SummaryView> {
        self.summary_views.get(id)
    }

    /// Detail views constructed this session.
    pub fn views_built(&self) -> usize {
        self.views_built
    }

    /// Summary views constructed this session.
    pub fn summaries_built(&self) -> usize {
        self.summaries_built
    }
}
