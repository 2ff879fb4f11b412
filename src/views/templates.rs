use console::style;
use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    models::{Item, Product},
    utils::formatting::{format_cart_badge, format_order_summary, format_product_detail, format_product_table},
    views::ViewError,
};

pub const STORE_INDEX_TEMPLATE: &str = "store_index_template";
pub const STORE_ITEM_TEMPLATE: &str = "store_item_template";
pub const SUMMARY_ITEM_TEMPLATE: &str = "summary_item_template";
pub const STORE_CART_TEMPLATE: &str = "store_cart_template";

/// Data a template is rendered against.
#[derive(Debug, Clone, Copy)]
pub enum TemplateContext<'a> {
    Index { products: &'a [Arc<Product>] },
    Item { product: &'a Product },
    Summary { product: &'a Product, item: Option<&'a Item> },
    Cart { count: u64, cost: f64, padding_top: u16 },
}

/// Returns `None` when handed a context it does not understand.
pub type RenderFn = fn(&TemplateContext<'_>) -> Option<String>;

/// A named, ready-to-use template. Views look theirs up once when built.
#[derive(Clone, Copy)]
pub struct Template {
    id: &'static str,
    render_fn: RenderFn,
}

impl std::fmt::Debug for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Template").field("id", &self.id).finish()
    }
}

impl Template {
    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn render(&self, context: &TemplateContext<'_>) -> Result<String, ViewError> {
        (self.render_fn)(context).ok_or(ViewError::ContextMismatch { template: self.id })
    }
}

#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: HashMap<&'static str, Template>,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        let mut registry = Self {
            templates: HashMap::new(),
        };
        registry.register(STORE_INDEX_TEMPLATE, render_index);
        registry.register(STORE_ITEM_TEMPLATE, render_item);
        registry.register(SUMMARY_ITEM_TEMPLATE, render_summary);
        registry.register(STORE_CART_TEMPLATE, render_cart);
        registry
    }
}

impl TemplateRegistry {
    /// A registry with no templates at all.
    pub fn empty() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Adds or replaces the template stored under `id`.
    pub fn register(&mut self, id: &'static str, render_fn: RenderFn) {
        self.templates.insert(id, Template { id, render_fn });
    }

    pub fn get(&self, id: &str) -> Result<Template, ViewError> {
        self.templates
            .get(id)
            .copied()
            .ok_or_else(|| ViewError::TemplateNotFound(id.to_string()))
    }
}

fn render_index(context: &TemplateContext<'_>) -> Option<String> {
    let TemplateContext::Index { products } = context else {
        return None;
    };

    let mut output = format!("{}\n", style("Products").bold().cyan());
    if products.is_empty() {
        output.push_str(&format!("{}\n", style("No products available").dim()));
    } else {
        output.push_str(&format_product_table(products));
        output.push('\n');
    }
    Some(output)
}

fn render_item(context: &TemplateContext<'_>) -> Option<String> {
    let TemplateContext::Item { product } = context else {
        return None;
    };

    let mut output = format_product_detail(product);
    output.push_str(&format!(
        "{}\n",
        style("Enter a quantity and shipping address, then press Enter or choose update").dim()
    ));
    Some(output)
}

fn render_summary(context: &TemplateContext<'_>) -> Option<String> {
    let TemplateContext::Summary { product, item } = context else {
        return None;
    };

    let mut output = format!("{}\n", style("Order Summary").bold().cyan());
    output.push_str(&format_order_summary(product, *item));
    Some(output)
}

fn render_cart(context: &TemplateContext<'_>) -> Option<String> {
    let TemplateContext::Cart {
        count,
        cost,
        padding_top,
    } = context
    else {
        return None;
    };

    Some(format_cart_badge(*count, *cost, *padding_top))
}
