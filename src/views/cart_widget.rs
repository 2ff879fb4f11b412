use std::sync::Arc;
use std::time::Duration;
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::{
    services::{CartEvent, CartService},
    views::{
        drain,
        templates::{Template, TemplateContext, TemplateRegistry, STORE_CART_TEMPLATE},
        ViewError,
    },
};

/// Default duration of each step of the padding pulse.
pub const DEFAULT_PULSE_STEP: Duration = Duration::from_millis(400);

const PADDING_REST: u16 = 10;
const PADDING_PULSE: u16 = 30;

#[derive(Debug)]
struct BadgeState {
    content: String,
    padding_top: u16,
    // bumped on every render; a pulse stops once it is no longer current
    generation: u64,
}

/// Running cart total badge, shown outside the main container.
///
/// Redrawn on every quantity change of an existing line. New lines alone do
/// not redraw it. The totals are painted at once; the padding pulse plays on
/// a background task.
pub struct CartWidget {
    template: Template,
    cart: Arc<CartService>,
    events: broadcast::Receiver<CartEvent>,
    badge: Arc<Mutex<BadgeState>>,
    renders: u64,
    pulse_step: Duration,
}

impl CartWidget {
    pub fn new(
        templates: &TemplateRegistry,
        cart: Arc<CartService>,
        pulse_step: Duration,
    ) -> Result<Self, ViewError> {
        let template = templates.get(STORE_CART_TEMPLATE)?;
        let events = cart.subscribe();
        Ok(Self {
            template,
            cart,
            events,
            badge: Arc::new(Mutex::new(BadgeState {
                content: String::new(),
                padding_top: PADDING_REST,
                generation: 0,
            })),
            renders: 0,
            pulse_step,
        })
    }

    pub fn content(&self) -> String {
        self.badge.lock().content.clone()
    }

    pub fn renders(&self) -> u64 {
        self.renders
    }

    pub fn padding_top(&self) -> u16 {
        self.badge.lock().padding_top
    }

    /// Renders once per queued `Updated` event.
    pub fn sync(&mut self) -> Result<usize, ViewError> {
        let updates = drain(&mut self.events)
            .into_iter()
            .filter(|event| !matches!(event, Some(CartEvent::Added(_))))
            .count();
        for _ in 0..updates {
            self.render()?;
        }
        Ok(updates)
    }

    /// Redraws the totals, then starts the padding pulse out and back.
    pub fn render(&mut self) -> Result<(), ViewError> {
        self.renders += 1;
        debug!(
            "Cart widget render #{}: {} items, {:.2} total",
            self.renders,
            self.cart.get_total_count(),
            self.cart.get_total_cost()
        );

        let generation = {
            let mut badge = self.badge.lock();
            badge.padding_top = PADDING_REST;
            badge.content = paint(&self.template, &self.cart, PADDING_REST)?;
            badge.generation += 1;
            badge.generation
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(pulse(
                    self.template,
                    Arc::clone(&self.cart),
                    Arc::clone(&self.badge),
                    generation,
                    self.pulse_step,
                ));
            }
            Err(_) => debug!("No runtime, skipping cart pulse"),
        }
        Ok(())
    }
}

fn paint(template: &Template, cart: &CartService, padding_top: u16) -> Result<String, ViewError> {
    template.render(&TemplateContext::Cart {
        count: cart.get_total_count(),
        cost: cart.get_total_cost(),
        padding_top,
    })
}

async fn pulse(
    template: Template,
    cart: Arc<CartService>,
    badge: Arc<Mutex<BadgeState>>,
    generation: u64,
    step: Duration,
) {
    for (i, padding) in [PADDING_PULSE, PADDING_REST].into_iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(step).await;
        }
        let mut badge = badge.lock();
        if badge.generation != generation {
            return;
        }
        match paint(&template, &cart, padding) {
            Ok(content) => {
                badge.content = content;
                badge.padding_top = padding;
            }
            Err(e) => {
                warn!("Cart pulse stopped: {}", e);
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Product;

    #[tokio::test]
    async fn test_renders_on_updates_not_inserts() {
        let cart = Arc::new(CartService::new());
        let mut widget =
            CartWidget::new(&TemplateRegistry::default(), Arc::clone(&cart), Duration::ZERO).unwrap();
        let product = Arc::new(Product::new("1", "Mug", 10.0));

        cart.update_item_for_product(&product, Some(2), None);
        assert_eq!(widget.sync().unwrap(), 0);
        assert_eq!(widget.renders(), 0);

        cart.update_item_for_product(&product, Some(3), None);
        cart.update_item_for_product(&product, Some(3), None);
        assert_eq!(widget.sync().unwrap(), 1);
        assert_eq!(widget.renders(), 1);
        assert!(widget.content().contains("3 item(s)"));
        assert!(widget.content().contains("$30.00"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pulse_plays_in_background() {
        let step = Duration::from_millis(400);
        let cart = Arc::new(CartService::new());
        let mut widget = CartWidget::new(&TemplateRegistry::default(), Arc::clone(&cart), step).unwrap();
        let product = Arc::new(Product::new("1", "Mug", 10.0));
        cart.update_item_for_product(&product, Some(1), None);
        cart.update_item_for_product(&product, Some(4), None);

        let started = tokio::time::Instant::now();
        widget.sync().unwrap();

        // totals are final before any time passes
        assert_eq!(started.elapsed(), Duration::ZERO);
        assert!(widget.content().contains("$40.00"));

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(widget.padding_top(), PADDING_PULSE);

        tokio::time::sleep(step).await;
        assert_eq!(widget.padding_top(), PADDING_REST);
        assert!(widget.content().contains("$40.00"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_render_takes_over_pulse() {
        let step = Duration::from_millis(400);
        let cart = Arc::new(CartService::new());
        let mut widget = CartWidget::new(&TemplateRegistry::default(), Arc::clone(&cart), step).unwrap();
        let product = Arc::new(Product::new("1", "Mug", 10.0));
        cart.update_item_for_product(&product, Some(1), None);

        cart.update_item_for_product(&product, Some(2), None);
        widget.sync().unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;

        cart.update_item_for_product(&product, Some(5), None);
        widget.sync().unwrap();
        assert!(widget.content().contains("$50.00"));

        // the first pulse would have ended here; the second is still out
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(widget.padding_top(), PADDING_PULSE);

        tokio::time::sleep(step).await;
        assert_eq!(widget.padding_top(), PADDING_REST);
        assert!(widget.content().contains("$50.00"));
    }
}
