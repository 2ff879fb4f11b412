pub mod base_view;
pub mod cart_widget;
pub mod container;
pub mod input;
pub mod product_list_view;
pub mod product_view;
pub mod summary_view;
pub mod templates;

use std::time::Duration;
use thiserror::Error;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::warn;

pub use base_view::{BaseView, Visibility, DEFAULT_FADE};
pub use cart_widget::{CartWidget, DEFAULT_PULSE_STEP};
pub use container::{Container, RenderedView};
pub use input::{parse_quantity, UpdateForm, ENTER_KEY};
pub use product_list_view::ProductListView;
pub use product_view::ProductView;
pub use summary_view::SummaryView;
pub use templates::{Template, TemplateContext, TemplateRegistry};

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Template {template} cannot render this context")]
    ContextMismatch { template: &'static str },

    #[error("Quantity must be a whole number of zero or more, got '{0}'")]
    InvalidQuantity(String),
}

/// A screen view living in the shared container.
pub trait View {
    fn base(&self) -> &BaseView;

    /// Re-renders the view's content from its model.
    fn render(&self) -> Result<(), ViewError>;
}

/// Animation timings applied to every view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub fade: Duration,
    pub pulse_step: Duration,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            fade: DEFAULT_FADE,
            pulse_step: DEFAULT_PULSE_STEP,
        }
    }
}

impl ViewOptions {
    /// No animation delays at all.
    pub fn instant() -> Self {
        Self {
            fade: Duration::ZERO,
            pulse_step: Duration::ZERO,
        }
    }
}

/// Takes every event queued on `events` without waiting.
///
/// A lagged receiver yields `None` in place of the dropped events so the
/// caller can fall back to a full re-render.
pub(crate) fn drain<T: Clone>(events: &mut broadcast::Receiver<T>) -> Vec<Option<T>> {
    let mut pending = Vec::new();
    loop {
        match events.try_recv() {
            Ok(event) => pending.push(Some(event)),
            Err(TryRecvError::Lagged(skipped)) => {
                warn!("View lagged behind by {} events", skipped);
                pending.push(None);
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
    pending
}
