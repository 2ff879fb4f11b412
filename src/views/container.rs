use parking_lot::Mutex;
use std::sync::Arc;
use uuid::Uuid;

use crate::views::base_view::{ViewState, Visibility};

/// Snapshot of one attached view, as it would be painted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    pub id: Uuid,
    pub class_name: &'static str,
    pub content: String,
}

/// The single shared element every screen view is appended to.
///
/// Views are attached once, at construction, and never detached; what the
/// user sees is decided by each view's visibility.
#[derive(Debug, Clone, Default)]
pub struct Container {
    slots: Arc<Mutex<Vec<Arc<Mutex<ViewState>>>>>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn attach(&self, state: Arc<Mutex<ViewState>>) {
        self.slots.lock().push(state);
    }

    /// Number of attached views, visible or not.
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }

    /// Visible views in attachment order.
    pub fn visible(&self) -> Vec<RenderedView> {
        self.slots
            .lock()
            .iter()
            .filter_map(|slot| {
                let state = slot.lock();
                (state.visibility == Visibility::Visible).then(|| RenderedView {
                    id: state.id,
                    class_name: state.class_name,
                    content: state.content.clone(),
                })
            })
            .collect()
    }
}
