use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use crate::views::container::Container;

/// Duration of a fade in or out.
pub const DEFAULT_FADE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Visible,
}

#[derive(Debug)]
pub(crate) struct ViewState {
    pub(crate) id: Uuid,
    pub(crate) class_name: &'static str,
    pub(crate) visibility: Visibility,
    pub(crate) content: String,
    pub(crate) animations: u64,
}

/// Show/hide behaviour shared by every screen view.
///
/// A view's root is appended to the container when it is built and starts
/// hidden. `show` and `hide` fade over a fixed duration and resolve once the
/// fade is done; asking for the state a view is already in resolves at once
/// without animating.
#[derive(Debug)]
pub struct BaseView {
    state: Arc<Mutex<ViewState>>,
    fade: Duration,
}

impl BaseView {
    pub fn new(container: &Container, class_name: &'static str, fade: Duration) -> Self {
        let state = Arc::new(Mutex::new(ViewState {
            id: Uuid::new_v4(),
            class_name,
            visibility: Visibility::Hidden,
            content: String::new(),
            animations: 0,
        }));
        container.attach(Arc::clone(&state));
        Self { state, fade }
    }

    /// Instance id, stable for the lifetime of the view.
    pub fn id(&self) -> Uuid {
        self.state.lock().id
    }

    pub fn class_name(&self) -> &'static str {
        self.state.lock().class_name
    }

    pub fn visibility(&self) -> Visibility {
        self.state.lock().visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility() == Visibility::Visible
    }

    pub fn content(&self) -> String {
        self.state.lock().content.clone()
    }

    /// Replaces the view's inner content wholesale.
    pub fn set_content(&self, content: String) {
        self.state.lock().content = content;
    }

    /// Fades started so far, in either direction.
    pub fn animations_started(&self) -> u64 {
        self.state.lock().animations
    }

    pub async fn show(&self) {
        let id = {
            let mut state = self.state.lock();
            if state.visibility == Visibility::Visible {
                return;
            }
            // visible from the first frame of the fade in
            state.visibility = Visibility::Visible;
            state.animations += 1;
            state.id
        };

        debug!("Fading in view {}", id);
        tokio::time::sleep(self.fade).await;
    }

    pub async fn hide(&self) {
        let id = {
            let mut state = self.state.lock();
            if state.visibility == Visibility::Hidden {
                return;
            }
            state.animations += 1;
            state.id
        };

        debug!("Fading out view {}", id);
        tokio::time::sleep(self.fade).await;
        self.state.lock().visibility = Visibility::Hidden;
    }
}
