//! Central application state shared by the event, networking and UI layers.

use std::time::{Duration, Instant};

use ratatui::widgets::ListState;

use crate::detail::DetailResolver;
use crate::state::modal::Modal;
use crate::state::types::{LanguageFilter, NewsItem, Route};
use crate::sync::ListSync;

/// How long success toasts stay on screen.
const TOAST_TTL: Duration = Duration::from_secs(5);

/// Global application state mutated by the event loop.
///
/// The news collection itself is owned by [`ListSync`]; everything else here
/// is navigation, selection and presentation state.
#[derive(Debug)]
pub struct AppState {
    /// Current navigation context.
    pub route: Route,
    /// The list synchronizer (collection owner).
    pub list: ListSync,
    /// The detail resolver for the two single-item routes.
    pub detail: DetailResolver,
    /// Active modal dialog, if any.
    pub modal: Modal,
    /// Index into the collection that is currently highlighted.
    pub selected: usize,
    /// List selection state for the news table.
    pub list_state: ListState,
    /// Transient success acknowledgment shown in the footer.
    pub toast_message: Option<String>,
    /// Deadline after which the toast clears.
    pub toast_expires_at: Option<Instant>,
}

impl AppState {
    /// Fresh state on the list route with the given startup filter.
    pub fn new(filter: LanguageFilter) -> Self {
        Self {
            route: Route::List,
            list: ListSync::new(filter),
            detail: DetailResolver::new(),
            modal: Modal::None,
            selected: 0,
            list_state: ListState::default(),
            toast_message: None,
            toast_expires_at: None,
        }
    }

    /// The currently highlighted row, if the collection has one.
    pub fn selected_item(&self) -> Option<&NewsItem> {
        self.list.items().get(self.selected)
    }

    /// What: Keep the highlight inside the collection bounds.
    ///
    /// Inputs: none.
    ///
    /// Output: `selected` clamped after a collection replacement; the list
    /// widget's selection mirrors it (cleared when the collection is empty).
    pub fn clamp_selection(&mut self) {
        let len = self.list.items().len();
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    /// Show a transient success acknowledgment.
    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast_message = Some(message.into());
        self.toast_expires_at = Some(Instant::now() + TOAST_TTL);
    }

    /// Clear the toast once its deadline passes.
    pub fn expire_toast(&mut self) {
        if let Some(deadline) = self.toast_expires_at
            && Instant::now() >= deadline
        {
            self.toast_message = None;
            self.toast_expires_at = None;
        }
    }
}
