//! Keyboard event handling, dispatched modal-first and then per route.

use crossterm::event::{Event as CEvent, KeyCode, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use crate::detail::DetailTicket;
use crate::state::{AppState, Modal, Route};
use crate::sync::{FetchTicket, Mutation};

mod detail;
mod list;
mod modals;

/// What: Dispatch a single terminal event and mutate the [`AppState`].
///
/// Inputs:
/// - `ev`: The crossterm event.
/// - `app`: Application state.
/// - `fetch_tx` / `mutate_tx` / `detail_tx`: Channels into the background
///   workers.
///
/// Output: `true` to signal the application should exit; otherwise `false`.
pub fn handle_event(
    ev: CEvent,
    app: &mut AppState,
    fetch_tx: &mpsc::UnboundedSender<FetchTicket>,
    mutate_tx: &mpsc::UnboundedSender<Mutation>,
    detail_tx: &mpsc::UnboundedSender<DetailTicket>,
) -> bool {
    let CEvent::Key(ke) = ev else {
        return false;
    };
    if ke.kind != KeyEventKind::Press {
        return false;
    }

    // Ctrl+C exits from anywhere, modal or not.
    if ke.code == KeyCode::Char('c') && ke.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    // Modal handling takes precedence over route handling.
    if !matches!(app.modal, Modal::None) {
        modals::handle_modal_key(ke, app, mutate_tx);
        return false;
    }

    match app.route.clone() {
        Route::List => list::handle_list_key(ke, app, fetch_tx, mutate_tx, detail_tx),
        Route::NewsDetail { .. } | Route::ArticleDetail { .. } => {
            detail::handle_detail_key(ke, app, detail_tx)
        }
    }
}
