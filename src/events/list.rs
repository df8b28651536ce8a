//! Key handling for the curation list route.

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::detail::{DetailKind, DetailTicket};
use crate::state::{AppState, EditDraft, Modal, Route};
use crate::sync::{FetchTicket, Mutation};

/// What: Handle one keypress on the list route.
///
/// Inputs:
/// - `ke`: The key event.
/// - `app`: Application state.
/// - `fetch_tx` / `mutate_tx` / `detail_tx`: Worker channels.
///
/// Output: `true` to exit the application.
pub(crate) fn handle_list_key(
    ke: KeyEvent,
    app: &mut AppState,
    fetch_tx: &mpsc::UnboundedSender<FetchTicket>,
    _mutate_tx: &mpsc::UnboundedSender<Mutation>,
    detail_tx: &mpsc::UnboundedSender<DetailTicket>,
) -> bool {
    match ke.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('?') => {
            app.modal = Modal::Help;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if app.selected > 0 {
                app.selected -= 1;
            }
            app.clamp_selection();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.selected = app.selected.saturating_add(1);
            app.clamp_selection();
        }
        KeyCode::Char('f') => {
            // Cycle the language filter; a changed filter re-fetches
            // immediately and any in-flight fetch becomes stale.
            let next = app.list.filter().cycled();
            if let Some(ticket) = app.list.set_filter(next) {
                let _ = fetch_tx.send(ticket);
                app.selected = 0;
                app.clamp_selection();
            }
        }
        KeyCode::Char('r') => {
            let ticket = app.list.begin_fetch();
            let _ = fetch_tx.send(ticket);
        }
        KeyCode::Char('e') => {
            if let Some(item) = app.selected_item() {
                // Opening a new draft silently replaces any previous one:
                // single-draft design.
                app.modal = Modal::EditNews {
                    draft: EditDraft::from_item(item),
                };
            }
        }
        KeyCode::Char('d') => {
            if let Some(item) = app.selected_item()
                && let Some(Mutation::ToggleStatus { id, to }) = app.list.toggle_target(item.id)
            {
                app.modal = Modal::ConfirmToggle { id, to };
            }
        }
        KeyCode::Enter => {
            if let Some(item) = app.selected_item() {
                let raw_id = item.id.to_string();
                app.route = Route::NewsDetail {
                    raw_id: raw_id.clone(),
                };
                if let Some(ticket) = app.detail.begin(DetailKind::News, &raw_id) {
                    let _ = detail_tx.send(ticket);
                }
            }
        }
        KeyCode::Char('o') => {
            if let Some(item) = app.selected_item()
                && !item.url.is_empty()
            {
                crate::util::open_url(&item.url);
            }
        }
        _ => {}
    }
    false
}
