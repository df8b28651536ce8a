//! Modal event handling: alert/help dismissal, toggle confirmation and the
//! edit session's draft workflow.

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::state::{AppState, Modal};
use crate::sync::Mutation;

/// What: Handle a keypress while a modal is open.
///
/// Inputs:
/// - `ke`: The key event.
/// - `app`: Application state (modal matched in place).
/// - `mutate_tx`: Channel into the mutation worker.
pub(crate) fn handle_modal_key(
    ke: KeyEvent,
    app: &mut AppState,
    mutate_tx: &mpsc::UnboundedSender<Mutation>,
) {
    match &mut app.modal {
        Modal::None => {}
        Modal::Alert { .. } | Modal::Help => {
            if matches!(ke.code, KeyCode::Enter | KeyCode::Esc) {
                app.modal = Modal::None;
            }
        }
        Modal::ConfirmToggle { id, to } => match ke.code {
            KeyCode::Esc => {
                app.modal = Modal::None;
            }
            KeyCode::Enter => {
                let mutation = Mutation::ToggleStatus { id: *id, to: *to };
                app.modal = Modal::None;
                let _ = mutate_tx.send(mutation);
            }
            _ => {}
        },
        Modal::EditNews { draft } => {
            if draft.saving {
                // A commit is in flight; the reply decides what happens next.
                return;
            }
            match ke.code {
                KeyCode::Esc => {
                    // Cancel discards the draft unconditionally; no network
                    // call, no collection change.
                    app.modal = Modal::None;
                }
                KeyCode::Tab | KeyCode::BackTab => draft.toggle_field(),
                KeyCode::Enter => {
                    draft.saving = true;
                    draft.error = None;
                    let _ = mutate_tx.send(Mutation::EditContent {
                        id: draft.id,
                        title: draft.title.clone(),
                        description: draft.description.clone(),
                    });
                }
                KeyCode::Backspace => {
                    draft.active_field_mut().pop();
                }
                KeyCode::Char(c) => {
                    draft.active_field_mut().push(c);
                }
                _ => {}
            }
        }
    }
}
