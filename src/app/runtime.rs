//! The application runtime: background workers and the main event loop.
//!
//! All remote calls run on spawned worker tasks fed by unbounded channels;
//! the event loop is the only place state is mutated. Replies carry the
//! generation ids their state machines issued, so stale results are dropped
//! at the apply sites, never merged.

use std::sync::Arc;

use crossterm::event::Event as CEvent;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::{
    select,
    sync::mpsc,
    time::{Duration, interval},
};

use super::terminal::{restore_terminal, setup_terminal};
use crate::config::Settings;
use crate::detail::{DetailKind, DetailPayload, DetailReply, DetailTicket};
use crate::gql::Gateway;
use crate::session::Session;
use crate::state::{AppState, LanguageFilter, Modal, NewsStatus};
use crate::sync::{FetchReply, FetchTicket, Mutation, MutationReply};
use crate::ui::ui;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Run the dashboard end-to-end: initialize the terminal and state,
/// spawn the fetch/mutation/detail workers, drive the event loop, and
/// restore the terminal on exit.
///
/// Inputs:
/// - `settings`: Resolved configuration (endpoint, startup filter).
/// - `session`: The authenticated operator session (precondition; the
///   gateway borrows its token).
///
/// Output: `Ok(())` when the UI exits cleanly; `Err` on unrecoverable
/// terminal errors. Remote failures never end the process — they surface as
/// alerts, stale-data retention or not-found cards.
pub async fn run(settings: Settings, session: Session) -> Result<()> {
    let headless = std::env::var("NEWSDECK_TEST_HEADLESS").ok().as_deref() == Some("1");
    if !headless {
        setup_terminal()?;
    }
    let mut terminal = if headless {
        None
    } else {
        Some(Terminal::new(CrosstermBackend::new(std::io::stdout()))?)
    };

    let mut app = AppState::new(LanguageFilter::from_code(&settings.startup_language));
    let gateway = Arc::new(Gateway::new(settings.endpoint.clone(), &session));
    tracing::info!(endpoint = %settings.endpoint, filter = app.list.filter().label(), "runtime starting");

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<CEvent>();
    let (fetch_req_tx, mut fetch_req_rx) = mpsc::unbounded_channel::<FetchTicket>();
    let (fetch_res_tx, mut fetch_res_rx) = mpsc::unbounded_channel::<FetchReply>();
    let (mutate_req_tx, mut mutate_req_rx) = mpsc::unbounded_channel::<Mutation>();
    let (mutate_res_tx, mut mutate_res_rx) = mpsc::unbounded_channel::<MutationReply>();
    let (detail_req_tx, mut detail_req_rx) = mpsc::unbounded_channel::<DetailTicket>();
    let (detail_res_tx, mut detail_res_rx) = mpsc::unbounded_channel::<DetailReply>();
    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel::<()>();

    // List fetch worker: one gateway call per ticket, reply echoes the
    // generation so the synchronizer can drop superseded results.
    let gw = Arc::clone(&gateway);
    tokio::spawn(async move {
        while let Some(ticket) = fetch_req_rx.recv().await {
            let result = match gw.send(&ticket.op).await {
                Ok(payload) => crate::gql::decode(payload),
                Err(e) => Err(e),
            };
            let _ = fetch_res_tx.send(FetchReply {
                id: ticket.id,
                result,
            });
        }
    });

    // Mutation worker: fire-and-forget relative to other mutations; each
    // reply carries its originating mutation for the in-place patch.
    let gw = Arc::clone(&gateway);
    tokio::spawn(async move {
        while let Some(mutation) = mutate_req_rx.recv().await {
            let result = gw.send(&mutation.operation()).await.map(|_| ());
            let _ = mutate_res_tx.send(MutationReply { mutation, result });
        }
    });

    // Detail worker: decodes per projection; null payloads become None.
    let gw = Arc::clone(&gateway);
    tokio::spawn(async move {
        while let Some(ticket) = detail_req_rx.recv().await {
            let result = match gw.send(&ticket.op).await {
                Ok(payload) => match ticket.kind {
                    DetailKind::News => {
                        crate::gql::decode_optional(payload).map(DetailPayload::News)
                    }
                    DetailKind::Article => {
                        crate::gql::decode_optional(payload).map(DetailPayload::Article)
                    }
                },
                Err(e) => Err(e),
            };
            let _ = detail_res_tx.send(DetailReply {
                id: ticket.id,
                result,
            });
        }
    });

    if !headless {
        std::thread::spawn(move || {
            loop {
                match crossterm::event::read() {
                    Ok(ev) => {
                        let _ = event_tx.send(ev);
                    }
                    Err(_) => {
                        // ignore transient read errors and continue
                    }
                }
            }
        });
    }

    tokio::spawn(async move {
        let mut interval = interval(Duration::from_millis(200));
        loop {
            interval.tick().await;
            if tick_tx.send(()).is_err() {
                break;
            }
        }
    });

    // Initial load for the startup filter.
    let ticket = app.list.begin_fetch();
    let _ = fetch_req_tx.send(ticket);

    loop {
        if let Some(t) = terminal.as_mut() {
            let _ = t.draw(|f| ui(f, &mut app));
        }

        select! {
            Some(ev) = event_rx.recv() => {
                if crate::events::handle_event(ev, &mut app, &fetch_req_tx, &mutate_req_tx, &detail_req_tx) {
                    break;
                }
            }
            Some(reply) = fetch_res_rx.recv() => {
                if app.list.apply_fetch(reply.id, reply.result) {
                    app.clamp_selection();
                }
            }
            Some(reply) = mutate_res_rx.recv() => {
                apply_mutation_reply(&mut app, reply);
            }
            Some(reply) = detail_res_rx.recv() => {
                app.detail.apply(reply);
            }
            Some(()) = tick_rx.recv() => {
                app.expire_toast();
            }
            else => {}
        }
    }

    tracing::info!("runtime exiting");
    if !headless {
        restore_terminal()?;
    }
    Ok(())
}

/// What: Fold a mutation reply into the application state.
///
/// Inputs:
/// - `app`: Application state.
/// - `reply`: The worker's acknowledgment or failure.
///
/// Output: On success the collection row is patched in place and a toast
/// acknowledges the action (closing the edit modal when the reply belongs
/// to its draft). On failure prior state stays intact: the edit modal keeps
/// its draft with the error shown inside; toggle failures raise an alert.
fn apply_mutation_reply(app: &mut AppState, reply: MutationReply) {
    match reply.result {
        Ok(()) => {
            app.list.apply_mutation(&reply.mutation);
            match &reply.mutation {
                Mutation::ToggleStatus { to, .. } => {
                    let verb = match to {
                        NewsStatus::Inactive => "deleted",
                        NewsStatus::Active => "restored",
                    };
                    app.show_toast(format!("News {verb} successfully!"));
                }
                Mutation::EditContent { id, .. } => {
                    if let Modal::EditNews { draft } = &app.modal
                        && draft.id == *id
                    {
                        app.modal = Modal::None;
                    }
                    app.show_toast("News updated successfully!");
                }
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, id = reply.mutation.target_id(), "mutation failed");
            match &reply.mutation {
                Mutation::EditContent { id, .. } => {
                    let mut kept_open = false;
                    if let Modal::EditNews { draft } = &mut app.modal
                        && draft.id == *id
                    {
                        // Draft stays intact; the operator can retry or
                        // cancel explicitly.
                        draft.saving = false;
                        draft.error = Some(e.to_string());
                        kept_open = true;
                    }
                    if !kept_open {
                        app.modal = Modal::Alert {
                            message: format!("Update failed: {e}"),
                        };
                    }
                }
                Mutation::ToggleStatus { .. } => {
                    app.modal = Modal::Alert {
                        message: format!("Status change failed: {e}"),
                    };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::apply_mutation_reply;
    use crate::gql::GatewayError;
    use crate::state::{
        AppState, EditDraft, LanguageFilter, Modal, NewsItem, NewsStatus,
    };
    use crate::sync::{Mutation, MutationReply};

    fn seed(app: &mut AppState, items: Vec<NewsItem>) {
        let t = app.list.begin_fetch();
        app.list.apply_fetch(t.id, Ok(items));
        app.clamp_selection();
    }

    fn item(id: i64, status: NewsStatus) -> NewsItem {
        NewsItem {
            id,
            title: format!("Item {id}"),
            description: "<p>Body</p>".to_string(),
            status,
            priority: 0,
            language: "en".to_string(),
            url: String::new(),
            source_url: String::new(),
            source_url_formate: String::new(),
            author: String::new(),
            published_at: String::new(),
            read_more_content: String::new(),
        }
    }

    /// What: A successful toggle reply patches the row and acknowledges.
    ///
    /// Inputs: Two active rows; an acknowledged toggle of row 1 to inactive.
    /// Output: Row 1 inactive, row 2 untouched, "deleted" toast shown.
    #[test]
    fn toggle_ack_patches_row_and_toasts() {
        let mut app = AppState::new(LanguageFilter::All);
        seed(
            &mut app,
            vec![item(1, NewsStatus::Active), item(2, NewsStatus::Active)],
        );
        apply_mutation_reply(
            &mut app,
            MutationReply {
                mutation: Mutation::ToggleStatus {
                    id: 1,
                    to: NewsStatus::Inactive,
                },
                result: Ok(()),
            },
        );
        assert_eq!(app.list.item(1).expect("row 1").status, NewsStatus::Inactive);
        assert_eq!(app.list.item(2).expect("row 2").status, NewsStatus::Active);
        assert_eq!(
            app.toast_message.as_deref(),
            Some("News deleted successfully!")
        );
    }

    /// What: A successful edit reply patches the row and closes its modal.
    ///
    /// Inputs: An open draft for row 7 and an acknowledged `EditContent`.
    /// Output: Row 7 carries the committed content; modal closed; "updated"
    /// toast shown.
    #[test]
    fn edit_ack_patches_row_and_closes_modal() {
        let mut app = AppState::new(LanguageFilter::All);
        seed(&mut app, vec![item(7, NewsStatus::Active)]);
        app.modal = Modal::EditNews {
            draft: EditDraft::from_item(app.list.item(7).expect("row 7")),
        };
        apply_mutation_reply(
            &mut app,
            MutationReply {
                mutation: Mutation::EditContent {
                    id: 7,
                    title: "X".to_string(),
                    description: "<p>Y</p>".to_string(),
                },
                result: Ok(()),
            },
        );
        let row = app.list.item(7).expect("row 7");
        assert_eq!(row.title, "X");
        assert_eq!(row.description, "<p>Y</p>");
        assert_eq!(app.modal, Modal::None);
        assert_eq!(
            app.toast_message.as_deref(),
            Some("News updated successfully!")
        );
    }

    /// What: A failed edit keeps the modal open with the draft intact.
    ///
    /// Inputs: An open, saving draft for row 7 and a rejected `EditContent`.
    /// Output: Row unchanged, modal still open, draft unlocked with the
    /// error recorded.
    #[test]
    fn edit_failure_keeps_draft_intact() {
        let mut app = AppState::new(LanguageFilter::All);
        seed(&mut app, vec![item(7, NewsStatus::Active)]);
        let mut draft = EditDraft::from_item(app.list.item(7).expect("row 7"));
        draft.title = "Edited".to_string();
        draft.saving = true;
        app.modal = Modal::EditNews { draft };
        apply_mutation_reply(
            &mut app,
            MutationReply {
                mutation: Mutation::EditContent {
                    id: 7,
                    title: "Edited".to_string(),
                    description: "<p>Body</p>".to_string(),
                },
                result: Err(GatewayError::Application(vec![
                    "title too long".to_string(),
                ])),
            },
        );
        assert_eq!(app.list.item(7).expect("row 7").title, "Item 7");
        match &app.modal {
            Modal::EditNews { draft } => {
                assert_eq!(draft.title, "Edited");
                assert!(!draft.saving);
                assert!(draft.error.as_deref().is_some_and(|e| e.contains("title too long")));
            }
            other => panic!("modal should stay open, got {other:?}"),
        }
    }

    /// What: A failed toggle leaves status untouched and raises an alert.
    ///
    /// Inputs: One active row and a transport-failed toggle.
    /// Output: Row still active; alert modal shown.
    #[test]
    fn toggle_failure_raises_alert() {
        let mut app = AppState::new(LanguageFilter::All);
        seed(&mut app, vec![item(1, NewsStatus::Active)]);
        apply_mutation_reply(
            &mut app,
            MutationReply {
                mutation: Mutation::ToggleStatus {
                    id: 1,
                    to: NewsStatus::Inactive,
                },
                result: Err(GatewayError::Transport("HTTP 503".to_string())),
            },
        );
        assert_eq!(app.list.item(1).expect("row 1").status, NewsStatus::Active);
        assert!(matches!(app.modal, Modal::Alert { .. }));
    }
}
