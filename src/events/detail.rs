//! Key handling for the news and article detail routes.

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::detail::{DetailContent, DetailKind, DetailTicket};
use crate::richtext::{LinkAction, classify_link, description_links};
use crate::state::{AppState, Route};

/// What: Handle one keypress on a detail route.
///
/// Inputs:
/// - `ke`: The key event.
/// - `app`: Application state.
/// - `detail_tx`: Channel into the detail worker.
///
/// Output: `true` to exit the application.
pub(crate) fn handle_detail_key(
    ke: KeyEvent,
    app: &mut AppState,
    detail_tx: &mpsc::UnboundedSender<DetailTicket>,
) -> bool {
    match ke.code {
        KeyCode::Char('q') => return true,
        KeyCode::Esc | KeyCode::Backspace => {
            // Back to the list; any in-flight reply for this visit is
            // cancelled rather than applied to a torn-down view.
            app.detail.leave();
            app.route = Route::List;
        }
        KeyCode::Char('o') => {
            if let DetailContent::News(item) = app.detail.content()
                && !item.url.is_empty()
            {
                crate::util::open_url(&item.url);
            }
        }
        KeyCode::Char(c @ '1'..='9') => {
            follow_link(app, detail_tx, c as usize - '1' as usize);
        }
        _ => {}
    }
    false
}

/// What: Follow the nth collected description link.
///
/// Inputs:
/// - `app`: Application state.
/// - `detail_tx`: Channel into the detail worker.
/// - `index`: Zero-based link index (from the rendered `[n]` tags).
///
/// Output: Internal `"article <id>"` links navigate to the article route;
/// everything else opens externally. Out-of-range indexes do nothing.
fn follow_link(
    app: &mut AppState,
    detail_tx: &mpsc::UnboundedSender<DetailTicket>,
    index: usize,
) {
    let description = match app.detail.content() {
        DetailContent::News(item) => item.description.clone(),
        DetailContent::Article(article) => article.description.clone(),
        DetailContent::Loading | DetailContent::NotFound => return,
    };
    let links = description_links(&description);
    let Some(link) = links.get(index) else {
        return;
    };
    match classify_link(&link.href) {
        LinkAction::OpenArticle(id) => {
            let raw_id = id.to_string();
            app.route = Route::ArticleDetail {
                raw_id: raw_id.clone(),
            };
            if let Some(ticket) = app.detail.begin(DetailKind::Article, &raw_id) {
                let _ = detail_tx.send(ticket);
            }
        }
        LinkAction::OpenExternal(url) => {
            crate::util::open_url(&url);
        }
    }
}
