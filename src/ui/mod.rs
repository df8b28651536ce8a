//! Frame rendering, dispatched per route with modals drawn on top.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::state::{AppState, Route};
use crate::theme::theme;

mod detail;
pub mod helpers;
mod list;
mod modals;

/// Render one frame of the dashboard.
pub fn ui(f: &mut Frame, app: &mut AppState) {
    let th = theme();
    let area = f.area();

    // Canvas background.
    let bg = Block::default().style(Style::default().bg(th.base));
    f.render_widget(bg, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    match app.route {
        Route::List => list::render(f, app, &th, chunks[0]),
        Route::NewsDetail { .. } | Route::ArticleDetail { .. } => {
            detail::render(f, app, &th, chunks[0]);
        }
    }

    // Footer: toast when present, key hints otherwise.
    let footer = if let Some(toast) = &app.toast_message {
        Line::from(Span::styled(
            format!(" {toast}"),
            Style::default().fg(th.green),
        ))
    } else {
        let hints = match app.route {
            Route::List => " ↑/↓ select · f filter · e edit · d delete/restore · Enter open · ? help · q quit",
            Route::NewsDetail { .. } | Route::ArticleDetail { .. } => {
                " Esc back · 1-9 follow link · o open in browser · q quit"
            }
        };
        Line::from(Span::styled(hints, Style::default().fg(th.subtext0)))
    };
    f.render_widget(Paragraph::new(footer), chunks[1]);

    modals::render(f, app, &th);
}
