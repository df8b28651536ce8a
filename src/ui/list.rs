//! Rendering for the curation list route.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use crate::richtext::description_preview;
use crate::state::{AppState, NewsStatus};
use crate::sync::ListLoad;
use crate::theme::Theme;
use crate::util::truncate_to_width;

/// Render the news table (or its loading/empty placeholder) into `area`.
pub fn render(f: &mut Frame, app: &mut AppState, th: &Theme, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            " News ",
            Style::default().fg(th.mauve).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("· Filter: {} ", app.list.filter().label()),
            Style::default().fg(th.sapphire),
        ),
    ]);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(th.overlay1))
        .style(Style::default().bg(th.base));

    match app.list.load() {
        ListLoad::Idle | ListLoad::Loading => {
            let msg = Paragraph::new(Line::from(Span::styled(
                "Loading news…",
                Style::default().fg(th.subtext0),
            )))
            .block(block)
            .centered();
            f.render_widget(msg, area);
        }
        ListLoad::Empty => {
            let msg = Paragraph::new(Line::from(Span::styled(
                "No news available.",
                Style::default().fg(th.yellow),
            )))
            .block(block)
            .centered();
            f.render_widget(msg, area);
        }
        ListLoad::Ready => {
            let inner_width = area.width.saturating_sub(2) as usize;
            let items: Vec<ListItem> = app
                .list
                .items()
                .iter()
                .map(|n| ListItem::new(row_line(n, th, inner_width)))
                .collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(
                    Style::default()
                        .bg(th.surface1)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("› ");
            f.render_stateful_widget(list, area, &mut app.list_state);
        }
    }
}

/// One table row: status marker, title, description preview, priority and
/// language columns packed into a single styled line.
fn row_line(n: &crate::state::NewsItem, th: &Theme, width: usize) -> Line<'static> {
    let (marker, marker_color) = match n.status {
        NewsStatus::Active => ("●", th.green),
        NewsStatus::Inactive => ("○", th.yellow),
    };
    let title_w = (width / 3).clamp(12, 48);
    let preview_w = width.saturating_sub(title_w + 18).max(8);
    let mut spans = vec![
        Span::styled(format!("{marker} "), Style::default().fg(marker_color)),
        Span::styled(
            format!("{:<title_w$} ", truncate_to_width(&n.title, title_w)),
            Style::default().fg(th.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "{:<preview_w$} ",
                truncate_to_width(&description_preview(&n.description), preview_w)
            ),
            Style::default().fg(th.subtext0),
        ),
        Span::styled(format!("p{:<3} ", n.priority), Style::default().fg(th.lavender)),
        Span::styled(format!("{:<3}", n.language), Style::default().fg(th.sapphire)),
    ];
    if n.status == NewsStatus::Inactive {
        spans.push(Span::styled(
            "  [deleted]",
            Style::default().fg(th.red),
        ));
    }
    Line::from(spans)
}
