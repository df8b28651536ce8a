//! Modal rendering: edit session, toggle confirmation, alert and help.

use ratatui::{
    Frame,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use super::helpers::centered_rect;
use crate::state::{AppState, EditDraft, EditField, Modal, NewsStatus};
use crate::theme::Theme;

/// Render the active modal over the current route, if any.
pub fn render(f: &mut Frame, app: &AppState, th: &Theme) {
    match &app.modal {
        Modal::None => {}
        Modal::Alert { message } => render_alert(f, th, message),
        Modal::Help => render_help(f, th),
        Modal::ConfirmToggle { id, to } => render_confirm_toggle(f, th, *id, *to),
        Modal::EditNews { draft } => render_edit(f, th, draft),
    }
}

fn modal_block(th: &Theme, title: &str) -> Block<'static> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(th.lavender))
        .style(Style::default().bg(th.mantle))
}

fn render_alert(f: &mut Frame, th: &Theme, message: &str) {
    let area = centered_rect(60, 30, f.area());
    f.render_widget(Clear, area);
    let lines = vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(th.red),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Press Enter or Esc to dismiss.",
            Style::default().fg(th.subtext0),
        )),
    ];
    let body = Paragraph::new(lines)
        .block(modal_block(th, "Something went wrong"))
        .wrap(Wrap { trim: true });
    f.render_widget(body, area);
}

fn render_help(f: &mut Frame, th: &Theme) {
    let area = centered_rect(60, 60, f.area());
    f.render_widget(Clear, area);
    let key = |k: &str, desc: &str| {
        Line::from(vec![
            Span::styled(
                format!("  {k:<10}"),
                Style::default().fg(th.sapphire).add_modifier(Modifier::BOLD),
            ),
            Span::styled(desc.to_string(), Style::default().fg(th.text)),
        ])
    };
    let lines = vec![
        key("↑/↓ j/k", "move selection"),
        key("f", "cycle language filter (all → en → hi)"),
        key("r", "refresh the list"),
        key("Enter", "open the selected news item"),
        key("e", "edit title/description"),
        key("d", "delete/restore (status toggle)"),
        key("o", "open the upstream link in a browser"),
        key("1-9", "follow a [n] link inside a description"),
        key("Esc", "back to the list / close dialog"),
        key("?", "this help"),
        key("q", "quit"),
    ];
    let body = Paragraph::new(lines).block(modal_block(th, "Help"));
    f.render_widget(body, area);
}

fn render_confirm_toggle(f: &mut Frame, th: &Theme, id: i64, to: NewsStatus) {
    let area = centered_rect(50, 25, f.area());
    f.render_widget(Clear, area);
    let (verb, color) = match to {
        NewsStatus::Inactive => ("Delete", th.red),
        NewsStatus::Active => ("Restore", th.green),
    };
    let lines = vec![
        Line::from(Span::styled(
            format!("{verb} news #{id}?"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "The item stays in the feed; only its status changes.",
            Style::default().fg(th.subtext0),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Enter confirm · Esc cancel",
            Style::default().fg(th.subtext0),
        )),
    ];
    let body = Paragraph::new(lines)
        .block(modal_block(th, "Confirm"))
        .wrap(Wrap { trim: true });
    f.render_widget(body, area);
}

fn render_edit(f: &mut Frame, th: &Theme, draft: &EditDraft) {
    let area = centered_rect(70, 60, f.area());
    f.render_widget(Clear, area);
    let field_style = |field: EditField| {
        if draft.field == field {
            Style::default().fg(th.text).bg(th.surface1)
        } else {
            Style::default().fg(th.subtext0)
        }
    };
    let label = |text: &str| {
        Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(th.sapphire).add_modifier(Modifier::BOLD),
        ))
    };
    let mut lines = vec![
        label("Title"),
        Line::from(Span::styled(
            format!("{}▏", draft.title),
            field_style(EditField::Title),
        )),
        Line::default(),
        label("Description (HTML)"),
        Line::from(Span::styled(
            format!("{}▏", draft.description),
            field_style(EditField::Description),
        )),
        Line::default(),
    ];
    if let Some(error) = &draft.error {
        lines.push(Line::from(Span::styled(
            format!("Save failed: {error}"),
            Style::default().fg(th.red),
        )));
        lines.push(Line::default());
    }
    let footer = if draft.saving {
        "Saving…"
    } else {
        "Enter save · Tab switch field · Esc cancel"
    };
    lines.push(Line::from(Span::styled(
        footer,
        Style::default().fg(th.subtext0),
    )));
    let body = Paragraph::new(lines)
        .block(modal_block(th, &format!("Edit News #{}", draft.id)))
        .wrap(Wrap { trim: false });
    f.render_widget(body, area);
}
