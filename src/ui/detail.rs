//! Rendering for the news and article detail routes.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::detail::DetailContent;
use crate::richtext::render_description;
use crate::state::AppState;
use crate::theme::Theme;
use crate::util::display_date;

/// Render the current detail content into `area`.
pub fn render(f: &mut Frame, app: &mut AppState, th: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(th.overlay1))
        .style(Style::default().bg(th.base));

    match app.detail.content() {
        DetailContent::Loading => {
            let msg = Paragraph::new(Line::from(Span::styled(
                "Loading…",
                Style::default().fg(th.subtext0),
            )))
            .block(block.title(" Details "))
            .centered();
            f.render_widget(msg, area);
        }
        DetailContent::NotFound => {
            let lines = vec![
                Line::from(Span::styled(
                    "Not Found",
                    Style::default().fg(th.yellow).add_modifier(Modifier::BOLD),
                )),
                Line::default(),
                Line::from(Span::styled(
                    "We couldn't find the item you were looking for.",
                    Style::default().fg(th.text),
                )),
                Line::from(Span::styled(
                    "It may have been removed or never existed.",
                    Style::default().fg(th.text),
                )),
                Line::default(),
                Line::from(Span::styled(
                    "Press Esc to go back to the news list.",
                    Style::default().fg(th.subtext0),
                )),
            ];
            let msg = Paragraph::new(lines)
                .block(block.title(" Details "))
                .centered()
                .wrap(Wrap { trim: true });
            f.render_widget(msg, area);
        }
        DetailContent::News(item) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    item.title.clone(),
                    Style::default().fg(th.mauve).add_modifier(Modifier::BOLD),
                )),
                byline(th, &item.author, &item.published_at),
                Line::default(),
            ];
            let rendered = render_description(&item.description, th);
            lines.extend(rendered.lines);
            if !rendered.links.is_empty() {
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    "Press 1-9 to follow a [n] link.",
                    Style::default().fg(th.subtext0),
                )));
            }
            if !item.read_more_content.is_empty() && !item.url.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("Read more (o): {}", item.url),
                    Style::default().fg(th.sapphire),
                )));
            }
            let card = Paragraph::new(lines)
                .block(block.title(format!(" News #{} ", item.id)))
                .wrap(Wrap { trim: false });
            f.render_widget(card, area);
        }
        DetailContent::Article(article) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    article.title.clone(),
                    Style::default().fg(th.mauve).add_modifier(Modifier::BOLD),
                )),
                byline(th, "", &article.created_at),
                Line::default(),
            ];
            let rendered = render_description(&article.description, th);
            lines.extend(rendered.lines);
            if !article.image_url.is_empty() {
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    format!("Image: {}", article.image_url),
                    Style::default().fg(th.subtext0),
                )));
            }
            let card = Paragraph::new(lines)
                .block(block.title(format!(" Article #{} ", article.id)))
                .wrap(Wrap { trim: false });
            f.render_widget(card, area);
        }
    }
}

/// Secondary line under the headline: author and publication date.
fn byline(th: &Theme, author: &str, published: &str) -> Line<'static> {
    let mut parts: Vec<String> = Vec::new();
    if !author.is_empty() {
        parts.push(format!("by {author}"));
    }
    if !published.is_empty() {
        parts.push(format!("published {}", display_date(published)));
    }
    Line::from(Span::styled(
        parts.join(" · "),
        Style::default().fg(th.subtext0),
    ))
}
