//! Sanitized rendering of server-supplied HTML descriptions, and the
//! embedded-link interception convention.
//!
//! Descriptions are externally authored. They are never injected as markup:
//! the fragment is parsed, `script`/`style`/`iframe` subtrees are dropped,
//! whitespace is collapsed, and the remainder is re-rendered as styled
//! terminal lines. Anchors are collected in document order so the event layer
//! can follow them; an anchor whose href matches the exact convention
//! `"article <id>"` is intercepted to the in-app article route instead of
//! the literal href.

use ego_tree::NodeRef;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use scraper::{Html, Node};

use crate::detail::parse_item_id;
use crate::theme::Theme;

/// Elements whose entire subtree is dropped during sanitization.
const DROPPED_ELEMENTS: [&str; 5] = ["script", "style", "iframe", "object", "embed"];

/// Where following a description link leads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkAction {
    /// The internal single-item route for this id.
    OpenArticle(i64),
    /// Default navigation: the literal href, opened externally.
    OpenExternal(String),
}

/// What: Classify a description anchor's href.
///
/// Inputs:
/// - `href`: The anchor's target attribute, verbatim.
///
/// Output: `OpenArticle(id)` when the href is exactly the prefix
/// `"article "` followed by a parseable positive integer; `OpenExternal`
/// otherwise.
///
/// Details: This is the one place external content can influence in-app
/// navigation, so the match is exact-prefix — leading whitespace, a
/// malformed suffix or trailing garbage all fall through to default link
/// behavior rather than crashing or misrouting.
pub fn classify_link(href: &str) -> LinkAction {
    if let Some(rest) = href.strip_prefix("article ")
        && let Some(id) = parse_item_id(rest)
    {
        return LinkAction::OpenArticle(id);
    }
    LinkAction::OpenExternal(href.to_string())
}

/// One anchor collected from a rendered description, in document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DescriptionLink {
    /// The anchor's visible text (whitespace-collapsed; href when empty).
    pub label: String,
    /// The anchor's raw target attribute.
    pub href: String,
}

/// A description rendered for the terminal.
#[derive(Debug, Default)]
pub struct RenderedDescription {
    /// Styled lines ready for a `Paragraph`.
    pub lines: Vec<Line<'static>>,
    /// Anchors in document order; the `[n]` tags in the lines index into
    /// this list one-based.
    pub links: Vec<DescriptionLink>,
}

/// Line-assembly state shared by the render walk.
struct RenderCtx<'t> {
    th: &'t Theme,
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    links: Vec<DescriptionLink>,
}

impl RenderCtx<'_> {
    /// Close the current line if it holds any content.
    fn flush_line(&mut self) {
        if !self.current.is_empty() {
            let spans = std::mem::take(&mut self.current);
            self.lines.push(Line::from(spans));
        }
    }

    /// Whether the current line already ends in whitespace (or is empty).
    fn at_space(&self) -> bool {
        match self.current.last() {
            None => true,
            Some(span) => span.content.ends_with(' '),
        }
    }

    /// Append text to the current line, collapsing whitespace runs.
    fn push_text(&mut self, text: &str, style: Style) {
        let mut out = String::new();
        let mut last_was_space = self.at_space();
        for ch in text.chars() {
            if ch.is_whitespace() {
                if !last_was_space {
                    out.push(' ');
                    last_was_space = true;
                }
            } else {
                out.push(ch);
                last_was_space = false;
            }
        }
        if !out.is_empty() {
            self.current.push(Span::styled(out, style));
        }
    }
}

/// What: Render a server-supplied HTML description fragment.
///
/// Inputs:
/// - `html`: The raw description markup.
/// - `th`: Theme for inline styling.
///
/// Output: Sanitized, styled lines plus the ordered anchor list.
///
/// Details: Never panics on malformed markup — the parser is error-tolerant
/// and unknown elements render as their text content.
pub fn render_description(html: &str, th: &Theme) -> RenderedDescription {
    let document = Html::parse_fragment(html);
    let mut ctx = RenderCtx {
        th,
        lines: Vec::new(),
        current: Vec::new(),
        links: Vec::new(),
    };
    let base = Style::default().fg(th.text);
    render_node(&mut ctx, document.tree.root(), base);
    ctx.flush_line();
    RenderedDescription {
        lines: ctx.lines,
        links: ctx.links,
    }
}

/// What: Collect a description's anchors in document order.
///
/// Inputs:
/// - `html`: The raw description markup.
///
/// Output: The same link list [`render_description`] produces, for callers
/// that only need to follow the `[n]` tags.
pub fn description_links(html: &str) -> Vec<DescriptionLink> {
    render_description(html, &crate::theme::theme()).links
}

/// What: Flatten a description to a single collapsed plain-text line for
/// table cells.
///
/// Inputs:
/// - `html`: The raw description markup.
///
/// Output: Sanitized text with all structure reduced to spaces.
pub fn description_preview(html: &str) -> String {
    let document = Html::parse_fragment(html);
    let mut buf = String::new();
    collect_text(document.tree.root(), &mut buf);
    buf.trim().to_string()
}

/// Render a node (and children) into styled lines.
fn render_node(ctx: &mut RenderCtx<'_>, node: NodeRef<'_, Node>, style: Style) {
    match node.value() {
        Node::Text(t) => ctx.push_text(t.as_ref(), style),
        Node::Element(el) => {
            let name = el.name();
            if DROPPED_ELEMENTS.contains(&name) {
                return;
            }
            if name == "br" {
                ctx.flush_line();
                return;
            }
            if name == "a" {
                render_anchor(ctx, node, style);
                return;
            }
            let is_block = matches!(
                name,
                "p" | "div"
                    | "section"
                    | "article"
                    | "header"
                    | "footer"
                    | "main"
                    | "blockquote"
                    | "h1"
                    | "h2"
                    | "h3"
                    | "h4"
                    | "h5"
                    | "h6"
            );
            let is_list = matches!(name, "ul" | "ol");
            let is_li = name == "li";
            if is_block || is_list || is_li {
                ctx.flush_line();
            }
            if is_li {
                ctx.current
                    .push(Span::styled("• ", Style::default().fg(ctx.th.subtext0)));
            }
            let child_style = match name {
                "b" | "strong" => style.add_modifier(Modifier::BOLD),
                "i" | "em" => style.add_modifier(Modifier::ITALIC),
                "u" => style.add_modifier(Modifier::UNDERLINED),
                "code" | "pre" => Style::default().fg(ctx.th.yellow),
                _ => style,
            };
            for child in node.children() {
                render_node(ctx, child, child_style);
            }
            if is_block || is_list || is_li {
                ctx.flush_line();
            }
        }
        _ => {
            // Fragment/document roots and comments: recurse into children,
            // render nothing themselves.
            for child in node.children() {
                render_node(ctx, child, style);
            }
        }
    }
}

/// Render an anchor as an underlined span with a one-based `[n]` tag and
/// register it in the link list.
fn render_anchor(ctx: &mut RenderCtx<'_>, node: NodeRef<'_, Node>, style: Style) {
    let href = match node.value() {
        Node::Element(el) => el.attr("href").unwrap_or("").to_string(),
        _ => String::new(),
    };
    let mut label = String::new();
    collect_text(node, &mut label);
    let label = label.trim().to_string();
    let shown = if label.is_empty() {
        href.clone()
    } else {
        label.clone()
    };
    let link_style = style
        .fg(ctx.th.sapphire)
        .add_modifier(Modifier::UNDERLINED);
    ctx.push_text(&shown, link_style);
    let tag = format!("[{}]", ctx.links.len() + 1);
    ctx.current
        .push(Span::styled(tag, Style::default().fg(ctx.th.subtext0)));
    ctx.links.push(DescriptionLink { label, href });
}

/// Collect a node's sanitized text content, collapsing whitespace runs.
fn collect_text(node: NodeRef<'_, Node>, buf: &mut String) {
    match node.value() {
        Node::Text(t) => {
            let mut last_was_space = buf.ends_with(' ') || buf.is_empty();
            for ch in t.chars() {
                if ch.is_whitespace() {
                    if !last_was_space {
                        buf.push(' ');
                        last_was_space = true;
                    }
                } else {
                    buf.push(ch);
                    last_was_space = false;
                }
            }
        }
        Node::Element(el) => {
            if DROPPED_ELEMENTS.contains(&el.name()) {
                return;
            }
            if !buf.is_empty() && !buf.ends_with(' ') {
                // Element boundaries separate words ("<p>a</p><p>b</p>").
                let is_inline = matches!(el.name(), "b" | "strong" | "i" | "em" | "u" | "code" | "span" | "a");
                if !is_inline {
                    buf.push(' ');
                }
            }
            for child in node.children() {
                collect_text(child, buf);
            }
        }
        _ => {
            for child in node.children() {
                collect_text(child, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LinkAction, classify_link, description_preview, render_description};
    use crate::theme::theme;

    /// What: The interception convention matches exactly and only the
    /// documented shape.
    ///
    /// Inputs: The canonical internal href, ordinary URLs, and the
    /// near-miss shapes external content could plausibly carry.
    /// Output: `OpenArticle(42)` for `"article 42"`; `OpenExternal` for the
    /// rest.
    #[test]
    fn classify_link_is_exact_prefix() {
        assert_eq!(classify_link("article 42"), LinkAction::OpenArticle(42));
        assert_eq!(classify_link("article  42"), LinkAction::OpenArticle(42));
        assert_eq!(
            classify_link("https://example.com"),
            LinkAction::OpenExternal("https://example.com".to_string())
        );
        // Malformed suffixes fall through to default navigation.
        assert_eq!(
            classify_link("article xyz"),
            LinkAction::OpenExternal("article xyz".to_string())
        );
        assert_eq!(
            classify_link("article "),
            LinkAction::OpenExternal("article ".to_string())
        );
        assert_eq!(
            classify_link("article -3"),
            LinkAction::OpenExternal("article -3".to_string())
        );
        // Not an exact prefix.
        assert_eq!(
            classify_link(" article 42"),
            LinkAction::OpenExternal(" article 42".to_string())
        );
        assert_eq!(
            classify_link("an article 42"),
            LinkAction::OpenExternal("an article 42".to_string())
        );
    }

    /// What: Anchors are collected in document order with their labels.
    ///
    /// Inputs: A fragment with an internal and an external anchor.
    /// Output: Two links, hrefs verbatim, labels collapsed.
    #[test]
    fn render_collects_links_in_order() {
        let th = theme();
        let rendered = render_description(
            r#"<p>See <a href="article 42">the follow-up</a> and <a href="https://example.com">the source</a>.</p>"#,
            &th,
        );
        assert_eq!(rendered.links.len(), 2);
        assert_eq!(rendered.links[0].href, "article 42");
        assert_eq!(rendered.links[0].label, "the follow-up");
        assert_eq!(rendered.links[1].href, "https://example.com");
        assert!(!rendered.lines.is_empty());
    }

    /// What: Script and style subtrees never reach the rendered output.
    ///
    /// Inputs: A description smuggling a script tag and inline styles.
    /// Output: Only the legitimate text survives, in preview and lines.
    #[test]
    fn sanitizer_drops_script_and_style_subtrees() {
        let html =
            r#"<p>Safe text</p><script>alert("nope")</script><style>p{color:red}</style>"#;
        let preview = description_preview(html);
        assert_eq!(preview, "Safe text");
        let th = theme();
        let rendered = render_description(html, &th);
        let flat: String = rendered
            .lines
            .iter()
            .flat_map(|l| l.spans.iter())
            .map(|s| s.content.as_ref())
            .collect();
        assert!(flat.contains("Safe text"));
        assert!(!flat.contains("alert"));
        assert!(!flat.contains("color:red"));
    }

    /// What: Structure maps to lines; inline whitespace collapses.
    ///
    /// Inputs: Two paragraphs and a list, with ragged whitespace.
    /// Output: One line per block/item, bullet-prefixed items, no whitespace
    /// runs.
    #[test]
    fn blocks_become_lines_and_whitespace_collapses() {
        let th = theme();
        let rendered = render_description(
            "<p>First   paragraph</p><p>Second</p><ul><li>one</li><li>two</li></ul>",
            &th,
        );
        let texts: Vec<String> = rendered
            .lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert_eq!(
            texts,
            vec![
                "First paragraph".to_string(),
                "Second".to_string(),
                "• one".to_string(),
                "• two".to_string(),
            ]
        );
    }

    /// What: Plain-text previews separate block boundaries with spaces.
    ///
    /// Inputs: Adjacent paragraphs with no whitespace between them.
    /// Output: A single space-joined line.
    #[test]
    fn preview_joins_blocks_with_spaces() {
        assert_eq!(description_preview("<p>a</p><p>b</p>"), "a b");
        assert_eq!(description_preview("plain text"), "plain text");
        assert_eq!(description_preview(""), "");
    }
}
