//! Shared rendering helpers.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// What: Compute a centered rectangle covering a percentage of the area.
///
/// Inputs:
/// - `percent_x` / `percent_y`: Size of the popup relative to `r`.
/// - `r`: The enclosing area.
///
/// Output: The centered sub-rectangle, used by every modal.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
