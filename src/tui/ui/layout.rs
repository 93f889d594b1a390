use ratatui::layout::Constraint;
use ratatui::prelude::{Direction, Layout, Rect};

/// Area inside a one-cell border.
pub(super) fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

pub(super) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    split_columns(popup_layout[1], [(100 - percent_x) / 2, percent_x, (100 - percent_x) / 2])[1]
}

/// Split `area` horizontally by percentages.
pub(super) fn split_columns<const N: usize>(area: Rect, percents: [u16; N]) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(percents.map(Constraint::Percentage))
        .split(area)
        .to_vec()
}
