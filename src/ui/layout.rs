use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLayout {
    pub title: Rect,
    pub input: Rect,
    pub separator: Rect,
    pub menu: Rect,
    pub list: Rect,
    pub status: Rect,
}

pub fn split_search_layout(area: Rect) -> SearchLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    SearchLayout {
        title: chunks[0],
        input: chunks[1],
        separator: chunks[2],
        menu: chunks[3],
        list: chunks[4],
        status: chunks[5],
    }
}

pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.max(1).min(area.width);
    let height = height.max(1).min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
