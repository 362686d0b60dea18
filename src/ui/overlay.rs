use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::layout::centered_rect;

pub fn draw_about_overlay(frame: &mut Frame<'_>, area: Rect, title: &str, language_count: usize) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let popup = centered_rect(area, area.width.min(44), area.height.min(7));
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" About ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let lines = vec![
        Line::from(format!("{title} {}", env!("CARGO_PKG_VERSION"))),
        Line::from(format!("{language_count} search languages")),
        Line::from(""),
        Line::from("any key to close"),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        inner,
    );
}
