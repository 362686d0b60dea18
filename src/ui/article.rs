use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::chrome::draw_status_line;
use super::view::ArticleView;

const ARTICLE_HINT: &str = "Esc back | ↑/↓ scroll";

pub fn draw_article(frame: &mut Frame<'_>, area: Rect, view: &ArticleView) {
    if area.width == 0 || area.height < 3 {
        return;
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let block = Block::default()
        .title(format!(" {} ", view.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(chunks[0]);

    // Wrapped here rather than by the paragraph so the row of every sense is known.
    let mut lines = Vec::new();
    let mut first_row = 0usize;
    for (idx, sense) in view.senses.iter().enumerate() {
        if idx == view.first_sense {
            first_row = lines.len();
        }
        lines.extend(sense_lines(idx, sense, idx == view.mark, inner.width as usize));
    }

    let body = Paragraph::new(lines)
        .block(block)
        .scroll((u16::try_from(first_row).unwrap_or(u16::MAX), 0));
    frame.render_widget(body, chunks[0]);
    draw_status_line(frame, chunks[1], ARTICLE_HINT);
}

fn sense_lines(idx: usize, sense: &str, marked: bool, width: usize) -> Vec<Line<'static>> {
    let number = format!("{}. ", idx + 1);
    let indent = number.width();
    let text_style = if marked {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    wrap_columns(sense, width.saturating_sub(indent))
        .into_iter()
        .enumerate()
        .map(|(row, text)| {
            let lead = if row == 0 {
                Span::styled(number.clone(), Style::default().fg(Color::DarkGray))
            } else {
                Span::raw(" ".repeat(indent))
            };
            Line::from(vec![lead, Span::styled(text, text_style)])
        })
        .collect()
}

/// Splits `text` into rows at most `width` columns wide. Never returns zero rows.
fn wrap_columns(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = vec![String::new()];
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used > 0 && used + ch_width > width {
            rows.push(String::new());
            used = 0;
        }
        if let Some(row) = rows.last_mut() {
            row.push(ch);
        }
        used += ch_width;
    }
    rows
}
