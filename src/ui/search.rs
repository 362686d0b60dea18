use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use super::chrome::draw_status_line;
use super::layout::split_search_layout;
use super::view::{MenuChipView, SearchView};

pub fn draw_search(frame: &mut Frame<'_>, area: Rect, view: &SearchView) {
    if area.width == 0 || area.height < 6 {
        return;
    }
    let layout = split_search_layout(area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            view.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ))),
        layout.title,
    );

    let input_line = build_input_line(
        &view.input,
        view.cursor,
        view.caret_visible,
        layout.input.width as usize,
    );
    frame.render_widget(Paragraph::new(input_line), layout.input);

    frame.render_widget(
        Paragraph::new("─".repeat(layout.separator.width as usize))
            .style(Style::default().fg(Color::DarkGray)),
        layout.separator,
    );

    frame.render_widget(Paragraph::new(build_menu_line(&view.chips)), layout.menu);

    let list_width = layout.list.width as usize;
    let max_rows = layout.list.height as usize;
    let mut lines = Vec::with_capacity(max_rows);
    if !view.rows.is_empty() && max_rows > 0 {
        let selected = view.selected.min(view.rows.len() - 1);
        let start = if view.rows.len() <= max_rows || selected < max_rows / 2 {
            0
        } else if selected >= view.rows.len() - max_rows / 2 {
            view.rows.len() - max_rows
        } else {
            selected - max_rows / 2
        };

        for (idx, row) in view.rows.iter().enumerate().skip(start).take(max_rows) {
            let is_selected = idx == selected;
            let mut spans = Vec::new();
            if is_selected {
                spans.push(Span::styled(" ┃ ", Style::default().fg(Color::White)));
            } else {
                spans.push(Span::raw("   "));
            }
            let mut used = 3 + row.headword.width();
            spans.push(Span::raw(row.headword.clone()));
            if let Some(detail) = &row.detail {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    detail.clone(),
                    Style::default().fg(Color::DarkGray),
                ));
                used += 2 + detail.width();
            }

            let line_style = if is_selected {
                // Pad so the highlight covers the whole row.
                spans.push(Span::raw(" ".repeat(list_width.saturating_sub(used))));
                Style::default().bg(Color::Rgb(45, 45, 50))
            } else {
                Style::default()
            };
            lines.push(Line::from(spans).style(line_style));
        }
    }
    frame.render_widget(Paragraph::new(lines), layout.list);

    draw_status_line(frame, layout.status, &view.status);
}

fn build_menu_line(chips: &[MenuChipView]) -> Line<'static> {
    let mut spans = Vec::new();
    for chip in chips {
        if !spans.is_empty() {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            chip.key.clone(),
            Style::default().fg(Color::DarkGray),
        ));
        match (&chip.code, chip.emphasized) {
            (Some(code), true) => {
                spans.push(Span::styled(
                    format!(" {code} "),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            _ => spans.push(Span::raw(format!(" {}", chip.label))),
        }
    }
    Line::from(spans)
}

pub(crate) fn build_input_line(
    input: &str,
    cursor: usize,
    caret_visible: bool,
    width: usize,
) -> Line<'static> {
    let prefix_width = 3;
    let max_text_width = width.saturating_sub(prefix_width);

    let chars: Vec<char> = input.chars().collect();
    let char_count = chars.len();
    let cursor = cursor.min(char_count);

    let start = if max_text_width == 0 {
        char_count
    } else if cursor >= max_text_width {
        (cursor + 1 - max_text_width).min(char_count)
    } else {
        0
    };

    let text_width = max_text_width.max(1);
    let end = (start + text_width).min(char_count);
    let mut visible: Vec<char> = chars[start..end].to_vec();
    if visible.len() < text_width {
        visible.extend(std::iter::repeat_n(' ', text_width - visible.len()));
    }
    // No room for text leaves `start` at the end, past the caret.
    let caret_idx = cursor.saturating_sub(start).min(text_width - 1);

    let mut spans = vec![
        Span::raw(" "),
        Span::styled("> ", Style::default().fg(Color::White)),
    ];
    for (idx, ch) in visible.into_iter().enumerate() {
        if caret_visible && idx == caret_idx {
            spans.push(Span::styled(ch.to_string(), Style::default().reversed()));
        } else {
            spans.push(Span::raw(ch.to_string()));
        }
    }
    Line::from(spans)
}
