//! Field rendering utilities for the survey form

use crate::state::FieldKind;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw a single form field with its label, value, and inline error.
///
/// The last row of `area` is reserved for the error line when one is
/// present; the bordered input box fills the rest.
#[allow(clippy::too_many_arguments)]
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    placeholder: &str,
    kind: FieldKind,
    is_active: bool,
    error: Option<&str>,
) {
    let (box_area, error_area) = if error.is_some() {
        let box_area = Rect {
            height: area.height.saturating_sub(1),
            ..area
        };
        let error_area = Rect {
            y: area.y + box_area.height,
            height: 1,
            ..area
        };
        (box_area, Some(error_area))
    } else {
        (area, None)
    };

    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let border_style = if error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        style
    };

    let is_select = matches!(kind, FieldKind::Select(_));
    let display_value = if value.is_empty() && (is_select || !is_active) {
        placeholder
    } else {
        value
    };
    let value_style = if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        style
    };

    // Selects get arrows instead of a text cursor
    let cursor = if is_active && !is_select { "▌" } else { "" };

    let content = if matches!(kind, FieldKind::Multiline) {
        let mut lines: Vec<Line> = display_value
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), value_style)))
            .collect();
        if is_active {
            if let Some(last) = lines.last_mut() {
                last.spans
                    .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
            } else {
                lines.push(Line::from(Span::styled(
                    cursor,
                    Style::default().fg(Color::Cyan),
                )));
            }
        }
        Paragraph::new(lines)
    } else {
        let mut spans = Vec::new();
        if is_select && is_active {
            spans.push(Span::styled("◂ ", Style::default().fg(Color::Cyan)));
        }
        spans.push(Span::styled(display_value, value_style));
        if is_select && is_active {
            spans.push(Span::styled(" ▸", Style::default().fg(Color::Cyan)));
        } else {
            spans.push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
        }
        Paragraph::new(Line::from(spans))
    };

    let block = Block::default()
        .title(format!(" {} ", label))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), box_area);

    if let (Some(error_area), Some(message)) = (error_area, error) {
        let error_line = Paragraph::new(Line::from(Span::styled(
            format!("  ✗ {}", message),
            Style::default().fg(Color::Red),
        )));
        frame.render_widget(error_line, error_area);
    }
}
