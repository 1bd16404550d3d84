//! Submission summary dialog

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the modal dialog shown after a successful submit, containing the
/// complete serialized form data.
pub fn draw(frame: &mut Frame, app: &App) {
    let Some(summary) = &app.state.summary else {
        return;
    };
    let area = frame.area();

    let body_lines: Vec<&str> = summary.lines().collect();
    let dialog_width = area.width.min(60);
    let dialog_height = (body_lines.len() as u16 + 4).min(area.height);

    // Center the dialog
    let dialog_area = Rect {
        x: area.x + (area.width.saturating_sub(dialog_width)) / 2,
        y: area.y + (area.height.saturating_sub(dialog_height)) / 2,
        width: dialog_width,
        height: dialog_height,
    };

    // Clear the area behind the dialog
    frame.render_widget(Clear, dialog_area);

    let mut content = vec![Line::from(Span::styled(
        "Survey Submitted",
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    ))];
    content.push(Line::from(""));
    content.extend(
        body_lines
            .iter()
            .map(|line| Line::from(Span::styled(line.to_string(), Style::default().fg(Color::White)))),
    );
    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::styled("/", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::styled(" close", Style::default().fg(Color::DarkGray)),
    ]));

    let dialog = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::new().bg(Color::Black).fg(Color::White));

    frame.render_widget(dialog, dialog_area);
}
