//! Survey form rendering

use super::field_renderer::draw_field;
use crate::app::App;
use crate::state::{FieldId, FocusTarget};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the survey form with its conditional group, dynamic question
/// inputs, inline errors, and the submit button.
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Survey Form ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let targets = app.state.focus_targets();
    let mut y = inner.y;

    for (index, target) in targets.iter().enumerate().skip(app.state.form_scroll) {
        let height = app.state.slot_height(*target);
        if y + height > inner.y + inner.height {
            break;
        }
        let slot_area = Rect {
            x: inner.x,
            y,
            width: inner.width,
            height,
        };
        let is_active = index == app.state.focus;
        match target {
            FocusTarget::Field(id) => draw_field_slot(frame, slot_area, app, *id, is_active),
            FocusTarget::SubmitButton => draw_submit_button(frame, slot_area, is_active),
        }
        y += height;
    }
}

/// Draw one field slot, labeling dynamic inputs with their question text
fn draw_field_slot(frame: &mut Frame, area: Rect, app: &App, id: FieldId, is_active: bool) {
    let label = match id {
        FieldId::AdditionalQuestion(index) => app
            .state
            .additional_questions
            .get(index)
            .map(String::as_str)
            .unwrap_or(id.label()),
        _ => id.label(),
    };

    draw_field(
        frame,
        area,
        label,
        app.state.form.value(id),
        id.placeholder(),
        id.kind(),
        is_active,
        app.state.error_for(id),
    );
}

/// Draw the submit button row
fn draw_submit_button(frame: &mut Frame, area: Rect, is_active: bool) {
    let (border_color, text_style) = if is_active {
        (
            Color::Green,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (Color::DarkGray, Style::default().fg(Color::DarkGray))
    };

    let button = Paragraph::new(Line::from(Span::styled("Submit", text_style)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        );
    frame.render_widget(button, area);
}
