//! Application state definitions

use super::field::FieldId;
use super::form::FormData;
use super::validate::ValidationErrors;

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    /// The survey form itself
    #[default]
    Form,
    /// Modal summary of a successfully validated submission
    Summary,
}

/// A focusable slot in the form's traversal order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Field(FieldId),
    SubmitButton,
}

/// All mutable state owned by the application
///
/// The form values, the validation errors, and the fetched questions are
/// independent slots, each replaced as a whole when it changes.
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    /// Survey form values
    pub form: FormData,
    /// Errors from the most recent submit attempt; empty before the first
    pub errors: ValidationErrors,
    /// Follow-up questions fetched for the current topic
    pub additional_questions: Vec<String>,
    /// Index into [`AppState::focus_targets`]
    pub focus: usize,
    /// First focus slot rendered when the form does not fit the terminal
    pub form_scroll: usize,
    /// Serialized form data shown in the summary dialog
    pub summary: Option<String>,
}

impl AppState {
    /// Traversal order of the currently visible slots: the visible fields
    /// for the selected topic, then the dynamic inputs, then the submit
    /// button.
    pub fn focus_targets(&self) -> Vec<FocusTarget> {
        let mut targets: Vec<FocusTarget> = self
            .form
            .visible_fields(self.additional_questions.len())
            .into_iter()
            .map(FocusTarget::Field)
            .collect();
        targets.push(FocusTarget::SubmitButton);
        targets
    }

    /// The slot that currently has keyboard focus
    pub fn focused_target(&self) -> FocusTarget {
        self.focus_targets()
            .get(self.focus)
            .copied()
            .unwrap_or(FocusTarget::SubmitButton)
    }

    /// Rows a slot occupies on screen, including its inline error line
    pub fn slot_height(&self, target: FocusTarget) -> u16 {
        match target {
            FocusTarget::Field(id) => {
                let base = if matches!(id, FieldId::Feedback) { 4 } else { 3 };
                if self.errors.contains_key(&id) {
                    base + 1
                } else {
                    base
                }
            }
            FocusTarget::SubmitButton => 3,
        }
    }

    /// Validation message for a field from the last submit attempt
    pub fn error_for(&self, id: FieldId) -> Option<&str> {
        self.errors.get(&id).map(String::as_str)
    }
}
