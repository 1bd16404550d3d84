//! Application state and core logic

use crate::config::TuiConfig;
use crate::questions::{QuestionClient, QuestionSource};
use crate::state::{
    cycle_option, validate, AppState, FieldId, FieldKind, FocusTarget, SurveyTopic, View,
    TOPIC_OPTIONS,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Result of a background question fetch, tagged with the topic it was
/// issued for so responses that resolve after another topic change can be
/// discarded instead of overwriting the current list.
#[derive(Debug)]
pub struct FetchedQuestions {
    pub topic: SurveyTopic,
    pub questions: Vec<String>,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Question service used for topic follow-up fetches
    questions: Arc<dyn QuestionSource>,
    /// Sender handed to spawned fetch tasks
    fetch_tx: mpsc::UnboundedSender<FetchedQuestions>,
    /// Receiver drained once per event-loop tick
    fetch_rx: mpsc::UnboundedReceiver<FetchedQuestions>,
    /// Terminal size for scroll calculations (height, width)
    pub terminal_size: Option<(u16, u16)>,
}

impl App {
    /// Create a new App instance backed by the HTTP question client
    pub fn new(config: &TuiConfig) -> Self {
        Self::with_source(Arc::new(QuestionClient::new(
            config.questions_address.clone(),
        )))
    }

    /// Create an App with an arbitrary question source
    pub fn with_source(questions: Arc<dyn QuestionSource>) -> Self {
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            questions,
            fetch_tx,
            fetch_rx,
            terminal_size: None,
        }
    }

    /// Drain completed background fetches; called once per event-loop tick
    pub fn poll_fetched_questions(&mut self) {
        while let Ok(fetched) = self.fetch_rx.try_recv() {
            self.apply_fetched_questions(fetched);
        }
    }

    /// Apply a fetch result, replacing the question list wholesale.
    ///
    /// A result for a topic that is no longer selected is dropped; both the
    /// question list and the answer slots are replaced together so they
    /// stay paired by position.
    fn apply_fetched_questions(&mut self, fetched: FetchedQuestions) {
        if self.state.form.survey_topic != Some(fetched.topic) {
            tracing::debug!(
                topic = fetched.topic.as_str(),
                "discarding stale question fetch"
            );
            return;
        }
        self.state.form.additional_answers = vec![String::new(); fetched.questions.len()];
        self.state.additional_questions = fetched.questions;
        self.ensure_focus_visible();
    }

    /// Issue one fetch for the given topic without blocking the UI.
    ///
    /// Failures go to the log only; the current question list stays as it
    /// is and the form remains usable.
    fn spawn_question_fetch(&self, topic: SurveyTopic) {
        let source = Arc::clone(&self.questions);
        let tx = self.fetch_tx.clone();
        tokio::spawn(async move {
            match source.fetch_questions(topic).await {
                Ok(questions) => {
                    let _ = tx.send(FetchedQuestions { topic, questions });
                }
                Err(err) => {
                    tracing::error!(
                        topic = topic.as_str(),
                        error = %err,
                        "failed to fetch additional questions"
                    );
                }
            }
        });
    }

    /// Handle a key event for the current view
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.state.current_view {
            View::Form => self.handle_form_key(key),
            View::Summary => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                    self.state.summary = None;
                    self.state.current_view = View::Form;
                }
                Ok(())
            }
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        // Submit from anywhere in the form
        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return self.submit();
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.next_focus(),
            KeyCode::BackTab | KeyCode::Up => self.prev_focus(),
            KeyCode::Enter => match self.state.focused_target() {
                FocusTarget::SubmitButton => return self.submit(),
                FocusTarget::Field(FieldId::Feedback) => self.push_char('\n'),
                FocusTarget::Field(_) => self.next_focus(),
            },
            KeyCode::Left => self.cycle_select(false),
            KeyCode::Right => self.cycle_select(true),
            KeyCode::Backspace => self.pop_char(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.push_char(c)
            }
            _ => {}
        }
        Ok(())
    }

    /// Run full validation; on success open the summary dialog with the
    /// complete serialized form data. Purely local, no network submission.
    fn submit(&mut self) -> Result<()> {
        self.state.errors = validate(&self.state.form);
        if self.state.errors.is_empty() {
            self.state.summary = Some(serde_json::to_string_pretty(&self.state.form)?);
            self.state.current_view = View::Summary;
        } else {
            tracing::debug!(
                errors = self.state.errors.len(),
                "submit blocked by validation"
            );
            self.ensure_focus_visible();
        }
        Ok(())
    }

    fn next_focus(&mut self) {
        let count = self.state.focus_targets().len();
        self.state.focus = (self.state.focus + 1) % count;
        self.ensure_focus_visible();
    }

    fn prev_focus(&mut self) {
        let count = self.state.focus_targets().len();
        if self.state.focus == 0 {
            self.state.focus = count - 1;
        } else {
            self.state.focus -= 1;
        }
        self.ensure_focus_visible();
    }

    /// Append a character to the focused field
    ///
    /// Selects only react to Space (cycle forward); the number field only
    /// accepts characters a number input would.
    fn push_char(&mut self, c: char) {
        let FocusTarget::Field(id) = self.state.focused_target() else {
            return;
        };
        match id.kind() {
            FieldKind::Select(_) => {
                if c == ' ' {
                    self.cycle_select(true);
                }
            }
            FieldKind::Number => {
                if let Some(value) = self.state.form.value_mut(id) {
                    // Only what a number input lets through: digits, a
                    // leading sign, one decimal point
                    let accepted = match c {
                        '0'..='9' => true,
                        '-' => value.is_empty(),
                        '.' => !value.contains('.'),
                        _ => false,
                    };
                    if accepted {
                        value.push(c);
                    }
                }
            }
            FieldKind::Text | FieldKind::Multiline => {
                if let Some(value) = self.state.form.value_mut(id) {
                    value.push(c);
                }
            }
        }
    }

    /// Remove the last character of the focused field; on a select this
    /// clears the choice back to the placeholder.
    fn pop_char(&mut self) {
        let FocusTarget::Field(id) = self.state.focused_target() else {
            return;
        };
        match id.kind() {
            FieldKind::Select(_) => {
                if id == FieldId::SurveyTopic {
                    self.state.form.survey_topic = None;
                    self.ensure_focus_visible();
                } else if let Some(value) = self.state.form.value_mut(id) {
                    value.clear();
                }
            }
            _ => {
                if let Some(value) = self.state.form.value_mut(id) {
                    value.pop();
                }
            }
        }
    }

    /// Cycle the focused select through its options
    fn cycle_select(&mut self, forward: bool) {
        let FocusTarget::Field(id) = self.state.focused_target() else {
            return;
        };
        if id == FieldId::SurveyTopic {
            self.cycle_topic(forward);
            return;
        }
        if let FieldKind::Select(options) = id.kind() {
            let next = cycle_option(options, self.state.form.value(id), forward);
            if let Some(value) = self.state.form.value_mut(id) {
                *value = next;
            }
        }
    }

    /// Change the survey topic and trigger the follow-up question fetch.
    ///
    /// Every transition to a topic issues a fresh fetch, including a switch
    /// back to a previously selected topic; clearing the topic issues none.
    fn cycle_topic(&mut self, forward: bool) {
        let current = self.state.form.survey_topic.map(|t| t.as_str()).unwrap_or("");
        let next = SurveyTopic::from_name(&cycle_option(TOPIC_OPTIONS, current, forward));
        if next == self.state.form.survey_topic {
            return;
        }
        self.state.form.survey_topic = next;
        self.ensure_focus_visible();
        if let Some(topic) = next {
            self.spawn_question_fetch(topic);
        }
    }

    /// Clamp focus to the visible slots and scroll so the focused slot fits
    /// on screen.
    fn ensure_focus_visible(&mut self) {
        let targets = self.state.focus_targets();
        if self.state.focus >= targets.len() {
            self.state.focus = targets.len() - 1;
        }
        if self.state.focus < self.state.form_scroll {
            self.state.form_scroll = self.state.focus;
            return;
        }

        // Rows available inside the form block (borders + status bar)
        let available = self
            .terminal_size
            .map(|(h, _)| h)
            .unwrap_or(24)
            .saturating_sub(3);

        while self.state.form_scroll < self.state.focus {
            let used: u16 = targets[self.state.form_scroll..=self.state.focus]
                .iter()
                .map(|target| self.state.slot_height(*target))
                .sum();
            if used <= available {
                break;
            }
            self.state.form_scroll += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::traits::MockQuestionSource;
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// App whose question source must never be called
    fn quiet_app() -> App {
        App::with_source(Arc::new(MockQuestionSource::new()))
    }

    fn valid_health_app() -> App {
        let mut app = quiet_app();
        app.state.form.full_name = "Jane Doe".to_string();
        app.state.form.email = "jane@x.com".to_string();
        app.state.form.survey_topic = Some(SurveyTopic::Health);
        app.state.form.exercise_frequency = "Daily".to_string();
        app.state.form.diet_preference = "Vegan".to_string();
        app.state.form.feedback = "x".repeat(60);
        app
    }

    /// Drive the current-thread runtime until spawned fetches have landed
    async fn drain_fetches(app: &mut App) {
        for _ in 0..10 {
            tokio::task::yield_now().await;
            app.poll_fetched_questions();
        }
    }

    mod editing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_typing_edits_exactly_one_field() {
            let mut app = quiet_app();
            app.handle_key(key(KeyCode::Char('J'))).unwrap();
            assert_eq!(app.state.form.full_name, "J");
            assert_eq!(app.state.form.email, "");
            assert!(app.state.errors.is_empty());
        }

        #[test]
        fn test_backspace_removes_last_char() {
            let mut app = quiet_app();
            app.handle_key(key(KeyCode::Char('J'))).unwrap();
            app.handle_key(key(KeyCode::Char('o'))).unwrap();
            app.handle_key(key(KeyCode::Backspace)).unwrap();
            assert_eq!(app.state.form.full_name, "J");
        }

        #[test]
        fn test_number_field_accepts_digits_only() {
            let mut app = quiet_app();
            app.state.form.survey_topic = Some(SurveyTopic::Technology);
            app.state.focus = 4; // years of experience
            app.handle_key(key(KeyCode::Char('a'))).unwrap();
            assert_eq!(app.state.form.years_of_experience, "");
            app.handle_key(key(KeyCode::Char('5'))).unwrap();
            assert_eq!(app.state.form.years_of_experience, "5");
        }

        #[test]
        fn test_number_field_limits_sign_and_decimal_point() {
            let mut app = quiet_app();
            app.state.form.survey_topic = Some(SurveyTopic::Technology);
            app.state.focus = 4; // years of experience
            // The second '-' and '.' must be swallowed
            for c in ['-', '5', '-', '.', '3', '.'] {
                app.handle_key(key(KeyCode::Char(c))).unwrap();
            }
            assert_eq!(app.state.form.years_of_experience, "-5.3");
        }

        #[test]
        fn test_select_cycles_with_arrows_and_clears_with_backspace() {
            let mut app = quiet_app();
            app.state.form.survey_topic = Some(SurveyTopic::Health);
            app.state.focus = 3; // exercise frequency
            app.handle_key(key(KeyCode::Right)).unwrap();
            assert_eq!(app.state.form.exercise_frequency, "Daily");
            app.handle_key(key(KeyCode::Right)).unwrap();
            assert_eq!(app.state.form.exercise_frequency, "Weekly");
            app.handle_key(key(KeyCode::Left)).unwrap();
            assert_eq!(app.state.form.exercise_frequency, "Daily");
            app.handle_key(key(KeyCode::Backspace)).unwrap();
            assert_eq!(app.state.form.exercise_frequency, "");
        }

        #[test]
        fn test_space_cycles_select_forward() {
            let mut app = quiet_app();
            app.state.form.survey_topic = Some(SurveyTopic::Health);
            app.state.focus = 4; // diet preference
            app.handle_key(key(KeyCode::Char(' '))).unwrap();
            assert_eq!(app.state.form.diet_preference, "Vegetarian");
        }

        #[test]
        fn test_enter_in_feedback_inserts_newline() {
            let mut app = quiet_app();
            app.state.focus = 3; // feedback (no topic selected)
            app.handle_key(key(KeyCode::Char('a'))).unwrap();
            app.handle_key(key(KeyCode::Enter)).unwrap();
            app.handle_key(key(KeyCode::Char('b'))).unwrap();
            assert_eq!(app.state.form.feedback, "a\nb");
        }

        #[test]
        fn test_enter_on_text_field_advances_focus() {
            let mut app = quiet_app();
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.state.focus, 1);
        }

        #[test]
        fn test_tab_wraps_around() {
            let mut app = quiet_app();
            // fullName, email, surveyTopic, feedback, submit
            for _ in 0..5 {
                app.handle_key(key(KeyCode::Tab)).unwrap();
            }
            assert_eq!(app.state.focus, 0);
            app.handle_key(key(KeyCode::BackTab)).unwrap();
            assert_eq!(app.state.focus, 4);
        }

        #[test]
        fn test_typing_on_submit_button_is_ignored() {
            let mut app = quiet_app();
            app.state.focus = 4; // submit button
            app.handle_key(key(KeyCode::Char('x'))).unwrap();
            assert_eq!(app.state.form.feedback, "");
            assert_eq!(app.state.form.full_name, "");
        }
    }

    mod topic_changes {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_clearing_topic_issues_no_fetch() {
            // No tokio runtime here: an erroneous spawn would panic
            let mut app = quiet_app();
            app.state.form.survey_topic = Some(SurveyTopic::Technology);
            app.state.focus = 2;
            app.handle_key(key(KeyCode::Left)).unwrap();
            assert_eq!(app.state.form.survey_topic, None);
        }

        #[test]
        fn test_no_fetch_on_startup() {
            // Construction alone must not touch the question source
            let app = quiet_app();
            assert!(app.state.additional_questions.is_empty());
        }

        #[tokio::test]
        async fn test_topic_change_fetches_questions_for_that_topic() {
            let mut mock = MockQuestionSource::new();
            mock.expect_fetch_questions()
                .with(eq(SurveyTopic::Education))
                .times(1)
                .returning(|_| Ok(vec!["Q1".to_string(), "Q2".to_string()]));
            let mut app = App::with_source(Arc::new(mock));
            app.state.form.survey_topic = Some(SurveyTopic::Health);
            app.state.focus = 2;

            app.handle_key(key(KeyCode::Right)).unwrap(); // Health -> Education
            drain_fetches(&mut app).await;

            assert_eq!(app.state.additional_questions, vec!["Q1", "Q2"]);
            assert_eq!(
                app.state.form.additional_answers,
                vec![String::new(), String::new()]
            );
            let names: Vec<String> = app
                .state
                .focus_targets()
                .iter()
                .filter_map(|target| match target {
                    FocusTarget::Field(id @ FieldId::AdditionalQuestion(_)) => Some(id.name()),
                    _ => None,
                })
                .collect();
            assert_eq!(names, vec!["additionalQuestion0", "additionalQuestion1"]);
        }

        #[tokio::test]
        async fn test_switching_back_refetches_without_caching() {
            let mut mock = MockQuestionSource::new();
            mock.expect_fetch_questions()
                .with(eq(SurveyTopic::Technology))
                .times(2)
                .returning(|_| Ok(vec!["T1".to_string()]));
            let mut app = App::with_source(Arc::new(mock));
            app.state.focus = 2;

            app.handle_key(key(KeyCode::Right)).unwrap(); // -> Technology
            drain_fetches(&mut app).await;
            app.handle_key(key(KeyCode::Left)).unwrap(); // -> unset
            app.handle_key(key(KeyCode::Right)).unwrap(); // -> Technology again
            drain_fetches(&mut app).await;

            assert_eq!(app.state.additional_questions, vec!["T1"]);
        }

        #[tokio::test]
        async fn test_fetch_failure_leaves_previous_questions() {
            let mut mock = MockQuestionSource::new();
            mock.expect_fetch_questions()
                .returning(|_| Err(anyhow::anyhow!("service unreachable")));
            let mut app = App::with_source(Arc::new(mock));
            app.state.additional_questions = vec!["old".to_string()];
            app.state.form.additional_answers = vec!["kept".to_string()];
            app.state.form.survey_topic = Some(SurveyTopic::Technology);
            app.state.focus = 2;

            app.handle_key(key(KeyCode::Right)).unwrap(); // Technology -> Health
            drain_fetches(&mut app).await;

            assert_eq!(app.state.additional_questions, vec!["old"]);
            assert_eq!(app.state.form.additional_answers, vec!["kept"]);
        }

        #[test]
        fn test_stale_fetch_result_is_discarded() {
            let mut app = quiet_app();
            app.state.form.survey_topic = Some(SurveyTopic::Health);

            // A slow response for a topic the user has already left
            app.apply_fetched_questions(FetchedQuestions {
                topic: SurveyTopic::Technology,
                questions: vec!["T1".to_string()],
            });
            assert!(app.state.additional_questions.is_empty());

            app.apply_fetched_questions(FetchedQuestions {
                topic: SurveyTopic::Health,
                questions: vec!["H1".to_string()],
            });
            assert_eq!(app.state.additional_questions, vec!["H1"]);
        }

        #[tokio::test]
        async fn test_topic_switch_preserves_hidden_values() {
            let mut mock = MockQuestionSource::new();
            mock.expect_fetch_questions().returning(|_| Ok(vec![]));
            let mut app = App::with_source(Arc::new(mock));
            app.state.form.survey_topic = Some(SurveyTopic::Technology);
            app.state.form.favorite_programming_language = "Python".to_string();
            app.state.focus = 2;

            app.handle_key(key(KeyCode::Right)).unwrap(); // -> Health

            assert_eq!(app.state.form.survey_topic, Some(SurveyTopic::Health));
            assert_eq!(app.state.form.favorite_programming_language, "Python");
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_submit_with_valid_data_opens_summary() {
            let mut app = valid_health_app();
            app.handle_key(ctrl('s')).unwrap();

            assert_eq!(app.state.current_view, View::Summary);
            assert!(app.state.errors.is_empty());
            let summary = app.state.summary.clone().unwrap();
            assert!(summary.contains("\"fullName\": \"Jane Doe\""));
            assert!(summary.contains("\"surveyTopic\": \"Health\""));
            assert!(summary.contains("\"dietPreference\": \"Vegan\""));
        }

        #[test]
        fn test_submit_with_invalid_data_collects_errors() {
            let mut app = quiet_app();
            app.handle_key(ctrl('s')).unwrap();

            assert_eq!(app.state.current_view, View::Form);
            assert!(app.state.summary.is_none());
            let keys: Vec<FieldId> = app.state.errors.keys().copied().collect();
            assert_eq!(
                keys,
                vec![
                    FieldId::FullName,
                    FieldId::Email,
                    FieldId::SurveyTopic,
                    FieldId::Feedback,
                ]
            );
        }

        #[test]
        fn test_resubmit_replaces_error_map_wholesale() {
            let mut app = quiet_app();
            app.handle_key(ctrl('s')).unwrap();
            assert!(!app.state.errors.is_empty());

            let valid = valid_health_app();
            app.state.form = valid.state.form;
            app.handle_key(ctrl('s')).unwrap();
            assert!(app.state.errors.is_empty());
        }

        #[test]
        fn test_enter_on_submit_button_submits() {
            let mut app = valid_health_app();
            // fullName, email, topic, frequency, diet, feedback, submit
            app.state.focus = 6;
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.state.current_view, View::Summary);
        }

        #[test]
        fn test_summary_dismissed_with_esc() {
            let mut app = valid_health_app();
            app.handle_key(ctrl('s')).unwrap();
            assert_eq!(app.state.current_view, View::Summary);

            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert_eq!(app.state.current_view, View::Form);
            assert!(app.state.summary.is_none());
            // Form data survives; there is no reset after submit
            assert_eq!(app.state.form.full_name, "Jane Doe");
        }
    }

    mod scrolling {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_focus_scrolls_form_on_short_terminal() {
            let mut app = quiet_app();
            app.terminal_size = Some((10, 80));
            app.state.form.survey_topic = Some(SurveyTopic::Education);
            for _ in 0..6 {
                app.handle_key(key(KeyCode::Tab)).unwrap();
            }
            assert!(app.state.form_scroll > 0);
        }

        #[test]
        fn test_scrolling_back_up_follows_focus() {
            let mut app = quiet_app();
            app.terminal_size = Some((10, 80));
            app.state.form.survey_topic = Some(SurveyTopic::Education);
            for _ in 0..6 {
                app.handle_key(key(KeyCode::Tab)).unwrap();
            }
            for _ in 0..6 {
                app.handle_key(key(KeyCode::BackTab)).unwrap();
            }
            assert_eq!(app.state.form_scroll, 0);
        }
    }
}
