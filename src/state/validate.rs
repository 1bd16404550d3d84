//! Submit-time form validation

use super::field::FieldId;
use super::form::{FormData, SurveyTopic};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Per-field validation messages; absent keys mean the field passed
pub type ValidationErrors = BTreeMap<FieldId, String>;

/// Minimum feedback length in characters
const MIN_FEEDBACK_LEN: usize = 50;

/// Validate the whole form against the current topic.
///
/// Every rule is evaluated on every call and the returned map replaces the
/// previous one wholesale, so errors for a conditional group disappear as
/// soon as the topic moves away from it. Pure function of the form data.
pub fn validate(form: &FormData) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if form.full_name.is_empty() {
        errors.insert(FieldId::FullName, "Full Name is required".to_string());
    }
    if form.email.is_empty() || !has_email_shape(&form.email) {
        errors.insert(FieldId::Email, "Valid Email is required".to_string());
    }
    if form.survey_topic.is_none() {
        errors.insert(FieldId::SurveyTopic, "Survey Topic is required".to_string());
    }

    match form.survey_topic {
        Some(SurveyTopic::Technology) => {
            if form.favorite_programming_language.is_empty() {
                errors.insert(
                    FieldId::FavoriteProgrammingLanguage,
                    "Favorite Programming Language is required".to_string(),
                );
            }
            if !is_positive_number(&form.years_of_experience) {
                errors.insert(
                    FieldId::YearsOfExperience,
                    "Years of Experience is required and must be a number greater than 0"
                        .to_string(),
                );
            }
        }
        Some(SurveyTopic::Health) => {
            if form.exercise_frequency.is_empty() {
                errors.insert(
                    FieldId::ExerciseFrequency,
                    "Exercise Frequency is required".to_string(),
                );
            }
            if form.diet_preference.is_empty() {
                errors.insert(
                    FieldId::DietPreference,
                    "Diet Preference is required".to_string(),
                );
            }
        }
        Some(SurveyTopic::Education) => {
            if form.highest_qualification.is_empty() {
                errors.insert(
                    FieldId::HighestQualification,
                    "Highest Qualification is required".to_string(),
                );
            }
            if form.field_of_study.is_empty() {
                errors.insert(
                    FieldId::FieldOfStudy,
                    "Field of Study is required".to_string(),
                );
            }
        }
        None => {}
    }

    if form.feedback.chars().count() < MIN_FEEDBACK_LEN {
        errors.insert(
            FieldId::Feedback,
            "Feedback is required and must be at least 50 characters".to_string(),
        );
    }

    errors
}

/// Email shape required at submit time: non-whitespace, an `@`,
/// non-whitespace, a dot, non-whitespace, anywhere in the string
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email pattern"));

fn has_email_shape(s: &str) -> bool {
    EMAIL_SHAPE.is_match(s)
}

/// Numeric and strictly greater than zero; anything unparseable fails
fn is_positive_number(s: &str) -> bool {
    s.trim().parse::<f64>().map(|n| n > 0.0).unwrap_or(false)
}
