//! Survey form data model

use super::field::FieldId;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Closed set of survey topics
///
/// The selected topic gates which conditional field group is rendered and
/// which fields are required at submit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurveyTopic {
    Technology,
    Health,
    Education,
}

impl SurveyTopic {
    /// Topic name as it appears in the select options and the wire format
    pub fn as_str(&self) -> &'static str {
        match self {
            SurveyTopic::Technology => "Technology",
            SurveyTopic::Health => "Health",
            SurveyTopic::Education => "Education",
        }
    }

    /// Parse a select value back into a topic; the empty placeholder and
    /// unknown values map to `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Technology" => Some(SurveyTopic::Technology),
            "Health" => Some(SurveyTopic::Health),
            "Education" => Some(SurveyTopic::Education),
            _ => None,
        }
    }
}

/// All values held by the survey form
///
/// Values of a hidden conditional group are retained when the topic changes
/// away from it; they stay out of the required set but still appear in the
/// serialized submission.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    pub full_name: String,
    pub email: String,
    pub survey_topic: Option<SurveyTopic>,
    pub favorite_programming_language: String,
    pub years_of_experience: String,
    pub exercise_frequency: String,
    pub diet_preference: String,
    pub highest_qualification: String,
    pub field_of_study: String,
    pub feedback: String,
    /// Answers to the fetched follow-up questions, paired by position
    pub additional_answers: Vec<String>,
}

impl FormData {
    /// Current value of a field as displayed and serialized
    pub fn value(&self, id: FieldId) -> &str {
        match id {
            FieldId::FullName => &self.full_name,
            FieldId::Email => &self.email,
            FieldId::SurveyTopic => self.survey_topic.map(|t| t.as_str()).unwrap_or(""),
            FieldId::FavoriteProgrammingLanguage => &self.favorite_programming_language,
            FieldId::YearsOfExperience => &self.years_of_experience,
            FieldId::ExerciseFrequency => &self.exercise_frequency,
            FieldId::DietPreference => &self.diet_preference,
            FieldId::HighestQualification => &self.highest_qualification,
            FieldId::FieldOfStudy => &self.field_of_study,
            FieldId::Feedback => &self.feedback,
            FieldId::AdditionalQuestion(index) => {
                self.additional_answers.get(index).map(String::as_str).unwrap_or("")
            }
        }
    }

    /// Mutable access to a field's backing string
    ///
    /// Returns `None` for the topic select (changed through
    /// [`SurveyTopic`], not free text) and for out-of-range dynamic answers.
    pub fn value_mut(&mut self, id: FieldId) -> Option<&mut String> {
        match id {
            FieldId::FullName => Some(&mut self.full_name),
            FieldId::Email => Some(&mut self.email),
            FieldId::SurveyTopic => None,
            FieldId::FavoriteProgrammingLanguage => Some(&mut self.favorite_programming_language),
            FieldId::YearsOfExperience => Some(&mut self.years_of_experience),
            FieldId::ExerciseFrequency => Some(&mut self.exercise_frequency),
            FieldId::DietPreference => Some(&mut self.diet_preference),
            FieldId::HighestQualification => Some(&mut self.highest_qualification),
            FieldId::FieldOfStudy => Some(&mut self.field_of_study),
            FieldId::Feedback => Some(&mut self.feedback),
            FieldId::AdditionalQuestion(index) => self.additional_answers.get_mut(index),
        }
    }

    /// Fields rendered for the current topic, in traversal order
    ///
    /// At most one conditional group is visible at a time; the dynamic
    /// question inputs follow the feedback field.
    pub fn visible_fields(&self, question_count: usize) -> Vec<FieldId> {
        let mut fields = vec![FieldId::FullName, FieldId::Email, FieldId::SurveyTopic];
        match self.survey_topic {
            Some(SurveyTopic::Technology) => {
                fields.push(FieldId::FavoriteProgrammingLanguage);
                fields.push(FieldId::YearsOfExperience);
            }
            Some(SurveyTopic::Health) => {
                fields.push(FieldId::ExerciseFrequency);
                fields.push(FieldId::DietPreference);
            }
            Some(SurveyTopic::Education) => {
                fields.push(FieldId::HighestQualification);
                fields.push(FieldId::FieldOfStudy);
            }
            None => {}
        }
        fields.push(FieldId::Feedback);
        fields.extend((0..question_count).map(FieldId::AdditionalQuestion));
        fields
    }
}

/// Serialize every field, visible or not, under its wire name so the
/// submission summary shows the complete form state.
impl Serialize for FormData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        const FIXED_FIELDS: [FieldId; 10] = [
            FieldId::FullName,
            FieldId::Email,
            FieldId::SurveyTopic,
            FieldId::FavoriteProgrammingLanguage,
            FieldId::YearsOfExperience,
            FieldId::ExerciseFrequency,
            FieldId::DietPreference,
            FieldId::HighestQualification,
            FieldId::FieldOfStudy,
            FieldId::Feedback,
        ];

        let mut map =
            serializer.serialize_map(Some(FIXED_FIELDS.len() + self.additional_answers.len()))?;
        for id in FIXED_FIELDS {
            map.serialize_entry(&id.name(), self.value(id))?;
        }
        for (index, answer) in self.additional_answers.iter().enumerate() {
            map.serialize_entry(&FieldId::AdditionalQuestion(index).name(), answer)?;
        }
        map.end()
    }
}
