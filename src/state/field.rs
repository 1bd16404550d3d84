//! Form field identities and value kinds

/// Options for the survey topic select
pub const TOPIC_OPTIONS: &[&str] = &["Technology", "Health", "Education"];

/// Options for the favorite programming language select
pub const LANGUAGE_OPTIONS: &[&str] = &["JavaScript", "Python", "Java", "C#"];

/// Options for the exercise frequency select
pub const EXERCISE_OPTIONS: &[&str] = &["Daily", "Weekly", "Monthly", "Rarely"];

/// Options for the diet preference select
pub const DIET_OPTIONS: &[&str] = &["Vegetarian", "Vegan", "Non-Vegetarian"];

/// Options for the highest qualification select
pub const QUALIFICATION_OPTIONS: &[&str] = &["High School", "Bachelor's", "Master's", "PhD"];

/// Identity of a form field
///
/// The fixed variants cover the static form surface; `AdditionalQuestion`
/// addresses one of the dynamically fetched follow-up inputs by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    FullName,
    Email,
    SurveyTopic,
    FavoriteProgrammingLanguage,
    YearsOfExperience,
    ExerciseFrequency,
    DietPreference,
    HighestQualification,
    FieldOfStudy,
    Feedback,
    AdditionalQuestion(usize),
}

/// Input kind of a field, driving both editing behavior and rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Select(&'static [&'static str]),
    Multiline,
}

impl FieldId {
    /// Key used for this field in the submission summary
    pub fn name(&self) -> String {
        match self {
            FieldId::FullName => "fullName".to_string(),
            FieldId::Email => "email".to_string(),
            FieldId::SurveyTopic => "surveyTopic".to_string(),
            FieldId::FavoriteProgrammingLanguage => "favoriteProgrammingLanguage".to_string(),
            FieldId::YearsOfExperience => "yearsOfExperience".to_string(),
            FieldId::ExerciseFrequency => "exerciseFrequency".to_string(),
            FieldId::DietPreference => "dietPreference".to_string(),
            FieldId::HighestQualification => "highestQualification".to_string(),
            FieldId::FieldOfStudy => "fieldOfStudy".to_string(),
            FieldId::Feedback => "feedback".to_string(),
            FieldId::AdditionalQuestion(index) => format!("additionalQuestion{index}"),
        }
    }

    /// Label shown next to the input
    ///
    /// Dynamic question inputs are labeled with the fetched question text,
    /// which the UI substitutes for this placeholder.
    pub fn label(&self) -> &'static str {
        match self {
            FieldId::FullName => "Full Name",
            FieldId::Email => "Email",
            FieldId::SurveyTopic => "Survey Topic",
            FieldId::FavoriteProgrammingLanguage => "Favorite Programming Language",
            FieldId::YearsOfExperience => "Years of Experience",
            FieldId::ExerciseFrequency => "Exercise Frequency",
            FieldId::DietPreference => "Diet Preference",
            FieldId::HighestQualification => "Highest Qualification",
            FieldId::FieldOfStudy => "Field of Study",
            FieldId::Feedback => "Feedback",
            FieldId::AdditionalQuestion(_) => "Additional Question",
        }
    }

    /// Placeholder shown while a select has no choice yet
    pub fn placeholder(&self) -> &'static str {
        match self {
            FieldId::SurveyTopic => "Select a topic",
            FieldId::FavoriteProgrammingLanguage => "Select a language",
            FieldId::ExerciseFrequency => "Select a frequency",
            FieldId::DietPreference => "Select a diet",
            FieldId::HighestQualification => "Select a qualification",
            _ => "(empty)",
        }
    }

    /// Input kind for this field
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldId::SurveyTopic => FieldKind::Select(TOPIC_OPTIONS),
            FieldId::FavoriteProgrammingLanguage => FieldKind::Select(LANGUAGE_OPTIONS),
            FieldId::YearsOfExperience => FieldKind::Number,
            FieldId::ExerciseFrequency => FieldKind::Select(EXERCISE_OPTIONS),
            FieldId::DietPreference => FieldKind::Select(DIET_OPTIONS),
            FieldId::HighestQualification => FieldKind::Select(QUALIFICATION_OPTIONS),
            FieldId::Feedback => FieldKind::Multiline,
            FieldId::FullName | FieldId::Email | FieldId::FieldOfStudy => FieldKind::Text,
            FieldId::AdditionalQuestion(_) => FieldKind::Text,
        }
    }
}

/// Cycle a select value through its options, passing through the empty
/// placeholder between the last and first option.
pub fn cycle_option(options: &[&str], current: &str, forward: bool) -> String {
    let position = options.iter().position(|option| *option == current);
    let next = match (position, forward) {
        (None, true) => options.first().copied(),
        (None, false) => options.last().copied(),
        (Some(i), true) => options.get(i + 1).copied(),
        (Some(0), false) => None,
        (Some(i), false) => options.get(i - 1).copied(),
    };
    next.unwrap_or("").to_string()
}
