//! Trait abstraction for the question service to enable mocking in tests

use crate::state::SurveyTopic;
use anyhow::Result;
use async_trait::async_trait;

/// Trait for question-service operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch the follow-up questions for a topic
    async fn fetch_questions(&self, topic: SurveyTopic) -> Result<Vec<String>>;
}
