//! HTTP client for the remote question service
//!
//! The service answers `GET {base}?topic={Topic}` with a JSON body holding
//! a `questions` array of strings. No authentication, no retry.

use super::traits::QuestionSource;
use crate::state::SurveyTopic;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;

/// Default question service address
const DEFAULT_ADDRESS: &str = "https://api.example.com/questions";

/// Wire format of the question service response
#[derive(Debug, Deserialize)]
struct QuestionsResponse {
    questions: Vec<String>,
}

/// Client for the remote question service
pub struct QuestionClient {
    http: reqwest::Client,
    address: String,
}

impl QuestionClient {
    /// Create a new client; the address comes from `SURVEY_QUESTIONS_URL`,
    /// then the config file, then the built-in default.
    pub fn new(configured_address: Option<String>) -> Self {
        let address = std::env::var("SURVEY_QUESTIONS_URL")
            .ok()
            .or(configured_address)
            .unwrap_or_else(|| DEFAULT_ADDRESS.to_string());

        Self {
            http: reqwest::Client::new(),
            address,
        }
    }
}

#[async_trait]
impl QuestionSource for QuestionClient {
    async fn fetch_questions(&self, topic: SurveyTopic) -> Result<Vec<String>> {
        let response = self
            .http
            .get(&self.address)
            .query(&[("topic", topic.as_str())])
            .send()
            .await
            .map_err(|e| anyhow!("Failed to reach question service: {}", e))?;

        let body: QuestionsResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Malformed question service response: {}", e))?;

        Ok(body.questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_wire_format() {
        let body: QuestionsResponse =
            serde_json::from_str(r#"{"questions":["Q1","Q2"]}"#).unwrap();
        assert_eq!(body.questions, vec!["Q1", "Q2"]);
    }

    #[test]
    fn test_response_rejects_missing_questions_field() {
        let result = serde_json::from_str::<QuestionsResponse>(r#"{"items":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_configured_address_is_used() {
        let client = QuestionClient::new(Some("http://localhost:9000/q".to_string()));
        assert_eq!(client.address, "http://localhost:9000/q");
    }

    #[test]
    fn test_default_address_when_unconfigured() {
        let client = QuestionClient::new(None);
        assert_eq!(client.address, DEFAULT_ADDRESS);
    }
}
