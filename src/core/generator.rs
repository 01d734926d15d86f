use std::{sync::Arc, time::Duration};

use tracing::{debug, info, warn};

use crate::{
    error::Result,
    schemas::validate_itinerary_payload,
    services::{
        extraction::{extract_structured, Extraction},
        openai_client::{ChatClient, ChatCompletionRequest, OpenAIClient},
        prompt::{build_itinerary_prompt, SYSTEM_PROMPT},
    },
    types::{Itinerary, ItineraryResult, TripPreferences},
};

pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 3000;

/// Turns trip preferences into an itinerary with one chat-completion call.
#[derive(Debug, Clone)]
pub struct ItineraryGenerator {
    client: Arc<dyn ChatClient>,
    model: String,
    temperature: f64,
    max_tokens: Option<u32>,
    strict: bool,
}

impl ItineraryGenerator {
    /// Generator backed by the OpenAI-compatible HTTP client.
    pub fn new(api_key: String) -> Self {
        Self::with_client(Arc::new(OpenAIClient::new(api_key)))
    }

    /// Build on an OpenAI-compatible endpoint with explicit base URL and timeout.
    pub fn with_endpoint(
        api_key: String,
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Self {
        let mut client = OpenAIClient::new(api_key);
        client.set_base_url(base_url);
        client.set_timeout(timeout);
        Self::with_client(Arc::new(client))
    }

    pub fn with_client(client: Arc<dyn ChatClient>) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: Some(DEFAULT_MAX_TOKENS),
            strict: false,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Reject replies that do not carry every expected key.
    pub fn with_strict_schema(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// The exact request `generate` would send for these preferences.
    pub fn build_request(&self, preferences: &TripPreferences) -> ChatCompletionRequest {
        let prompt = build_itinerary_prompt(preferences);
        ChatCompletionRequest::from_prompts(self.model.clone(), SYSTEM_PROMPT, &prompt)
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature)
    }

    /// Request an itinerary. Every failure is folded into `ItineraryResult::Error`.
    pub async fn generate(&self, preferences: &TripPreferences) -> ItineraryResult {
        let reply = match self.request_reply(preferences).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(target: "trip_planner::generator", error = %err, "itinerary request failed");
                return ItineraryResult::error(format!("Error generating recommendations: {err}"));
            }
        };

        self.interpret_reply(&reply)
    }

    async fn request_reply(&self, preferences: &TripPreferences) -> Result<String> {
        let request = self.build_request(preferences);
        info!(
            target: "trip_planner::generator",
            model = %self.model,
            temperature = self.temperature,
            destination = preferences.destination(),
            "requesting itinerary"
        );
        self.client.complete(&request).await
    }

    /// Map raw reply text onto a result: extraction, optional strict check, typed view.
    pub fn interpret_reply(&self, reply: &str) -> ItineraryResult {
        let payload = match extract_structured(reply) {
            Extraction::Structured(payload) => payload,
            Extraction::Unrecognized { raw, reason } => {
                debug!(target: "trip_planner::generator", %reason, "reply not recognized");
                return ItineraryResult::error_with_raw(
                    format!("Could not parse AI response: {reason}"),
                    raw,
                );
            }
        };

        if self.strict {
            if let Err(err) = validate_itinerary_payload(&payload) {
                debug!(target: "trip_planner::generator", error = %err, "strict schema check failed");
                return ItineraryResult::error_with_raw(err.to_string(), reply);
            }
        }

        match Itinerary::from_value(payload) {
            Ok(itinerary) => {
                info!(
                    target: "trip_planner::generator",
                    activities = itinerary.activities.len(),
                    suggestions = itinerary.additional_suggestions.len(),
                    "itinerary parsed"
                );
                ItineraryResult::Plan(itinerary)
            }
            Err(err) => ItineraryResult::error_with_raw(
                format!("Could not parse AI response: {err}"),
                reply,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TravelError;
    use async_trait::async_trait;

    #[derive(Debug)]
    struct FailingClient;

    #[async_trait]
    impl ChatClient for FailingClient {
        async fn complete(&self, _request: &ChatCompletionRequest) -> Result<String> {
            Err(TravelError::Http("connection refused".to_string()))
        }
    }

    fn generator() -> ItineraryGenerator {
        ItineraryGenerator::with_client(Arc::new(FailingClient))
    }

    #[test]
    fn test_defaults() {
        let generator = generator();
        assert_eq!(generator.model(), DEFAULT_MODEL);
        assert_eq!(generator.temperature(), DEFAULT_TEMPERATURE);
        assert!(!generator.is_strict());
    }

    #[test]
    fn test_interpret_reply_without_json() {
        let result = generator().interpret_reply("I'm not sure.");
        let err = result.as_error().unwrap();
        assert!(err.message.starts_with("Could not parse AI response"));
        assert_eq!(err.raw_response.as_deref(), Some("I'm not sure."));
    }

    #[test]
    fn test_interpret_reply_lenient_by_default() {
        let result = generator().interpret_reply(r#"Sure! {"hotel": {"name": "Ritz"}}"#);
        let plan = result.plan().unwrap();
        assert_eq!(
            plan.hotel.as_ref().and_then(|h| h.name.as_deref()),
            Some("Ritz")
        );
        assert!(plan.flight.is_none());
    }

    #[test]
    fn test_interpret_reply_strict_rejects_partial_payload() {
        let reply = r#"{"hotel": {"name": "Ritz"}}"#;
        let result = generator().with_strict_schema(true).interpret_reply(reply);
        let err = result.as_error().unwrap();
        assert!(err.message.contains("itinerary schema"));
        assert_eq!(err.raw_response.as_deref(), Some(reply));
    }

    #[tokio::test]
    async fn test_generate_folds_transport_errors() {
        let prefs = crate::types::PreferenceForm {
            destination: Some("Rome".to_string()),
            origin: Some("Boston".to_string()),
            start_date: chrono::NaiveDate::from_ymd_opt(2025, 9, 1),
            end_date: chrono::NaiveDate::from_ymd_opt(2025, 9, 4),
            ..Default::default()
        }
        .validate()
        .unwrap();

        let result = generator().generate(&prefs).await;
        let err = result.as_error().unwrap();
        assert!(err.message.contains("connection refused"));
        assert!(err.raw_response.is_none());
    }
}
