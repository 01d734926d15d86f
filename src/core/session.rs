use tracing::{debug, info};

use crate::{
    core::generator::ItineraryGenerator,
    error::{Result, TravelError},
    render::render_result,
    types::{ItineraryResult, PreferenceForm, TripPreferences},
};

/// State for one user's planning session.
///
/// Holds the last submitted preferences and the result they produced.
/// `reset` is the "new trip" action.
#[derive(Debug, Clone, Default)]
pub struct TripSession {
    preferences: Option<TripPreferences>,
    result: Option<ItineraryResult>,
}

impl TripSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the credential and required fields, then generate.
    ///
    /// Both checks run before any request is made. `credential` is only
    /// inspected here; the generator already carries the key it sends.
    pub async fn submit(
        &mut self,
        form: &PreferenceForm,
        credential: Option<&str>,
        generator: &ItineraryGenerator,
    ) -> Result<&ItineraryResult> {
        if credential.map(|key| key.trim().is_empty()).unwrap_or(true) {
            return Err(TravelError::MissingCredential);
        }

        let preferences = form.validate()?;
        info!(
            target: "trip_planner::session",
            destination = preferences.destination(),
            days = preferences.duration_days(),
            "preferences collected"
        );

        let result = generator.generate(&preferences).await;
        self.preferences = Some(preferences);
        let stored: &ItineraryResult = self.result.insert(result);
        Ok(stored)
    }

    pub fn preferences(&self) -> Option<&TripPreferences> {
        self.preferences.as_ref()
    }

    pub fn result(&self) -> Option<&ItineraryResult> {
        self.result.as_ref()
    }

    pub fn is_collected(&self) -> bool {
        self.preferences.is_some()
    }

    /// Render the stored result, if a submission has completed.
    pub fn render(&self) -> Option<String> {
        match (&self.preferences, &self.result) {
            (Some(preferences), Some(result)) => Some(render_result(result, preferences)),
            _ => None,
        }
    }

    /// Start a new trip: forget preferences and result.
    pub fn reset(&mut self) {
        debug!(target: "trip_planner::session", "session reset");
        self.preferences = None;
        self.result = None;
    }
}
