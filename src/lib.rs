//! trip-planner-rs: turn travel preferences into an LLM-generated itinerary
//!
//! The pipeline is linear: a [`PreferenceForm`] is validated into
//! [`TripPreferences`], an [`ItineraryGenerator`] sends one chat-completion
//! request, the JSON object embedded in the reply becomes an [`Itinerary`],
//! and [`render_result`] lays it out as text. Generation never returns an
//! error; failures come back as [`ItineraryResult::Error`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use trip_planner_rs::{render_result, ItineraryGenerator, PreferenceForm};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_key = std::env::var("OPENAI_API_KEY")?;
//!     let form = PreferenceForm {
//!         destination: Some("Paris".to_string()),
//!         origin: Some("New York".to_string()),
//!         start_date: chrono::NaiveDate::from_ymd_opt(2025, 6, 1),
//!         end_date: chrono::NaiveDate::from_ymd_opt(2025, 6, 6),
//!         travelers: 2,
//!         ..PreferenceForm::default()
//!     };
//!     let preferences = form.validate()?;
//!
//!     let generator = ItineraryGenerator::new(api_key);
//!     let result = generator.generate(&preferences).await;
//!     println!("{}", render_result(&result, &preferences));
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod render;
pub mod schemas;
pub(crate) mod services;
pub mod types;

pub use config::{Settings, SettingsOverrides};
pub use crate::core::{ItineraryGenerator, TripSession};
pub use error::{Result, TravelError};
pub use render::{render_result, PLACEHOLDER};
pub use services::extraction::{extract_structured, find_json_block, Extraction, UnrecognizedReason};
pub use services::openai_client::{ChatClient, ChatCompletionRequest, OpenAIClient};
pub use services::prompt::{build_itinerary_prompt, SYSTEM_PROMPT};
pub use types::{
    AccommodationType, Activity, CostBreakdown, FlightOffer, HotelOffer, Interest, Itinerary,
    ItineraryError, ItineraryResult, PreferenceForm, TripPreferences,
};

#[cfg(feature = "cli")]
pub mod cli;
