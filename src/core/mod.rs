pub mod generator;
pub mod session;

pub use generator::{ItineraryGenerator, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
pub use session::TripSession;
