pub mod validation;

pub use validation::{itinerary_response_schema, validate_itinerary_payload};
