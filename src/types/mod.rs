pub mod itinerary;
pub(crate) mod lenient;
pub mod preferences;

pub use itinerary::{
    Activity, CostBreakdown, FlightOffer, HotelOffer, Itinerary, ItineraryError, ItineraryResult,
};
pub use preferences::{AccommodationType, Interest, PreferenceForm, TripPreferences};
