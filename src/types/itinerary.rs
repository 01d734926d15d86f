use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::lenient;
use crate::error::{Result, TravelError};

/// Structured travel plan returned by the model.
///
/// Every field is optional. The original JSON object is kept in `raw` so
/// exports reproduce exactly what the model sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    /// Concise restatement of the traveler's requirements
    #[serde(default, deserialize_with = "lenient::text")]
    pub user_preferences_summary: Option<String>,
    /// Why the model picked these options
    #[serde(default, deserialize_with = "lenient::text")]
    pub analysis_reasoning: Option<String>,
    #[serde(default, rename = "flights", deserialize_with = "lenient::record")]
    pub flight: Option<FlightOffer>,
    #[serde(default, deserialize_with = "lenient::record")]
    pub hotel: Option<HotelOffer>,
    /// Per-day activities in the order the model returned them
    #[serde(default, deserialize_with = "lenient::records")]
    pub activities: Vec<Activity>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub additional_suggestions: Vec<String>,
    #[serde(default, deserialize_with = "lenient::record")]
    pub cost_breakdown: Option<CostBreakdown>,
    #[serde(skip)]
    raw: Value,
}

impl Itinerary {
    /// Build the typed view over a parsed JSON object.
    ///
    /// Only a non-object payload fails; missing or oddly typed keys do not.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(TravelError::Validation(format!(
                "expected a JSON object for the itinerary, found {}",
                json_kind(&value)
            )));
        }

        let raw = value.to_string();
        let mut deserializer = serde_json::Deserializer::from_str(&raw);
        let mut itinerary: Itinerary = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|err| {
                let path = err.path().to_string();
                let location = if path.is_empty() {
                    "<root>".to_string()
                } else {
                    path
                };
                TravelError::Validation(format!(
                    "failed to read itinerary at {}: {}",
                    location,
                    err.inner()
                ))
            })?;
        itinerary.raw = value;
        Ok(itinerary)
    }

    /// The JSON object exactly as the model returned it.
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightOffer {
    #[serde(default, deserialize_with = "lenient::text")]
    pub airline: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub route: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub departure_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub return_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub departure_time: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub arrival_time: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub price: Option<String>,
    /// Direct, 1 stop, or 2+ stops
    #[serde(default, rename = "type", deserialize_with = "lenient::text")]
    pub stops: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub booking_tips: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HotelOffer {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub price_per_night: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub total_cost: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub star_rating: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub amenities: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub booking_tips: Option<String>,
}

/// One activity record. `day` is 1-based but kept as text since models
/// send both `1` and `"1"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default, deserialize_with = "lenient::text")]
    pub day: Option<String>,
    #[serde(default, rename = "activity", deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub estimated_cost: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub tips: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    #[serde(default, deserialize_with = "lenient::text")]
    pub flights_total: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub accommodation_total: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub activities_estimated: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub daily_food_budget: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub transportation_local: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub total_estimated: Option<String>,
}

impl CostBreakdown {
    pub fn is_empty(&self) -> bool {
        self == &CostBreakdown::default()
    }
}

/// Failure surfaced to the user in place of an itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItineraryError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

/// Outcome of one generation request.
#[derive(Debug, Clone, PartialEq)]
pub enum ItineraryResult {
    Error(ItineraryError),
    Plan(Itinerary),
}

impl ItineraryResult {
    pub fn error(message: impl Into<String>) -> Self {
        ItineraryResult::Error(ItineraryError {
            message: message.into(),
            raw_response: None,
        })
    }

    pub fn error_with_raw(message: impl Into<String>, raw_response: impl Into<String>) -> Self {
        ItineraryResult::Error(ItineraryError {
            message: message.into(),
            raw_response: Some(raw_response.into()),
        })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ItineraryResult::Error(_))
    }

    pub fn plan(&self) -> Option<&Itinerary> {
        match self {
            ItineraryResult::Plan(plan) => Some(plan),
            ItineraryResult::Error(_) => None,
        }
    }

    pub fn as_error(&self) -> Option<&ItineraryError> {
        match self {
            ItineraryResult::Error(err) => Some(err),
            ItineraryResult::Plan(_) => None,
        }
    }

    /// JSON export: the model's object for a plan, `{error, raw_response}` otherwise.
    pub fn to_json(&self) -> Value {
        match self {
            ItineraryResult::Plan(plan) if !plan.raw().is_null() => plan.raw().clone(),
            ItineraryResult::Plan(plan) => serde_json::to_value(plan).unwrap_or(Value::Null),
            ItineraryResult::Error(err) => {
                let mut payload = json!({ "error": err.message });
                if let Some(raw) = &err.raw_response {
                    payload["raw_response"] = json!(raw);
                }
                payload
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_value_reads_full_payload() {
        let value = json!({
            "user_preferences_summary": "Two travelers, five days in Paris",
            "flights": {"airline": "Air France", "price": 650, "type": "Direct"},
            "hotel": {"name": "Hotel Lutetia", "amenities": ["WiFi", "Spa"]},
            "activities": [
                {"day": 1, "activity": "Louvre", "estimated_cost": "$22"},
                "not an object",
                {"day": "2", "activity": "Seine cruise"}
            ],
            "additional_suggestions": ["Buy a Navigo pass"],
            "cost_breakdown": {"flights_total": "$1300"}
        });

        let itinerary = Itinerary::from_value(value.clone()).unwrap();
        let flight = itinerary.flight.as_ref().unwrap();
        assert_eq!(flight.airline.as_deref(), Some("Air France"));
        assert_eq!(flight.price.as_deref(), Some("650"));
        assert_eq!(flight.stops.as_deref(), Some("Direct"));
        assert_eq!(
            itinerary.hotel.as_ref().unwrap().amenities.as_deref(),
            Some("WiFi, Spa")
        );
        assert_eq!(itinerary.activities.len(), 2);
        assert_eq!(itinerary.activities[0].day.as_deref(), Some("1"));
        assert_eq!(itinerary.activities[1].name.as_deref(), Some("Seine cruise"));
        assert!(itinerary.analysis_reasoning.is_none());
        assert_eq!(itinerary.raw(), &value);
    }

    #[test]
    fn test_from_value_tolerates_wrong_shapes() {
        let itinerary = Itinerary::from_value(json!({
            "flights": "none available",
            "activities": {"day": 1},
            "additional_suggestions": "Pack an umbrella"
        }))
        .unwrap();

        assert!(itinerary.flight.is_none());
        assert!(itinerary.activities.is_empty());
        assert_eq!(itinerary.additional_suggestions, vec!["Pack an umbrella"]);
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        let err = Itinerary::from_value(json!([1, 2, 3])).unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_error_result_json_export() {
        let result = ItineraryResult::error_with_raw("Could not parse AI response", "hello");
        assert_eq!(
            result.to_json(),
            json!({"error": "Could not parse AI response", "raw_response": "hello"})
        );
        assert!(result.is_error());
        assert!(result.plan().is_none());
    }

    #[test]
    fn test_empty_cost_breakdown() {
        assert!(CostBreakdown::default().is_empty());
        let filled = CostBreakdown {
            total_estimated: Some("$3000".to_string()),
            ..CostBreakdown::default()
        };
        assert!(!filled.is_empty());
    }
}
