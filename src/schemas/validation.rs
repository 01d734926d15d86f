use jsonschema::{Draft, JSONSchema};
use serde_json::{json, Value};

use crate::error::TravelError;

const MAX_SCHEMA_ERRORS: usize = 3;

fn text_field() -> Value {
    json!({ "type": ["string", "number"] })
}

fn object_with(fields: &[&str]) -> Value {
    let properties: serde_json::Map<String, Value> = fields
        .iter()
        .map(|field| (field.to_string(), text_field()))
        .collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": fields,
    })
}

/// Draft 7 schema for the itinerary reply, used only in strict mode.
pub fn itinerary_response_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "Itinerary",
        "type": "object",
        "properties": {
            "user_preferences_summary": { "type": "string" },
            "analysis_reasoning": { "type": "string" },
            "flights": object_with(&[
                "airline",
                "route",
                "departure_date",
                "return_date",
                "departure_time",
                "arrival_time",
                "price",
                "type",
                "duration",
                "booking_tips",
            ]),
            "hotel": object_with(&[
                "name",
                "location",
                "address",
                "price_per_night",
                "total_cost",
                "star_rating",
                "amenities",
                "booking_tips",
            ]),
            "activities": {
                "type": "array",
                "items": object_with(&[
                    "day",
                    "activity",
                    "description",
                    "location",
                    "estimated_cost",
                    "duration",
                    "tips",
                ]),
            },
            "additional_suggestions": {
                "type": "array",
                "items": { "type": "string" },
            },
            "cost_breakdown": object_with(&[
                "flights_total",
                "accommodation_total",
                "activities_estimated",
                "daily_food_budget",
                "transportation_local",
                "total_estimated",
            ]),
        },
        "required": [
            "user_preferences_summary",
            "analysis_reasoning",
            "flights",
            "hotel",
            "activities",
            "additional_suggestions",
            "cost_breakdown",
        ],
    })
}

/// Validate an extracted reply against [`itinerary_response_schema`].
pub fn validate_itinerary_payload(payload: &Value) -> Result<(), TravelError> {
    let schema = itinerary_response_schema();
    let validator = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&schema)
        .map_err(|err| {
            TravelError::Validation(format!(
                "Failed to prepare itinerary schema for validation: {}",
                err
            ))
        })?;

    if let Err(errors) = validator.validate(payload) {
        let mut details = Vec::new();
        let mut truncated = false;

        for (idx, error) in errors.enumerate() {
            if idx < MAX_SCHEMA_ERRORS {
                let mut path = error.instance_path.to_string();
                if path.is_empty() {
                    path = "<root>".to_string();
                }
                details.push(format!("{}: {}", path, error));
            } else {
                truncated = true;
                break;
            }
        }

        let mut detail_str = if details.is_empty() {
            "reply failed schema validation".to_string()
        } else {
            details.join("; ")
        };

        if truncated {
            detail_str.push_str("; additional errors truncated");
        }

        return Err(TravelError::Validation(format!(
            "Reply does not match the itinerary schema: {}",
            detail_str
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_payload() -> Value {
        json!({
            "user_preferences_summary": "summary",
            "analysis_reasoning": "reasoning",
            "flights": {
                "airline": "Delta", "route": "JFK to CDG", "departure_date": "2025-06-01",
                "return_date": "2025-06-06", "departure_time": "18:00", "arrival_time": "07:30",
                "price": 650, "type": "Direct", "duration": "7h30m", "booking_tips": "Book early"
            },
            "hotel": {
                "name": "Hotel", "location": "Marais", "address": "Rue", "price_per_night": "$140",
                "total_cost": "$700", "star_rating": "4", "amenities": "WiFi", "booking_tips": "Direct"
            },
            "activities": [],
            "additional_suggestions": ["Walk"],
            "cost_breakdown": {
                "flights_total": "$1300", "accommodation_total": "$700",
                "activities_estimated": "$200", "daily_food_budget": "$60",
                "transportation_local": "$50", "total_estimated": "$2550"
            }
        })
    }

    #[test]
    fn test_complete_payload_passes() {
        validate_itinerary_payload(&complete_payload()).unwrap();
    }

    #[test]
    fn test_missing_key_is_reported() {
        let mut payload = complete_payload();
        payload.as_object_mut().unwrap().remove("hotel");

        let err = validate_itinerary_payload(&payload).unwrap_err();
        assert!(err.to_string().contains("hotel"));
    }

    #[test]
    fn test_wrong_shape_reports_path() {
        let mut payload = complete_payload();
        payload["activities"] = json!("visit the Louvre");

        let err = validate_itinerary_payload(&payload).unwrap_err();
        assert!(err.to_string().contains("/activities"));
    }
}
