use crate::types::TripPreferences;

/// System role sent with every itinerary request.
pub const SYSTEM_PROMPT: &str = "You are a professional travel advisor with deep expertise in global travel, current pricing, and destination-specific recommendations. Provide accurate, helpful, and budget-conscious advice.";

const DEFAULT_INTERESTS: &str = "general sightseeing";
const DEFAULT_LOCATION: &str = "city center";

/// Comma-separated interest labels, or the sightseeing fallback.
pub fn interests_summary(preferences: &TripPreferences) -> String {
    if preferences.interests().is_empty() {
        DEFAULT_INTERESTS.to_string()
    } else {
        preferences
            .interests()
            .iter()
            .map(|interest| interest.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Build the user message: every preference plus the JSON shape the reply must follow.
pub fn build_itinerary_prompt(preferences: &TripPreferences) -> String {
    let destination = preferences.destination();
    let origin = preferences.origin();
    let start_date = preferences.start_date().format("%Y-%m-%d");
    let end_date = preferences.end_date().format("%Y-%m-%d");
    let duration = preferences.duration_days();
    let location = if preferences.location_preference().is_empty() {
        DEFAULT_LOCATION
    } else {
        preferences.location_preference()
    };

    format!(
        r#"You are a professional travel assistant with extensive knowledge of global destinations, flight routes, hotels, and local attractions. Create a detailed and realistic travel itinerary based on these preferences:

**Trip Details:**
- Destination: {destination}
- Origin: {origin}
- Duration: {duration} days
- Dates: {start_date} to {end_date}
- Travelers: {travelers}

**Budget & Accommodation:**
- Flight budget: ${flight_budget} total
- Hotel budget: ${hotel_budget} per night
- Accommodation type: {accommodation}
- Location preference: {location}

**Interests & Activities:**
- Primary interests: {interests}

**IMPORTANT INSTRUCTIONS:**
1. Provide realistic and current pricing for the travel dates
2. Suggest actual airlines that operate on this route
3. Recommend real hotels/accommodations with accurate location info
4. Create day-by-day activities that match the traveler's interests
5. Stay within the specified budgets
6. Include practical tips and money-saving advice

Please provide recommendations in this exact JSON format:
{{
    "user_preferences_summary": "Concise summary of key user requirements and constraints",
    "analysis_reasoning": "Detailed 3-4 sentence explanation of your recommendation strategy and how it meets the traveler's needs and budget",
    "flights": {{
        "airline": "Specific airline name",
        "route": "{origin} to {destination}",
        "departure_date": "{start_date}",
        "return_date": "{end_date}",
        "departure_time": "Realistic departure time",
        "arrival_time": "Realistic arrival time",
        "price": "Realistic price in USD format (e.g., $650)",
        "type": "Direct, 1 stop, or 2+ stops",
        "duration": "Total travel time",
        "booking_tips": "Specific actionable booking advice"
    }},
    "hotel": {{
        "name": "Specific hotel name or type of accommodation",
        "location": "Specific area/district in {destination}",
        "address": "General area description",
        "price_per_night": "Price in USD format (e.g., $120)",
        "total_cost": "Total cost for {duration} nights",
        "star_rating": "Hotel star rating or quality level",
        "amenities": "Key amenities (WiFi, breakfast, gym, etc.)",
        "booking_tips": "Best booking platforms or timing advice"
    }},
    "activities": [
        {{
            "day": 1,
            "activity": "Specific activity name",
            "description": "Detailed description of the activity",
            "location": "Where in the city",
            "estimated_cost": "Cost estimate per person",
            "duration": "How long to spend",
            "tips": "Insider tips and recommendations"
        }},
        {{
            "day": 2,
            "activity": "Different activity for day 2",
            "description": "Detailed description",
            "location": "Location details",
            "estimated_cost": "Cost estimate",
            "duration": "Time needed",
            "tips": "Helpful advice"
        }}
    ],
    "additional_suggestions": [
        "Money-saving tip with specific actionable advice",
        "Transportation recommendation with costs",
        "Local dining suggestion with price ranges",
        "Weather/packing advice for the dates",
        "Cultural etiquette or local customs tip",
        "Emergency contact or safety advice"
    ],
    "cost_breakdown": {{
        "flights_total": "Total flight cost in USD (multiply by number of travelers)",
        "accommodation_total": "Total hotel cost for all nights",
        "activities_estimated": "Total estimated activity costs",
        "daily_food_budget": "Suggested daily food budget per person",
        "transportation_local": "Local transportation estimate",
        "total_estimated": "Grand total trip estimate"
    }}
}}

Ensure all recommendations are:
- Realistic and achievable within the specified budget
- Tailored to the traveler's specific interests
- Built on actual places, realistic prices, and actionable advice
- Appropriate for the travel dates and season
"#,
        travelers = preferences.travelers(),
        flight_budget = preferences.flight_budget(),
        hotel_budget = preferences.hotel_budget(),
        accommodation = preferences.accommodation_type(),
        interests = interests_summary(preferences),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccommodationType, Interest, PreferenceForm};
    use chrono::NaiveDate;

    fn paris_trip() -> PreferenceForm {
        PreferenceForm {
            destination: Some("Paris".to_string()),
            origin: Some("New York".to_string()),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 6),
            travelers: 2,
            ..PreferenceForm::default()
        }
    }

    #[test]
    fn test_prompt_embeds_preferences() {
        let mut form = paris_trip();
        form.accommodation_type = AccommodationType::BoutiqueHotel;
        form.location_preference = "Le Marais".to_string();
        form.interests.insert(Interest::FoodDining);
        form.interests.insert(Interest::ArtMuseums);
        let prompt = build_itinerary_prompt(&form.validate().unwrap());

        assert!(prompt.contains("- Destination: Paris"));
        assert!(prompt.contains("- Origin: New York"));
        assert!(prompt.contains("- Duration: 5 days"));
        assert!(prompt.contains("- Dates: 2025-06-01 to 2025-06-06"));
        assert!(prompt.contains("- Travelers: 2"));
        assert!(prompt.contains("- Flight budget: $800 total"));
        assert!(prompt.contains("- Hotel budget: $150 per night"));
        assert!(prompt.contains("- Accommodation type: Boutique Hotel"));
        assert!(prompt.contains("- Location preference: Le Marais"));
        assert!(prompt.contains("- Primary interests: Art & Museums, Food & Dining"));
        assert!(prompt.contains(r#""route": "New York to Paris""#));
        assert!(prompt.contains(r#""total_cost": "Total cost for 5 nights""#));
    }

    #[test]
    fn test_prompt_defaults() {
        let prompt = build_itinerary_prompt(&paris_trip().validate().unwrap());

        assert!(prompt.contains("- Location preference: city center"));
        assert!(prompt.contains("- Primary interests: general sightseeing"));
    }

    #[test]
    fn test_prompt_schema_names_every_top_level_key() {
        let prompt = build_itinerary_prompt(&paris_trip().validate().unwrap());
        for key in [
            "user_preferences_summary",
            "analysis_reasoning",
            "flights",
            "hotel",
            "activities",
            "additional_suggestions",
            "cost_breakdown",
        ] {
            assert!(prompt.contains(&format!("\"{key}\"")), "missing {key}");
        }
    }
}
