//! Plain-text itinerary rendering.

use crate::{
    services::prompt::interests_summary,
    types::{
        Activity, CostBreakdown, FlightOffer, HotelOffer, Itinerary, ItineraryError,
        ItineraryResult, TripPreferences,
    },
};

/// Shown for any field the model did not supply.
pub const PLACEHOLDER: &str = "N/A";

fn or_placeholder(value: &Option<String>) -> &str {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => PLACEHOLDER,
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

fn heading(lines: &mut Vec<String>, title: &str) {
    lines.push(String::new());
    lines.push(format!("--- {} ---", title));
}

/// Render a result. Errors stop rendering after the message and raw text.
pub fn render_result(result: &ItineraryResult, preferences: &TripPreferences) -> String {
    match result {
        ItineraryResult::Error(err) => render_error(err),
        ItineraryResult::Plan(plan) => render_itinerary(plan, preferences),
    }
}

pub fn render_error(err: &ItineraryError) -> String {
    let mut lines = vec![format!("Error: {}", err.message)];
    if let Some(raw) = &err.raw_response {
        lines.push(String::new());
        lines.push("Raw response:".to_string());
        lines.push(raw.clone());
    }
    lines.join("\n")
}

pub fn render_itinerary(plan: &Itinerary, preferences: &TripPreferences) -> String {
    let mut lines = render_preferences(preferences);

    lines.push(String::new());
    lines.push("=== AI Travel Recommendations ===".to_string());
    lines.push(format!(
        "Summary: {}",
        or_placeholder(&plan.user_preferences_summary)
    ));

    heading(&mut lines, "Analysis and Reasoning");
    lines.push(or_placeholder(&plan.analysis_reasoning).to_string());

    let no_flight = FlightOffer::default();
    render_flight(&mut lines, plan.flight.as_ref().unwrap_or(&no_flight));

    let no_hotel = HotelOffer::default();
    render_hotel(&mut lines, plan.hotel.as_ref().unwrap_or(&no_hotel));

    if !plan.activities.is_empty() {
        heading(&mut lines, "Daily Activities");
        for activity in &plan.activities {
            render_activity(&mut lines, activity);
        }
    }

    if !plan.additional_suggestions.is_empty() {
        heading(&mut lines, "Additional Suggestions");
        for suggestion in &plan.additional_suggestions {
            lines.push(format!("  • {}", suggestion));
        }
    }

    if let Some(costs) = plan.cost_breakdown.as_ref().filter(|c| !c.is_empty()) {
        render_costs(&mut lines, costs);
    }

    lines.join("\n")
}

fn render_preferences(preferences: &TripPreferences) -> Vec<String> {
    let mut lines = vec![
        "=== Your Travel Preferences Summary ===".to_string(),
        format!("Destination: {}", preferences.destination()),
        format!("From: {}", preferences.origin()),
        format!("Duration: {} days", preferences.duration_days()),
        format!("Flight Budget: ${}", preferences.flight_budget()),
        format!("Hotel Budget: ${}/night", preferences.hotel_budget()),
        format!("Travelers: {}", preferences.travelers()),
        format!("Accommodation: {}", preferences.accommodation_type()),
    ];

    if !preferences.location_preference().is_empty() {
        lines.push(format!("Location: {}", preferences.location_preference()));
    }
    if !preferences.interests().is_empty() {
        lines.push(format!("Interests: {}", interests_summary(preferences)));
    }

    lines
}

fn render_flight(lines: &mut Vec<String>, flight: &FlightOffer) {
    heading(lines, "Recommended Flight");
    lines.push(format!("Airline: {}", or_placeholder(&flight.airline)));
    lines.push(format!("Route: {}", or_placeholder(&flight.route)));
    lines.push(format!(
        "Dates: {} to {}",
        or_placeholder(&flight.departure_date),
        or_placeholder(&flight.return_date)
    ));
    lines.push(format!("Departure: {}", or_placeholder(&flight.departure_time)));
    lines.push(format!("Arrival: {}", or_placeholder(&flight.arrival_time)));
    lines.push(format!("Duration: {}", or_placeholder(&flight.duration)));
    lines.push(format!("Price: {}", or_placeholder(&flight.price)));
    lines.push(format!("Type: {}", or_placeholder(&flight.stops)));
    if let Some(tip) = present(&flight.booking_tips) {
        lines.push(format!("Tip: {}", tip));
    }
}

fn render_hotel(lines: &mut Vec<String>, hotel: &HotelOffer) {
    heading(lines, "Recommended Hotel");
    lines.push(format!("Name: {}", or_placeholder(&hotel.name)));
    lines.push(format!("Location: {}", or_placeholder(&hotel.location)));
    lines.push(format!("Address: {}", or_placeholder(&hotel.address)));
    lines.push(format!("Rating: {}", or_placeholder(&hotel.star_rating)));
    lines.push(format!(
        "Price/Night: {}",
        or_placeholder(&hotel.price_per_night)
    ));
    lines.push(format!("Total Cost: {}", or_placeholder(&hotel.total_cost)));
    lines.push(format!("Amenities: {}", or_placeholder(&hotel.amenities)));
    if let Some(tip) = present(&hotel.booking_tips) {
        lines.push(format!("Tip: {}", tip));
    }
}

fn render_activity(lines: &mut Vec<String>, activity: &Activity) {
    lines.push(format!(
        "Day {}: {}",
        or_placeholder(&activity.day),
        or_placeholder(&activity.name)
    ));
    lines.push(format!("  Location: {}", or_placeholder(&activity.location)));
    lines.push(format!("  {}", or_placeholder(&activity.description)));
    lines.push(format!(
        "  Duration: {} | Cost: {}",
        or_placeholder(&activity.duration),
        or_placeholder(&activity.estimated_cost)
    ));
    if let Some(tip) = present(&activity.tips) {
        lines.push(format!("  Tip: {}", tip));
    }
}

fn render_costs(lines: &mut Vec<String>, costs: &CostBreakdown) {
    heading(lines, "Cost Breakdown");
    lines.push(format!("Flights: {}", or_placeholder(&costs.flights_total)));
    lines.push(format!(
        "Hotels: {}",
        or_placeholder(&costs.accommodation_total)
    ));
    lines.push(format!(
        "Activities: {}",
        or_placeholder(&costs.activities_estimated)
    ));
    lines.push(format!(
        "Food & Transport: {}/day + {}",
        or_placeholder(&costs.daily_food_budget),
        or_placeholder(&costs.transportation_local)
    ));
    lines.push(format!(
        "Total Estimate: {}",
        or_placeholder(&costs.total_estimated)
    ));
}
