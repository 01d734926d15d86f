use std::{collections::BTreeSet, fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TravelError};

pub const DEFAULT_FLIGHT_BUDGET: u32 = 800;
pub const DEFAULT_HOTEL_BUDGET: u32 = 150;
pub const DEFAULT_TRAVELERS: u32 = 1;

/// Display names reported for missing required fields.
pub const FIELD_DESTINATION: &str = "Destination";
pub const FIELD_ORIGIN: &str = "Departure City";
pub const FIELD_DATES: &str = "Travel Dates";

/// Accommodation options offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccommodationType {
    #[default]
    Hotel,
    Hostel,
    Apartment,
    Resort,
    BoutiqueHotel,
}

impl AccommodationType {
    pub const ALL: [AccommodationType; 5] = [
        AccommodationType::Hotel,
        AccommodationType::Hostel,
        AccommodationType::Apartment,
        AccommodationType::Resort,
        AccommodationType::BoutiqueHotel,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AccommodationType::Hotel => "Hotel",
            AccommodationType::Hostel => "Hostel",
            AccommodationType::Apartment => "Apartment/Airbnb",
            AccommodationType::Resort => "Resort",
            AccommodationType::BoutiqueHotel => "Boutique Hotel",
        }
    }
}

impl fmt::Display for AccommodationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AccommodationType {
    type Err = TravelError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = normalize_choice(s);
        let parsed = match normalized.as_str() {
            "hotel" => AccommodationType::Hotel,
            "hostel" => AccommodationType::Hostel,
            "apartment" | "airbnb" | "apartmentairbnb" => AccommodationType::Apartment,
            "resort" => AccommodationType::Resort,
            "boutique" | "boutiquehotel" => AccommodationType::BoutiqueHotel,
            _ => {
                return Err(TravelError::Validation(format!(
                    "unknown accommodation type `{}` (expected one of: {})",
                    s,
                    AccommodationType::ALL.map(|a| a.label()).join(", ")
                )))
            }
        };
        Ok(parsed)
    }
}

/// Travel interests from the fixed checklist.
///
/// Declaration order is checklist order; `Ord` relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Interest {
    ArtMuseums,
    FoodDining,
    HistoricalSites,
    NatureOutdoors,
    Nightlife,
    Shopping,
    AdventureSports,
    LocalCulture,
}

impl Interest {
    pub const ALL: [Interest; 8] = [
        Interest::ArtMuseums,
        Interest::FoodDining,
        Interest::HistoricalSites,
        Interest::NatureOutdoors,
        Interest::Nightlife,
        Interest::Shopping,
        Interest::AdventureSports,
        Interest::LocalCulture,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Interest::ArtMuseums => "Art & Museums",
            Interest::FoodDining => "Food & Dining",
            Interest::HistoricalSites => "Historical Sites",
            Interest::NatureOutdoors => "Nature & Outdoors",
            Interest::Nightlife => "Nightlife & Entertainment",
            Interest::Shopping => "Shopping",
            Interest::AdventureSports => "Adventure Sports",
            Interest::LocalCulture => "Local Culture",
        }
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Interest {
    type Err = TravelError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = normalize_choice(s);
        let parsed = match normalized.as_str() {
            "art" | "museums" | "artmuseums" => Interest::ArtMuseums,
            "food" | "dining" | "fooddining" => Interest::FoodDining,
            "history" | "historical" | "historicalsites" => Interest::HistoricalSites,
            "nature" | "outdoors" | "natureoutdoors" => Interest::NatureOutdoors,
            "nightlife" | "entertainment" | "nightlifeentertainment" => Interest::Nightlife,
            "shopping" => Interest::Shopping,
            "adventure" | "adventuresports" => Interest::AdventureSports,
            "culture" | "localculture" => Interest::LocalCulture,
            _ => {
                return Err(TravelError::Validation(format!(
                    "unknown interest `{}` (expected one of: {})",
                    s,
                    Interest::ALL.map(|i| i.label()).join(", ")
                )))
            }
        };
        Ok(parsed)
    }
}

fn normalize_choice(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Raw form input. Required fields may be absent until submission.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceForm {
    pub destination: Option<String>,
    pub origin: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub travelers: u32,
    pub flight_budget: u32,
    pub hotel_budget: u32,
    pub accommodation_type: AccommodationType,
    pub location_preference: String,
    pub interests: BTreeSet<Interest>,
}

impl Default for PreferenceForm {
    fn default() -> Self {
        Self {
            destination: None,
            origin: None,
            start_date: None,
            end_date: None,
            travelers: DEFAULT_TRAVELERS,
            flight_budget: DEFAULT_FLIGHT_BUDGET,
            hotel_budget: DEFAULT_HOTEL_BUDGET,
            accommodation_type: AccommodationType::default(),
            location_preference: String::new(),
            interests: BTreeSet::new(),
        }
    }
}

impl PreferenceForm {
    /// Names of every required field that is absent or blank, in form order.
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if is_blank(self.destination.as_deref()) {
            missing.push(FIELD_DESTINATION.to_string());
        }
        if is_blank(self.origin.as_deref()) {
            missing.push(FIELD_ORIGIN.to_string());
        }
        if self.start_date.is_none() || self.end_date.is_none() {
            missing.push(FIELD_DATES.to_string());
        }
        missing
    }

    /// Build the immutable preference record, reporting all missing fields at once.
    pub fn validate(&self) -> Result<TripPreferences> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(TravelError::MissingFields(missing));
        }

        match (
            self.destination.as_deref(),
            self.origin.as_deref(),
            self.start_date,
            self.end_date,
        ) {
            (Some(destination), Some(origin), Some(start_date), Some(end_date)) => {
                Ok(TripPreferences {
                    destination: destination.trim().to_string(),
                    origin: origin.trim().to_string(),
                    start_date,
                    end_date,
                    travelers: self.travelers,
                    flight_budget: self.flight_budget,
                    hotel_budget: self.hotel_budget,
                    accommodation_type: self.accommodation_type,
                    location_preference: self.location_preference.trim().to_string(),
                    interests: self.interests.iter().copied().collect(),
                })
            }
            _ => Err(TravelError::MissingFields(self.missing_fields())),
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map(|v| v.trim().is_empty()).unwrap_or(true)
}

/// Validated trip parameters for one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripPreferences {
    destination: String,
    origin: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    travelers: u32,
    flight_budget: u32,
    hotel_budget: u32,
    accommodation_type: AccommodationType,
    location_preference: String,
    interests: Vec<Interest>,
}

impl TripPreferences {
    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Whole days between start and end, clamped at zero.
    pub fn duration_days(&self) -> u32 {
        let days = (self.end_date - self.start_date).num_days();
        u32::try_from(days.max(0)).unwrap_or(u32::MAX)
    }

    pub fn travelers(&self) -> u32 {
        self.travelers
    }

    pub fn flight_budget(&self) -> u32 {
        self.flight_budget
    }

    pub fn hotel_budget(&self) -> u32 {
        self.hotel_budget
    }

    pub fn accommodation_type(&self) -> AccommodationType {
        self.accommodation_type
    }

    /// Free-text area preference; empty when the user left it blank.
    pub fn location_preference(&self) -> &str {
        &self.location_preference
    }

    pub fn interests(&self) -> &[Interest] {
        &self.interests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn complete_form() -> PreferenceForm {
        PreferenceForm {
            destination: Some("Paris".to_string()),
            origin: Some("New York".to_string()),
            start_date: Some(date(2025, 6, 1)),
            end_date: Some(date(2025, 6, 6)),
            travelers: 2,
            ..PreferenceForm::default()
        }
    }

    #[test]
    fn test_validate_complete_form() {
        let prefs = complete_form().validate().unwrap();
        assert_eq!(prefs.destination(), "Paris");
        assert_eq!(prefs.origin(), "New York");
        assert_eq!(prefs.duration_days(), 5);
        assert_eq!(prefs.travelers(), 2);
        assert_eq!(prefs.flight_budget(), DEFAULT_FLIGHT_BUDGET);
        assert_eq!(prefs.hotel_budget(), DEFAULT_HOTEL_BUDGET);
    }

    #[test]
    fn test_validate_reports_all_missing_fields() {
        let err = PreferenceForm::default().validate().unwrap_err();
        match err {
            TravelError::MissingFields(fields) => {
                assert_eq!(fields, vec![FIELD_DESTINATION, FIELD_ORIGIN, FIELD_DATES]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_blank_strings_count_as_missing() {
        let mut form = complete_form();
        form.origin = Some("   ".to_string());
        form.end_date = None;

        assert_eq!(form.missing_fields(), vec![FIELD_ORIGIN, FIELD_DATES]);
    }

    #[test]
    fn test_same_day_trip_has_zero_duration() {
        let mut form = complete_form();
        form.end_date = form.start_date;
        assert_eq!(form.validate().unwrap().duration_days(), 0);
    }

    #[test]
    fn test_reversed_dates_clamp_to_zero() {
        let mut form = complete_form();
        form.start_date = Some(date(2025, 6, 10));
        assert_eq!(form.validate().unwrap().duration_days(), 0);
    }

    #[test]
    fn test_interests_keep_checklist_order() {
        let mut form = complete_form();
        form.interests.insert(Interest::LocalCulture);
        form.interests.insert(Interest::ArtMuseums);
        form.interests.insert(Interest::LocalCulture);

        let prefs = form.validate().unwrap();
        assert_eq!(
            prefs.interests(),
            &[Interest::ArtMuseums, Interest::LocalCulture]
        );
    }

    #[test]
    fn test_parse_choices() {
        assert_eq!(
            "Apartment/Airbnb".parse::<AccommodationType>().unwrap(),
            AccommodationType::Apartment
        );
        assert_eq!(
            "boutique-hotel".parse::<AccommodationType>().unwrap(),
            AccommodationType::BoutiqueHotel
        );
        assert_eq!(
            "Food & Dining".parse::<Interest>().unwrap(),
            Interest::FoodDining
        );
        assert_eq!("culture".parse::<Interest>().unwrap(), Interest::LocalCulture);
        assert!("skydiving".parse::<Interest>().is_err());
    }
}
