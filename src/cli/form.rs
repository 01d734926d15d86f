use std::{
    collections::BTreeSet,
    io::{BufRead, Write},
    ops::RangeInclusive,
};

use anyhow::Result;
use chrono::NaiveDate;

use crate::types::{AccommodationType, Interest, PreferenceForm};

pub const FLIGHT_BUDGET_RANGE: RangeInclusive<u32> = 100..=3000;
pub const HOTEL_BUDGET_RANGE: RangeInclusive<u32> = 50..=500;
pub const TRAVELERS_RANGE: RangeInclusive<u32> = 1..=10;

pub fn parse_date(raw: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("expected a date like 2025-06-01 ({err})"))
}

pub fn parse_accommodation(raw: &str) -> std::result::Result<AccommodationType, String> {
    if let Ok(index) = raw.trim().parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| AccommodationType::ALL.get(i).copied())
            .ok_or_else(|| format!("choose 1-{}", AccommodationType::ALL.len()));
    }
    raw.parse::<AccommodationType>().map_err(|err| err.to_string())
}

pub fn parse_interest(raw: &str) -> std::result::Result<Interest, String> {
    if let Ok(index) = raw.trim().parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| Interest::ALL.get(i).copied())
            .ok_or_else(|| format!("choose 1-{}", Interest::ALL.len()));
    }
    raw.parse::<Interest>().map_err(|err| err.to_string())
}

/// Comma-separated interests, by name or checklist number.
pub fn parse_interest_list(raw: &str) -> std::result::Result<BTreeSet<Interest>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_interest)
        .collect()
}

fn parse_in_range(raw: &str, range: &RangeInclusive<u32>) -> std::result::Result<u32, String> {
    let value: u32 = raw
        .trim()
        .parse()
        .map_err(|_| format!("expected a whole number, got `{}`", raw.trim()))?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(format!(
            "must be between {} and {}",
            range.start(),
            range.end()
        ))
    }
}

/// The date widget's constraint: the end date may not precede the start date.
pub fn check_date_order(form: &PreferenceForm) -> std::result::Result<(), String> {
    match (form.start_date, form.end_date) {
        (Some(start), Some(end)) if end < start => Err(format!(
            "end date {} is before start date {}",
            end, start
        )),
        _ => Ok(()),
    }
}

/// Line-oriented stand-in for the preferences form.
pub struct FormPrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> FormPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one line; `None` at end of input.
    fn ask(&mut self, label: &str, default: Option<&str>) -> Result<Option<String>> {
        match default {
            Some(default) if !default.is_empty() => {
                write!(self.output, "{} [{}]: ", label, default)?
            }
            _ => write!(self.output, "{}: ", label)?,
        }
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask until the answer parses. Blank keeps `current`; end of input keeps it too.
    fn ask_parsed<T: Clone>(
        &mut self,
        label: &str,
        current: Option<T>,
        shown: Option<String>,
        parse: impl Fn(&str) -> std::result::Result<T, String>,
    ) -> Result<Option<T>> {
        loop {
            let Some(answer) = self.ask(label, shown.as_deref())? else {
                return Ok(current);
            };
            if answer.is_empty() {
                return Ok(current);
            }
            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(err) => writeln!(self.output, "  {}", err)?,
            }
        }
    }

    fn ask_text(&mut self, label: &str, current: Option<String>) -> Result<Option<String>> {
        let shown = current.clone();
        self.ask_parsed(label, current, shown, |raw| Ok(raw.to_string()))
    }

    /// Walk through every field, starting from `base`.
    pub fn collect(&mut self, base: &PreferenceForm) -> Result<PreferenceForm> {
        let mut form = base.clone();

        writeln!(self.output, "Travel Preferences (press Enter to keep a value)")?;
        form.destination = self.ask_text("Destination", form.destination.take())?;
        form.origin = self.ask_text("Departure City", form.origin.take())?;

        form.start_date = self.ask_parsed(
            "Start Date (YYYY-MM-DD)",
            form.start_date,
            form.start_date.map(|d| d.to_string()),
            parse_date,
        )?;
        loop {
            form.end_date = self.ask_parsed(
                "End Date (YYYY-MM-DD)",
                form.end_date,
                form.end_date.map(|d| d.to_string()),
                parse_date,
            )?;
            match check_date_order(&form) {
                Ok(()) => break,
                Err(err) => {
                    writeln!(self.output, "  {}", err)?;
                    form.end_date = None;
                }
            }
        }

        form.flight_budget = self
            .ask_parsed(
                "Flight Budget (USD)",
                Some(form.flight_budget),
                Some(form.flight_budget.to_string()),
                |raw| parse_in_range(raw, &FLIGHT_BUDGET_RANGE),
            )?
            .unwrap_or(form.flight_budget);
        form.hotel_budget = self
            .ask_parsed(
                "Hotel Budget per night (USD)",
                Some(form.hotel_budget),
                Some(form.hotel_budget.to_string()),
                |raw| parse_in_range(raw, &HOTEL_BUDGET_RANGE),
            )?
            .unwrap_or(form.hotel_budget);
        form.travelers = self
            .ask_parsed(
                "Number of Travelers",
                Some(form.travelers),
                Some(form.travelers.to_string()),
                |raw| parse_in_range(raw, &TRAVELERS_RANGE),
            )?
            .unwrap_or(form.travelers);

        for (idx, option) in AccommodationType::ALL.iter().enumerate() {
            writeln!(self.output, "  {}. {}", idx + 1, option)?;
        }
        form.accommodation_type = self
            .ask_parsed(
                "Accommodation Type",
                Some(form.accommodation_type),
                Some(form.accommodation_type.to_string()),
                parse_accommodation,
            )?
            .unwrap_or(form.accommodation_type);

        let location = self.ask_text(
            "Preferred Location/Area",
            Some(form.location_preference.clone()).filter(|l| !l.is_empty()),
        )?;
        form.location_preference = location.unwrap_or_default();

        for (idx, option) in Interest::ALL.iter().enumerate() {
            writeln!(self.output, "  {}. {}", idx + 1, option)?;
        }
        let shown = form
            .interests
            .iter()
            .map(|i| i.label())
            .collect::<Vec<_>>()
            .join(", ");
        form.interests = self
            .ask_parsed(
                "Travel Interests (comma-separated)",
                Some(form.interests.clone()),
                Some(shown),
                parse_interest_list,
            )?
            .unwrap_or_default();

        Ok(form)
    }

    /// Yes/no question, defaulting to no.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(&format!("{} [y/N]", question), None)?;
        Ok(matches!(
            answer.as_deref().map(str::to_ascii_lowercase).as_deref(),
            Some("y") | Some("yes")
        ))
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> FormPrompter<Cursor<Vec<u8>>, Vec<u8>> {
        FormPrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_collect_full_form() {
        let input = "Paris\nNew York\n2025-06-01\n2025-06-06\n900\n175\n2\n5\nLe Marais\n1, food\n";
        let mut prompter = prompter(input);
        let form = prompter.collect(&PreferenceForm::default()).unwrap();

        assert_eq!(form.destination.as_deref(), Some("Paris"));
        assert_eq!(form.origin.as_deref(), Some("New York"));
        assert_eq!(form.start_date, NaiveDate::from_ymd_opt(2025, 6, 1));
        assert_eq!(form.end_date, NaiveDate::from_ymd_opt(2025, 6, 6));
        assert_eq!(form.flight_budget, 900);
        assert_eq!(form.hotel_budget, 175);
        assert_eq!(form.travelers, 2);
        assert_eq!(form.accommodation_type, AccommodationType::BoutiqueHotel);
        assert_eq!(form.location_preference, "Le Marais");
        assert_eq!(
            form.interests.into_iter().collect::<Vec<_>>(),
            vec![Interest::ArtMuseums, Interest::FoodDining]
        );
    }

    #[test]
    fn test_blank_answers_keep_defaults() {
        let mut prompter = prompter("\n\n\n\n\n\n\n\n\n\n");
        let form = prompter.collect(&PreferenceForm::default()).unwrap();

        assert_eq!(form, PreferenceForm::default());
        assert_eq!(form.missing_fields().len(), 3);
    }

    #[test]
    fn test_invalid_answers_are_asked_again() {
        let input = "Rome\nBoston\nsoon\n2025-09-01\n2025-08-01\n2025-09-03\n5000\n1200\n\n0\n3\n\n\n\n";
        let mut prompter = prompter(input);
        let form = prompter.collect(&PreferenceForm::default()).unwrap();

        assert_eq!(form.start_date, NaiveDate::from_ymd_opt(2025, 9, 1));
        assert_eq!(form.end_date, NaiveDate::from_ymd_opt(2025, 9, 3));
        assert_eq!(form.flight_budget, 1200);
        assert_eq!(form.travelers, 3);

        let transcript = String::from_utf8(prompter.output().clone()).unwrap();
        assert!(transcript.contains("expected a date"));
        assert!(transcript.contains("is before start date"));
        assert!(transcript.contains("must be between 100 and 3000"));
        assert!(transcript.contains("must be between 1 and 10"));
    }

    #[test]
    fn test_end_of_input_returns_partial_form() {
        let mut prompter = prompter("Tokyo\n");
        let form = prompter.collect(&PreferenceForm::default()).unwrap();

        assert_eq!(form.destination.as_deref(), Some("Tokyo"));
        assert!(form.origin.is_none());
    }

    #[test]
    fn test_confirm() {
        assert!(prompter("y\n").confirm("Plan a new trip?").unwrap());
        assert!(prompter("YES\n").confirm("Plan a new trip?").unwrap());
        assert!(!prompter("\n").confirm("Plan a new trip?").unwrap());
        assert!(!prompter("").confirm("Plan a new trip?").unwrap());
    }

    #[test]
    fn test_parse_helpers() {
        assert!(parse_date("2025-02-30").is_err());
        assert_eq!(parse_accommodation("3").unwrap(), AccommodationType::Apartment);
        assert!(parse_accommodation("9").is_err());
        assert!(parse_interest_list("art, skydiving").is_err());
        assert!(parse_interest_list("").unwrap().is_empty());
    }
}
