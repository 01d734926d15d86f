pub mod form;

use std::io::{self, Write};

use anyhow::{bail, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use chrono::NaiveDate;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::{
    config::{Settings, SettingsOverrides},
    core::{ItineraryGenerator, TripSession},
    types::{AccommodationType, Interest, ItineraryResult, PreferenceForm},
};
use form::{
    check_date_order, parse_accommodation, parse_date, parse_interest, FormPrompter,
    FLIGHT_BUDGET_RANGE, HOTEL_BUDGET_RANGE, TRAVELERS_RANGE,
};

pub fn command() -> Command {
    Command::new("trip-planner")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Plan a trip: flights, hotel, and day-by-day activities from an LLM")
        .arg(
            Arg::new("destination")
                .short('d')
                .long("destination")
                .value_name("CITY")
                .help("Where you are going (e.g. Paris)"),
        )
        .arg(
            Arg::new("origin")
                .short('o')
                .long("origin")
                .value_name("CITY")
                .help("Departure city (e.g. New York)"),
        )
        .arg(
            Arg::new("start-date")
                .short('s')
                .long("start-date")
                .value_name("YYYY-MM-DD")
                .value_parser(parse_date),
        )
        .arg(
            Arg::new("end-date")
                .short('e')
                .long("end-date")
                .value_name("YYYY-MM-DD")
                .value_parser(parse_date),
        )
        .arg(
            Arg::new("travelers")
                .short('n')
                .long("travelers")
                .value_name("COUNT")
                .value_parser(
                    value_parser!(u32)
                        .range(*TRAVELERS_RANGE.start() as i64..=*TRAVELERS_RANGE.end() as i64),
                ),
        )
        .arg(
            Arg::new("flight-budget")
                .long("flight-budget")
                .value_name("USD")
                .help("Total flight budget")
                .value_parser(value_parser!(u32).range(
                    *FLIGHT_BUDGET_RANGE.start() as i64..=*FLIGHT_BUDGET_RANGE.end() as i64,
                )),
        )
        .arg(
            Arg::new("hotel-budget")
                .long("hotel-budget")
                .value_name("USD")
                .help("Hotel budget per night")
                .value_parser(value_parser!(u32).range(
                    *HOTEL_BUDGET_RANGE.start() as i64..=*HOTEL_BUDGET_RANGE.end() as i64,
                )),
        )
        .arg(
            Arg::new("accommodation")
                .short('a')
                .long("accommodation")
                .value_name("TYPE")
                .help("Hotel, Hostel, Apartment/Airbnb, Resort, or Boutique Hotel")
                .value_parser(parse_accommodation),
        )
        .arg(
            Arg::new("location")
                .short('l')
                .long("location")
                .value_name("AREA")
                .help("Preferred area, e.g. near city center"),
        )
        .arg(
            Arg::new("interest")
                .short('i')
                .long("interest")
                .value_name("INTEREST")
                .help("Travel interest; repeat for several (art, food, history, nature, nightlife, shopping, adventure, culture)")
                .action(ArgAction::Append)
                .value_parser(parse_interest),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("Chat model to use (or set TRIP_PLANNER_MODEL)"),
        )
        .arg(
            Arg::new("temperature")
                .long("temperature")
                .value_name("FLOAT")
                .help("Sampling temperature, 0.0-2.0")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("max-tokens")
                .long("max-tokens")
                .value_name("COUNT")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .help("OpenAI API key (or set OPENAI_API_KEY env var)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help("OpenAI-compatible base URL (or set OPENAI_BASE_URL)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .help("Request timeout in seconds (no timeout by default)")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Reject replies missing any expected itinerary field")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the itinerary as JSON instead of text")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("interactive")
                .short('I')
                .long("interactive")
                .help("Fill in the form interactively and plan several trips")
                .action(ArgAction::SetTrue),
        )
}

/// Form values given as flags.
pub fn form_from_matches(matches: &ArgMatches) -> PreferenceForm {
    let defaults = PreferenceForm::default();
    PreferenceForm {
        destination: matches.get_one::<String>("destination").cloned(),
        origin: matches.get_one::<String>("origin").cloned(),
        start_date: matches.get_one::<NaiveDate>("start-date").copied(),
        end_date: matches.get_one::<NaiveDate>("end-date").copied(),
        travelers: matches
            .get_one::<u32>("travelers")
            .copied()
            .unwrap_or(defaults.travelers),
        flight_budget: matches
            .get_one::<u32>("flight-budget")
            .copied()
            .unwrap_or(defaults.flight_budget),
        hotel_budget: matches
            .get_one::<u32>("hotel-budget")
            .copied()
            .unwrap_or(defaults.hotel_budget),
        accommodation_type: matches
            .get_one::<AccommodationType>("accommodation")
            .copied()
            .unwrap_or(defaults.accommodation_type),
        location_preference: matches
            .get_one::<String>("location")
            .cloned()
            .unwrap_or_default(),
        interests: matches
            .get_many::<Interest>("interest")
            .map(|values| values.copied().collect())
            .unwrap_or_default(),
    }
}

pub fn overrides_from_matches(matches: &ArgMatches) -> SettingsOverrides {
    SettingsOverrides {
        api_key: matches.get_one::<String>("api-key").cloned(),
        base_url: matches.get_one::<String>("base-url").cloned(),
        model: matches.get_one::<String>("model").cloned(),
        temperature: matches.get_one::<f64>("temperature").copied(),
        max_tokens: matches.get_one::<u32>("max-tokens").copied(),
        timeout_secs: matches.get_one::<u64>("timeout").copied(),
        strict: matches.get_flag("strict"),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_result(
    session: &TripSession,
    result: &ItineraryResult,
    as_json: bool,
) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    if as_json {
        writeln!(
            stdout,
            "{}",
            serde_json::to_string_pretty(&result.to_json())?
        )?;
    } else if let Some(text) = session.render() {
        writeln!(stdout, "{}", text)?;
    }
    Ok(())
}

async fn plan_once(
    session: &mut TripSession,
    form: &PreferenceForm,
    settings: &Settings,
    generator: &ItineraryGenerator,
    as_json: bool,
) -> anyhow::Result<bool> {
    let result = session
        .submit(form, settings.api_key.as_deref(), generator)
        .await?
        .clone();
    print_result(session, &result, as_json)?;
    Ok(!result.is_error())
}

/// CLI entry point for the trip-planner tool
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    init_tracing();

    let matches = command().get_matches();
    let settings = Settings::from_env().apply(overrides_from_matches(&matches))?;
    let as_json = matches.get_flag("json");
    let base_form = form_from_matches(&matches);

    if let Err(err) = check_date_order(&base_form) {
        bail!("Invalid travel dates: {}", err);
    }

    let generator = match settings.generator() {
        Ok(generator) => generator,
        Err(err) => {
            error!("{}", err);
            return Err(err.into());
        }
    };

    info!("Using model: {}", settings.model);
    info!("Base URL: {}", settings.base_url);

    let mut session = TripSession::new();

    if !matches.get_flag("interactive") {
        let succeeded = plan_once(&mut session, &base_form, &settings, &generator, as_json).await?;
        if !succeeded {
            bail!("no itinerary was generated");
        }
        return Ok(());
    }

    let stdin = io::stdin();
    let mut prompter = FormPrompter::new(stdin.lock(), io::stdout());
    let mut form = base_form;

    loop {
        form = prompter
            .collect(&form)
            .context("failed to read travel preferences")?;

        match plan_once(&mut session, &form, &settings, &generator, as_json).await {
            Ok(_) => {}
            Err(err) => writeln!(prompter.output(), "Error: {}", err)?,
        }

        if !prompter.confirm("Plan a new trip?")? {
            break;
        }
        session.reset();
        form = PreferenceForm::default();
    }

    Ok(())
}
