use std::time::Duration;

use crate::{
    core::generator::{ItineraryGenerator, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE},
    error::{Result, TravelError},
    services::openai_client::DEFAULT_BASE_URL,
};

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_MODEL: &str = "TRIP_PLANNER_MODEL";

/// Resolved generator settings. Command-line values win over the environment.
#[derive(Clone, PartialEq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout: Option<Duration>,
    pub strict: bool,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .field("strict", &self.strict)
            .finish()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: None,
            strict: false,
        }
    }
}

/// Values supplied on the command line; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub strict: bool,
}

impl Settings {
    /// Read settings from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            api_key: non_blank(ENV_API_KEY),
            base_url: non_blank(ENV_BASE_URL).unwrap_or(defaults.base_url),
            model: non_blank(ENV_MODEL).unwrap_or(defaults.model),
            ..defaults
        }
    }

    pub fn apply(mut self, overrides: SettingsOverrides) -> Result<Self> {
        if let Some(api_key) = overrides.api_key.filter(|key| !key.trim().is_empty()) {
            self.api_key = Some(api_key);
        }
        if let Some(base_url) = overrides.base_url {
            self.base_url = base_url;
        }
        if let Some(model) = overrides.model {
            self.model = model;
        }
        if let Some(temperature) = overrides.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(TravelError::Config(format!(
                    "temperature must be between 0.0 and 2.0, got {}",
                    temperature
                )));
            }
            self.temperature = temperature;
        }
        if let Some(max_tokens) = overrides.max_tokens {
            if max_tokens == 0 {
                return Err(TravelError::Config(
                    "max tokens must be greater than zero".to_string(),
                ));
            }
            self.max_tokens = max_tokens;
        }
        if let Some(secs) = overrides.timeout_secs {
            self.timeout = Some(Duration::from_secs(secs));
        }
        self.strict = self.strict || overrides.strict;
        Ok(self)
    }

    /// Build the generator; fails only when no credential is configured.
    pub fn generator(&self) -> Result<ItineraryGenerator> {
        let api_key = self
            .api_key
            .clone()
            .ok_or(TravelError::MissingCredential)?;

        Ok(
            ItineraryGenerator::with_endpoint(api_key, self.base_url.clone(), self.timeout)
                .with_model(self.model.clone())
                .with_temperature(self.temperature)
                .with_max_tokens(Some(self.max_tokens))
                .with_strict_schema(self.strict),
        )
    }
}
