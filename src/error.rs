use thiserror::Error;

/// Main error type for the trip planner
#[derive(Error, Debug)]
pub enum TravelError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("An API key is required. Set OPENAI_API_KEY or pass --api-key")]
    MissingCredential,

    #[error("Please fill in the following required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("The model returned an empty response")]
    EmptyResponse,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TravelError>;

impl TravelError {
    /// Errors raised before any request is sent to the model.
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            TravelError::MissingCredential | TravelError::MissingFields(_)
        )
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            TravelError::Config(_) => "CONFIG_ERROR",
            TravelError::MissingCredential => "MISSING_CREDENTIAL",
            TravelError::MissingFields(_) => "MISSING_FIELDS",
            TravelError::Http(_) => "HTTP_ERROR",
            TravelError::Api { .. } => "API_ERROR",
            TravelError::Serialization(_) => "SERIALIZATION_ERROR",
            TravelError::Validation(_) => "VALIDATION_ERROR",
            TravelError::Timeout(_) => "TIMEOUT_ERROR",
            TravelError::EmptyResponse => "EMPTY_RESPONSE",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        let mut payload = serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        });

        if let TravelError::MissingFields(fields) = self {
            payload["error"]["fields"] = serde_json::json!(fields);
        }

        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_message_lists_every_field() {
        let err = TravelError::MissingFields(vec![
            "Destination".to_string(),
            "Travel Dates".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Please fill in the following required fields: Destination, Travel Dates"
        );
        assert!(err.is_blocking());

        let payload = err.to_error_payload();
        assert_eq!(payload["error"]["code"], "MISSING_FIELDS");
        assert_eq!(payload["error"]["fields"][1], "Travel Dates");
    }

    #[test]
    fn api_errors_are_not_blocking() {
        let err = TravelError::Api {
            status: 401,
            message: "Invalid API key".to_string(),
        };
        assert!(!err.is_blocking());
        assert_eq!(err.error_code(), "API_ERROR");
        assert!(err.to_string().contains("Invalid API key"));
    }
}
