use thiserror::Error;

/// Errors that can occur while loading heartbeat events for a run
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read events: {0}")]
    ReadError(String),

    #[error("Failed to parse events: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Errors reported when checking detection parameters
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_display() {
        let err = InputError::ReadError("events.json".to_string());
        assert_eq!(err.to_string(), "Failed to read events: events.json");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: InputError = json_err.into();
        assert!(matches!(err, InputError::JsonError(_)));
        assert!(err.to_string().starts_with("JSON error:"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::ValidationError("allowed_misses is negative".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration value: allowed_misses is negative"
        );
    }
}
