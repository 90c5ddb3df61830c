use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Timing parameters for missed-heartbeat detection
///
/// Values are taken as given. `validate` only reports suspicious settings; detection
/// applies the arithmetic unchanged whatever the values are.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Nominal seconds between consecutive heartbeats of a service
    pub expected_interval_seconds: f64,
    /// Consecutive heartbeats a service may skip before an alert is raised
    pub allowed_misses: i64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        // One heartbeat a minute, three misses tolerated
        Self::new(60.0, 3)
    }
}

impl DetectionConfig {
    pub fn new(expected_interval_seconds: f64, allowed_misses: i64) -> Self {
        Self {
            expected_interval_seconds,
            allowed_misses,
        }
    }

    /// Largest gap, in seconds, tolerated between consecutive heartbeats
    ///
    /// `expected_interval_seconds * (allowed_misses + 1)`. A gap equal to this
    /// value already raises an alert.
    pub fn threshold_seconds(&self) -> f64 {
        self.expected_interval_seconds * (self.allowed_misses as f64 + 1.0)
    }

    /// Check the parameters for values that make detection degenerate
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if the interval is not a positive
    /// finite number or if `allowed_misses` is negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.expected_interval_seconds.is_finite() || self.expected_interval_seconds <= 0.0
        {
            return Err(ConfigError::ValidationError(format!(
                "expected_interval_seconds must be a positive number, got {}",
                self.expected_interval_seconds
            )));
        }

        if self.allowed_misses < 0 {
            return Err(ConfigError::ValidationError(format!(
                "allowed_misses must not be negative, got {}",
                self.allowed_misses
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DetectionConfig::default();
        assert_eq!(config.expected_interval_seconds, 60.0);
        assert_eq!(config.allowed_misses, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_threshold_seconds() {
        assert_eq!(DetectionConfig::new(60.0, 3).threshold_seconds(), 240.0);
        assert_eq!(DetectionConfig::new(60.0, 0).threshold_seconds(), 60.0);
        assert_eq!(DetectionConfig::new(0.0, 5).threshold_seconds(), 0.0);
        assert_eq!(DetectionConfig::new(2.5, 1).threshold_seconds(), 5.0);
    }

    #[test]
    fn test_threshold_with_negative_misses() {
        assert_eq!(DetectionConfig::new(60.0, -1).threshold_seconds(), 0.0);
        assert_eq!(DetectionConfig::new(60.0, -3).threshold_seconds(), -120.0);
    }

    #[test]
    fn test_threshold_does_not_overflow() {
        let config = DetectionConfig::new(1.0, i64::MAX);
        assert!(config.threshold_seconds() > 9.0e18);
    }

    #[test]
    fn test_validate_rejects_non_positive_interval() {
        assert!(DetectionConfig::new(0.0, 3).validate().is_err());
        assert!(DetectionConfig::new(-60.0, 3).validate().is_err());
        assert!(DetectionConfig::new(f64::NAN, 3).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_misses() {
        let err = DetectionConfig::new(60.0, -1).validate().unwrap_err();
        assert!(err.to_string().contains("allowed_misses"));
    }

    #[test]
    fn test_config_serialization() {
        let config = DetectionConfig::new(30.0, 2);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"expected_interval_seconds":30.0,"allowed_misses":2}"#);
        let back: DetectionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
