/// Error types for event loading and parameter checks
pub mod error;

/// Heartbeat events, instants and alerts
pub mod events;

/// Validation, grouping, sequencing and gap detection
pub mod detection;

/// Detection parameters
pub mod config;

/// Embedded demonstration dataset
pub mod sample;

// Re-export commonly used types
pub use config::DetectionConfig;
pub use detection::{
    detect_missed_heartbeats, group_events_by_service, is_valid_event, MissedHeartbeatDetector,
};
pub use error::{ConfigError, InputError};
pub use events::{Alert, HeartbeatEvent, HeartbeatTime};
