//! Missed-heartbeat detection pipeline
//!
//! Raw events flow strictly forward through four stages: validation, grouping by
//! service, chronological sequencing and gap detection.

/// Event validation
pub mod validator;

/// Partitioning of events by service
pub mod grouper;

/// Chronological ordering of a service's events
pub mod sequencer;

/// Gap scanning and alert emission
pub mod gap_detector;

pub use gap_detector::{detect_missed_heartbeats, first_missed_heartbeat, MissedHeartbeatDetector};
pub use grouper::{group_by_service, group_events_by_service, ServiceGroups, ServiceKey};
pub use sequencer::sort_chronologically;
pub use validator::{is_valid_event, validate_event};
