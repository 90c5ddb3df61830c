//! Embedded demonstration dataset
//!
//! Three services with interleaved, partly out-of-order heartbeats and a few
//! malformed entries. With a 60 second interval and 3 allowed misses every service
//! raises exactly one alert.

use crate::events::HeartbeatEvent;

/// Build the demonstration batch
pub fn sample_events() -> Vec<HeartbeatEvent> {
    vec![
        HeartbeatEvent::new("email", "2025-08-04T10:00:00Z"),
        HeartbeatEvent::new("email", "2025-08-04T10:01:00Z"),
        HeartbeatEvent::new("sms", "2025-08-04T10:00:00Z"),
        HeartbeatEvent::new("email", "2025-08-04T10:02:00Z"),
        HeartbeatEvent::new("push", "2025-08-04T10:00:00Z"),
        HeartbeatEvent::new("push", "2025-08-04T10:01:00Z"),
        HeartbeatEvent::new("push", "2025-08-04T10:02:00Z"),
        HeartbeatEvent::new("push", "2025-08-04T10:06:00Z"),
        HeartbeatEvent::new("email", "2025-08-04T10:06:00Z"),
        HeartbeatEvent::new("sms", "2025-08-04T10:03:00Z"),
        HeartbeatEvent::new("sms", "2025-08-04T10:02:00Z"),
        HeartbeatEvent::without_timestamp("email"),
        HeartbeatEvent::new("sms", "not-a-real-timestamp"),
        HeartbeatEvent::without_service("2025-08-04T10:04:00Z"),
        HeartbeatEvent::new("sms", "2025-08-04T10:04:00Z"),
        HeartbeatEvent::new("email", "2025-08-04T10:07:00Z"),
        HeartbeatEvent::new("email", "2025-08-04T10:10:00Z"),
        HeartbeatEvent::new("email", "2025-08-04T10:13:00Z"),
        HeartbeatEvent::new("email", "2025-08-04T10:16:00Z"),
        HeartbeatEvent::new("sms", "2025-08-04T10:06:00Z"),
        HeartbeatEvent::new("sms", "2025-08-04T10:07:00Z"),
        HeartbeatEvent::new("sms", "2025-08-04T10:08:00Z"),
        HeartbeatEvent::new("sms", "2025-08-04T10:12:00Z"),
        HeartbeatEvent::new("sms", "2025-08-04T10:16:00Z"),
        HeartbeatEvent::new("push", "2025-08-04T10:12:00Z"),
        HeartbeatEvent::new("push", "2025-08-04T10:13:00Z"),
        HeartbeatEvent::new("push", "2025-08-04T10:14:00Z"),
        HeartbeatEvent::new("push", "2025-08-04T10:20:00Z"),
        HeartbeatEvent::new("email", "2025-08-04T10:22:00Z"),
    ]
}
