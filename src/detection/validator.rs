use crate::events::{HeartbeatEvent, HeartbeatTime, ValidatedEvent};
use serde_json::Value;

/// Check whether an event is usable for detection
///
/// An event is valid when its `service` is a non-empty string and its `timestamp`
/// is present, not falsy, and parses to an absolute instant.
///
/// # Examples
///
/// ```
/// use heartwatch::detection::is_valid_event;
/// use heartwatch::events::HeartbeatEvent;
///
/// assert!(is_valid_event(&HeartbeatEvent::new("email", "2025-08-04T10:00:00Z")));
/// assert!(!is_valid_event(&HeartbeatEvent::without_timestamp("email")));
/// ```
pub fn is_valid_event(event: &HeartbeatEvent) -> bool {
    validate_event(event).is_some()
}

/// Validate an event, returning its parsed form
///
/// Returns `None` for malformed events. The parsed instant is kept so later stages
/// never parse the timestamp again.
pub fn validate_event(event: &HeartbeatEvent) -> Option<ValidatedEvent> {
    let service = match &event.service {
        Value::String(service) if !service.is_empty() => service.clone(),
        _ => return None,
    };

    if is_falsy(&event.timestamp) {
        return None;
    }

    let time = HeartbeatTime::parse(&event.timestamp)?;

    Some(ValidatedEvent {
        service,
        time,
        event: event.clone(),
    })
}

/// Values that count as "no timestamp given"
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64().map_or(true, |n| n == 0.0 || n.is_nan()),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
