//! Missed-heartbeat detection
//!
//! This module scans each service's chronologically ordered heartbeats for the first
//! gap that reaches the tolerance threshold and reports at most one alert per service.

use crate::config::DetectionConfig;
use crate::detection::{group_by_service, sort_chronologically, validate_event};
use crate::events::{Alert, HeartbeatEvent, ValidatedEvent};
use log::{debug, info, warn};

/// Detector for services that stopped sending heartbeats
///
/// Detection is a pure function of the input batch. Malformed events are dropped
/// silently and never fail the batch.
#[derive(Debug, Clone, Default)]
pub struct MissedHeartbeatDetector {
    config: DetectionConfig,
}

impl MissedHeartbeatDetector {
    /// Create a detector with the given timing parameters
    ///
    /// # Examples
    ///
    /// ```
    /// use heartwatch::config::DetectionConfig;
    /// use heartwatch::detection::MissedHeartbeatDetector;
    /// use heartwatch::events::HeartbeatEvent;
    ///
    /// let detector = MissedHeartbeatDetector::new(DetectionConfig::new(60.0, 3));
    /// let alerts = detector.detect(&[
    ///     HeartbeatEvent::new("email", "2025-08-04T10:02:00Z"),
    ///     HeartbeatEvent::new("email", "2025-08-04T10:06:00Z"),
    /// ]);
    ///
    /// assert_eq!(alerts.len(), 1);
    /// assert_eq!(alerts[0].alert_at.to_iso_string(), "2025-08-04T10:03:00.000Z");
    /// ```
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Run detection over a batch of events
    ///
    /// # Returns
    ///
    /// One alert per service whose heartbeats had a gap of at least the threshold,
    /// in the order services first appear in `events`
    pub fn detect(&self, events: &[HeartbeatEvent]) -> Vec<Alert> {
        let valid: Vec<ValidatedEvent> = events
            .iter()
            .filter_map(|event| {
                let validated = validate_event(event);
                if validated.is_none() {
                    debug!("Discarding malformed heartbeat event: {:?}", event);
                }
                validated
            })
            .collect();
        let discarded = events.len() - valid.len();

        let groups = group_by_service(valid);
        let service_count = groups.len();

        let mut alerts = Vec::new();
        for (service, mut sequence) in groups {
            sort_chronologically(&mut sequence);
            if let Some(alert) = first_missed_heartbeat(&service, &sequence, &self.config) {
                alerts.push(alert);
            }
        }

        info!(
            "Checked {} services ({} events, {} discarded): {} alerts",
            service_count,
            events.len(),
            discarded,
            alerts.len()
        );

        alerts
    }
}

/// Find the first missed heartbeat in one service's sorted sequence
///
/// Consecutive heartbeats are compared in whole seconds. The first gap that is at
/// least `config.threshold_seconds()` yields an alert anchored one expected interval
/// after the earlier heartbeat; later gaps are not examined.
///
/// Returns `None` when no gap reaches the threshold, when there are fewer than two
/// events, or when the alert instant would not be representable.
pub fn first_missed_heartbeat(
    service: &str,
    sorted: &[ValidatedEvent],
    config: &DetectionConfig,
) -> Option<Alert> {
    let threshold = config.threshold_seconds();

    let (previous, gap) = sorted.windows(2).find_map(|pair| {
        let gap = pair[1].time.whole_seconds_since(&pair[0].time);
        (gap as f64 >= threshold).then_some((&pair[0], gap))
    })?;

    match previous.time.plus_seconds(config.expected_interval_seconds) {
        Some(alert_at) => {
            debug!(
                "Service '{}' missed heartbeats: {}s gap after {} (threshold {}s)",
                service, gap, previous.time, threshold
            );
            Some(Alert {
                service: service.to_string(),
                alert_at,
            })
        }
        None => {
            warn!(
                "Service '{}' missed heartbeats after {}, but the alert time is out of range",
                service, previous.time
            );
            None
        }
    }
}

/// Detect missed heartbeats across all services in a batch
///
/// The tolerated gap is `expected_interval_seconds * (allowed_misses + 1)`.
/// Parameters are not validated; zero or negative values apply as-is.
pub fn detect_missed_heartbeats(
    events: &[HeartbeatEvent],
    expected_interval_seconds: f64,
    allowed_misses: i64,
) -> Vec<Alert> {
    MissedHeartbeatDetector::new(DetectionConfig::new(
        expected_interval_seconds,
        allowed_misses,
    ))
    .detect(events)
}


// Property-based tests
#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::events::HeartbeatTime;
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;

    const SERVICES: [&str; 3] = ["email", "sms", "push"];

    /// Heartbeats for a few services at minute offsets, with some malformed events
    #[derive(Debug, Clone)]
    struct HeartbeatBatch(Vec<HeartbeatEvent>);

    impl Arbitrary for HeartbeatBatch {
        fn arbitrary(g: &mut Gen) -> Self {
            let base = 1_754_301_600_000_i64;
            let size = usize::arbitrary(g) % 60;
            let events = (0..size)
                .map(|_| {
                    let service = *g.choose(&SERVICES).unwrap();
                    if u8::arbitrary(g) % 10 == 0 {
                        return HeartbeatEvent::new(service, "not-a-real-timestamp");
                    }
                    let minutes = (u8::arbitrary(g) % 30) as i64;
                    let time = HeartbeatTime::from_millis(base + minutes * 60_000).unwrap();
                    HeartbeatEvent::new(service, time.to_iso_string())
                })
                .collect();
            HeartbeatBatch(events)
        }
    }

    /// Allowed misses between 0 and 4
    #[derive(Debug, Clone)]
    struct AllowedMisses(i64);

    impl Arbitrary for AllowedMisses {
        fn arbitrary(g: &mut Gen) -> Self {
            AllowedMisses((u8::arbitrary(g) % 5) as i64)
        }
    }

    // At most one alert is produced per service
    #[quickcheck]
    fn prop_at_most_one_alert_per_service(batch: HeartbeatBatch, misses: AllowedMisses) -> bool {
        let alerts = detect_missed_heartbeats(&batch.0, 60.0, misses.0);
        SERVICES.iter().all(|service| {
            alerts.iter().filter(|alert| alert.service == *service).count() <= 1
        })
    }

    // A service's alert depends only on that service's events
    #[quickcheck]
    fn prop_services_evaluated_independently(
        batch: HeartbeatBatch,
        misses: AllowedMisses,
    ) -> bool {
        let combined = detect_missed_heartbeats(&batch.0, 60.0, misses.0);

        SERVICES.iter().all(|service| {
            let own: Vec<HeartbeatEvent> = batch
                .0
                .iter()
                .filter(|event| event.service_name() == Some(*service))
                .cloned()
                .collect();
            let alone = detect_missed_heartbeats(&own, 60.0, misses.0);
            let together: Vec<&Alert> = combined
                .iter()
                .filter(|alert| alert.service == *service)
                .collect();
            alone.iter().collect::<Vec<_>>() == together
        })
    }

    // Input order does not change which alerts are raised
    #[quickcheck]
    fn prop_input_order_does_not_matter(batch: HeartbeatBatch, misses: AllowedMisses) -> bool {
        let mut reversed = batch.0.clone();
        reversed.reverse();

        let mut forward = detect_missed_heartbeats(&batch.0, 60.0, misses.0);
        let mut backward = detect_missed_heartbeats(&reversed, 60.0, misses.0);
        forward.sort_by(|a, b| a.service.cmp(&b.service));
        backward.sort_by(|a, b| a.service.cmp(&b.service));
        forward == backward
    }

    // Every alert sits one interval after a real heartbeat of its service
    #[quickcheck]
    fn prop_alert_anchored_to_heartbeat(batch: HeartbeatBatch, misses: AllowedMisses) -> bool {
        let alerts = detect_missed_heartbeats(&batch.0, 60.0, misses.0);
        alerts.iter().all(|alert| {
            let anchor = alert.alert_at.plus_seconds(-60.0).unwrap();
            batch.0.iter().any(|event| {
                event.service_name() == Some(alert.service.as_str())
                    && HeartbeatTime::parse(&event.timestamp) == Some(anchor)
            })
        })
    }
}
