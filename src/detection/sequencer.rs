use crate::events::ValidatedEvent;

/// Sort a service's events by timestamp, ascending
///
/// Ordering uses whole Unix seconds. The sort is stable, so events falling in the
/// same second keep their relative input order.
pub fn sort_chronologically(events: &mut [ValidatedEvent]) {
    events.sort_by_key(|event| event.time.unix_seconds());
}


// Property-based tests
#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::events::{HeartbeatEvent, HeartbeatTime};
    use crate::detection::validate_event;
    use quickcheck_macros::quickcheck;

    fn events_from_offsets(offsets: &[u16]) -> Vec<ValidatedEvent> {
        let base = 1_754_301_600_000_i64;
        offsets
            .iter()
            .map(|offset| {
                // Offsets in half seconds so that some events share a second
                let time = HeartbeatTime::from_millis(base + *offset as i64 * 500).unwrap();
                validate_event(&HeartbeatEvent::new("email", time.to_iso_string())).unwrap()
            })
            .collect()
    }

    // Output is ordered by whole seconds
    #[quickcheck]
    fn prop_sorted_output_is_ordered(offsets: Vec<u16>) -> bool {
        let mut events = events_from_offsets(&offsets);
        sort_chronologically(&mut events);
        events
            .windows(2)
            .all(|pair| pair[0].time.unix_seconds() <= pair[1].time.unix_seconds())
    }

    // Sorting an already sorted sequence leaves it unchanged
    #[quickcheck]
    fn prop_sorting_is_idempotent(offsets: Vec<u16>) -> bool {
        let mut events = events_from_offsets(&offsets);
        sort_chronologically(&mut events);
        let once = events.clone();
        sort_chronologically(&mut events);
        events == once
    }
}
