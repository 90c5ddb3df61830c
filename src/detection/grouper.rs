//! Partitioning of heartbeat events by service
//!
//! Groups are kept in the order their service was first seen, which is also the
//! order in which alerts are reported.

use crate::events::{HeartbeatEvent, ValidatedEvent};
use log::debug;
use std::collections::HashMap;

/// Anything that can be grouped under a service identifier
pub trait ServiceKey {
    /// The grouping key, or `None` if the item has no text service identifier
    fn service_key(&self) -> Option<&str>;
}

impl ServiceKey for HeartbeatEvent {
    fn service_key(&self) -> Option<&str> {
        self.service_name()
    }
}

impl ServiceKey for ValidatedEvent {
    fn service_key(&self) -> Option<&str> {
        Some(&self.service)
    }
}

/// Insertion-ordered mapping from service identifier to that service's items
///
/// Keys compare by exact string equality. Items keep their insertion order within
/// each group.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceGroups<T> {
    groups: Vec<(String, Vec<T>)>,
    index: HashMap<String, usize>,
}

impl<T> Default for ServiceGroups<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ServiceGroups<T> {
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Append an item to a service's group, creating the group on first use
    pub fn push(&mut self, service: &str, item: T) {
        match self.index.get(service) {
            Some(&position) => self.groups[position].1.push(item),
            None => {
                self.index.insert(service.to_string(), self.groups.len());
                self.groups.push((service.to_string(), vec![item]));
            }
        }
    }

    /// Items recorded for a service, in insertion order
    pub fn get(&self, service: &str) -> Option<&[T]> {
        self.index
            .get(service)
            .map(|&position| self.groups[position].1.as_slice())
    }

    /// Service identifiers in first-seen order
    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(service, _)| service.as_str())
    }

    /// Groups in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.groups
            .iter()
            .map(|(service, items)| (service.as_str(), items.as_slice()))
    }

    /// Number of distinct services
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<T> IntoIterator for ServiceGroups<T> {
    type Item = (String, Vec<T>);
    type IntoIter = std::vec::IntoIter<(String, Vec<T>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// Partition items by service, preserving relative order within each group
///
/// No deduplication is done. Items without a text service identifier cannot be
/// keyed and are skipped; callers are expected to validate first.
pub fn group_by_service<T, I>(items: I) -> ServiceGroups<T>
where
    T: ServiceKey,
    I: IntoIterator<Item = T>,
{
    let mut groups = ServiceGroups::new();

    for item in items {
        let service = match item.service_key() {
            Some(service) => service.to_string(),
            None => {
                debug!("Skipping event without a text service identifier");
                continue;
            }
        };
        groups.push(&service, item);
    }

    groups
}

/// Group raw heartbeat events by service
///
/// # Examples
///
/// ```
/// use heartwatch::detection::group_events_by_service;
/// use heartwatch::events::HeartbeatEvent;
///
/// let events = vec![
///     HeartbeatEvent::new("email", "2025-08-04T10:00:00Z"),
///     HeartbeatEvent::new("sms", "2025-08-04T10:00:00Z"),
///     HeartbeatEvent::new("email", "2025-08-04T10:01:00Z"),
/// ];
///
/// let groups = group_events_by_service(&events);
/// assert_eq!(groups.services().collect::<Vec<_>>(), vec!["email", "sms"]);
/// assert_eq!(groups.get("email").unwrap().len(), 2);
/// ```
pub fn group_events_by_service(events: &[HeartbeatEvent]) -> ServiceGroups<HeartbeatEvent> {
    group_by_service(events.iter().cloned())
}
