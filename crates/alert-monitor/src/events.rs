//! Notifications raised by the monitors.

use std::sync::Arc;

use alert_core::RegionAlertStatus;

/// A notification from a region tracking loop.
#[derive(Debug, Clone)]
pub enum RegionAlertEvent {
    /// The region was polled. Carries the alert flag remembered before this poll.
    Checked(RegionAlertStatus),
    /// The region's alert flag flipped. Carries the new flag.
    Changed(RegionAlertStatus),
}

impl RegionAlertEvent {
    /// The status carried by the event.
    pub fn status(&self) -> &RegionAlertStatus {
        match self {
            RegionAlertEvent::Checked(status) | RegionAlertEvent::Changed(status) => status,
        }
    }

    pub fn is_checked(&self) -> bool {
        matches!(self, RegionAlertEvent::Checked(_))
    }

    pub fn is_changed(&self) -> bool {
        matches!(self, RegionAlertEvent::Changed(_))
    }
}

/// The API-wide last action index changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdated;

/// Observer callback, invoked synchronously before the loop proceeds.
pub type Observer<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Registered observers for one monitor instance.
pub(crate) struct Observers<E> {
    observers: Vec<Observer<E>>,
}

impl<E> Observers<E> {
    pub(crate) fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, observer: Observer<E>) {
        self.observers.push(observer);
    }

    pub(crate) fn notify(&self, event: &E) {
        for observer in &self.observers {
            observer(event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }
}
