//! Synchronous signal bus
//!
//! The host's processing pipeline delivers each signal to every subscriber
//! before returning. Delivery is snapshot-based, so a handler may emit
//! further signals through the same bus while one is in flight; proxy
//! forwarding from composed menus relies on this.

use crate::signal::MenuSignal;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Delivery priority for signal subscribers
///
/// Subscribers run in ascending order: higher priorities observe the signal
/// last, after lower-priority subscribers had their chance to cancel it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Low = 0,
    Normal = 1,
    High = 2,
    Critical = 3,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Normal
    }
}

/// Subscriber ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub u64);

/// Signal handler function type
pub type SignalHandler = Box<dyn Fn(&MenuSignal) + Send + Sync>;

struct Registration {
    id: SubscriberId,
    priority: Priority,
    /// Skip delivery when the signal is already cancelled
    ignore_cancelled: bool,
    handler: SignalHandler,
}

/// Synchronous in-process signal pipeline
pub struct SignalBus {
    registrations: Mutex<Vec<Arc<Registration>>>,
    next_subscriber_id: AtomicU64,
}

impl SignalBus {
    /// Create a new bus
    pub fn new() -> Self {
        Self {
            registrations: Mutex::new(Vec::new()),
            next_subscriber_id: AtomicU64::new(1),
        }
    }

    /// Subscribe at normal priority, receiving cancelled signals too
    pub fn subscribe<F>(&self, handler: F) -> SubscriberId
    where
        F: Fn(&MenuSignal) + Send + Sync + 'static,
    {
        self.subscribe_with(Priority::Normal, false, handler)
    }

    /// Subscribe with explicit priority and cancelled-signal filtering
    pub fn subscribe_with<F>(
        &self,
        priority: Priority,
        ignore_cancelled: bool,
        handler: F,
    ) -> SubscriberId
    where
        F: Fn(&MenuSignal) + Send + Sync + 'static,
    {
        let id = SubscriberId(self.next_subscriber_id.fetch_add(1, Ordering::Relaxed));
        let mut registrations = self.registrations.lock();
        registrations.push(Arc::new(Registration {
            id,
            priority,
            ignore_cancelled,
            handler: Box::new(handler),
        }));
        // Stable sort keeps subscription order within a priority
        registrations.sort_by_key(|registration| registration.priority);
        id
    }

    /// Remove a subscriber; returns whether it was present
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut registrations = self.registrations.lock();
        let before = registrations.len();
        registrations.retain(|registration| registration.id != id);
        registrations.len() != before
    }

    /// Deliver a signal to every subscriber, in priority order
    pub fn call(&self, signal: &MenuSignal) {
        let snapshot: Vec<Arc<Registration>> = self.registrations.lock().clone();
        for registration in snapshot {
            if registration.ignore_cancelled && signal.is_cancelled() {
                continue;
            }
            (registration.handler)(signal);
        }
    }

    /// Number of current subscribers
    pub fn subscriber_count(&self) -> usize {
        self.registrations.lock().len()
    }
}

impl Default for SignalBus {
    fn default() -> Self {
        Self::new()
    }
}
