//! In-process event bus: synchronous publish/subscribe with bounded history.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};
use std::time::{SystemTime, UNIX_EPOCH};

/// Reserved event type meaning "every event, of any type".
pub const WILDCARD: &str = "*";

/// Number of events the history retains unless configured otherwise.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// An event carried by the bus. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event type, e.g. `"sticker.placed"`.
    pub event_type: String,
    /// Event payload. The typed catalog lives in [`crate::events`]; a raw
    /// value is the escape hatch for shapeless widget-to-widget messages.
    pub payload: Value,
    /// Name of the emitting component, when attributed.
    pub source: Option<String>,
    /// Milliseconds since the Unix epoch, stamped at emit time.
    pub timestamp: u64,
}

type SubscriberFn = dyn Fn(&Event);

struct Subscriber {
    id: u64,
    event_type: String,
    callback: Rc<SubscriberFn>,
}

struct BusInner {
    subscribers: Vec<Subscriber>,
    history: VecDeque<Event>,
    capacity: usize,
    next_id: u64,
}

/// Synchronous publish/subscribe channel keyed by event type string.
///
/// Cloning yields another handle to the same channel; inject a clone into
/// every component that produces or observes events. The bus is
/// single-threaded by construction, and dispatch holds no internal borrow
/// while callbacks run, so callbacks may subscribe, unsubscribe, or emit
/// again freely.
#[derive(Clone)]
pub struct EventBus {
    inner: Rc<RefCell<BusInner>>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Create a bus with the default history capacity.
    pub fn new() -> Self {
        Self::with_history_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Create a bus retaining at most `capacity` events; 0 disables
    /// history retention entirely.
    pub fn with_history_capacity(capacity: usize) -> Self {
        Self {
            inner: Rc::new(RefCell::new(BusInner {
                subscribers: Vec::new(),
                history: VecDeque::with_capacity(capacity),
                capacity,
                next_id: 0,
            })),
        }
    }

    /// Register `callback` for `event_type`, or for every event when
    /// `event_type` is [`WILDCARD`].
    ///
    /// Returns the handle that removes exactly this registration. Dropping
    /// the handle leaves the subscription alive; only
    /// [`Subscription::unsubscribe`] removes it.
    pub fn on<F>(&self, event_type: &str, callback: F) -> Subscription
    where
        F: Fn(&Event) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push(Subscriber {
            id,
            event_type: event_type.to_string(),
            callback: Rc::new(callback),
        });
        Subscription {
            id,
            bus: Rc::downgrade(&self.inner),
        }
    }

    /// Emit an event. Records it in the history, then synchronously runs
    /// every callback registered for the exact type (in subscription
    /// order), then every wildcard callback. Returns once all have run.
    pub fn emit(&self, event_type: &str, payload: Value) {
        self.dispatch(event_type, payload, None);
    }

    /// Emit an event attributed to a source component.
    pub fn emit_from(&self, source: &str, event_type: &str, payload: Value) {
        self.dispatch(event_type, payload, Some(source.to_string()));
    }

    fn dispatch(&self, event_type: &str, payload: Value, source: Option<String>) {
        let event = Event {
            event_type: event_type.to_string(),
            payload,
            source,
            timestamp: now_millis(),
        };

        // Record the event and snapshot the matching subscribers under a
        // single borrow. Subscriptions added or removed by a callback
        // affect later emits only; the snapshot runs to completion.
        let snapshot: Vec<Rc<SubscriberFn>> = {
            let mut inner = self.inner.borrow_mut();
            if inner.capacity > 0 {
                if inner.history.len() == inner.capacity {
                    inner.history.pop_front();
                }
                inner.history.push_back(event.clone());
            }

            let exact = inner
                .subscribers
                .iter()
                .filter(|s| s.event_type != WILDCARD && s.event_type == event.event_type);
            let wildcard = inner
                .subscribers
                .iter()
                .filter(|s| s.event_type == WILDCARD);
            exact
                .chain(wildcard)
                .map(|s| Rc::clone(&s.callback))
                .collect()
        };

        log::debug!(
            "dispatching `{}` to {} subscriber(s)",
            event.event_type,
            snapshot.len()
        );

        for callback in snapshot {
            // A panicking subscriber must not take down the bus or starve
            // the subscribers after it.
            if panic::catch_unwind(AssertUnwindSafe(|| callback(&event))).is_err() {
                log::error!(
                    "subscriber for `{}` panicked; continuing dispatch",
                    event.event_type
                );
            }
        }
    }

    /// Ordered copy of the event history, oldest first. Mutating the copy
    /// has no effect on the bus.
    pub fn history(&self) -> Vec<Event> {
        self.inner.borrow().history.iter().cloned().collect()
    }

    /// Number of live subscriptions, all types included.
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

/// Handle to a single registration on the bus.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    bus: Weak<RefCell<BusInner>>,
}

impl Subscription {
    /// Remove this registration. Calling twice, or after the bus itself
    /// is gone, is a silent no-op.
    pub fn unsubscribe(&self) {
        if let Some(inner) = self.bus.upgrade() {
            inner.borrow_mut().subscribers.retain(|s| s.id != self.id);
        }
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
