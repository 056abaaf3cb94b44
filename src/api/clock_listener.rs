use std::rc::Rc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::datetime_to_unix_millis;

use super::range_model::SharedProjection;

/// Callback invoked with the current unix time in milliseconds.
pub type ClockCallback = Box<dyn FnMut(i64)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClockSubscriptionId(pub u64);

/// Push-model periodic clock provided by the host.
pub trait ClockSource {
    fn subscribe(&mut self, callback: ClockCallback) -> ClockSubscriptionId;

    /// Returns `true` when the subscription existed.
    fn unsubscribe(&mut self, id: ClockSubscriptionId) -> bool;
}

/// Clock driven explicitly by the host (or a test) through `tick`.
///
/// Hosts with their own timer loop can call `tick` from it; the selector
/// never polls.
#[derive(Default)]
pub struct ManualClock {
    next_id: u64,
    now_ms: Option<i64>,
    callbacks: IndexMap<ClockSubscriptionId, ClockCallback>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last time delivered by `tick`.
    #[must_use]
    pub fn now_ms(&self) -> Option<i64> {
        self.now_ms
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.callbacks.len()
    }

    /// Delivers `now_ms` to every subscriber in subscription order.
    pub fn tick(&mut self, now_ms: i64) {
        self.now_ms = Some(now_ms);
        for callback in self.callbacks.values_mut() {
            callback(now_ms);
        }
    }

    pub fn tick_at(&mut self, time: DateTime<Utc>) {
        self.tick(datetime_to_unix_millis(time));
    }
}

impl std::fmt::Debug for ManualClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualClock")
            .field("now_ms", &self.now_ms)
            .field("subscribers", &self.callbacks.len())
            .finish()
    }
}

impl ClockSource for ManualClock {
    fn subscribe(&mut self, callback: ClockCallback) -> ClockSubscriptionId {
        let id = ClockSubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.insert(id, callback);
        id
    }

    fn unsubscribe(&mut self, id: ClockSubscriptionId) -> bool {
        self.callbacks.shift_remove(&id).is_some()
    }
}

/// Keeps the projected window pinned to "now" as the clock advances.
///
/// Ticks only move "now"; the offsets are whatever the range model last
/// derived, so handle percents are never touched here. The callback reads
/// offsets at tick time, which keeps one subscription valid across handle
/// moves.
#[derive(Debug)]
pub struct ClockListener {
    projection: SharedProjection,
    subscription: Option<ClockSubscriptionId>,
}

impl ClockListener {
    #[must_use]
    pub fn new(projection: SharedProjection) -> Self {
        Self {
            projection,
            subscription: None,
        }
    }

    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Subscribes to `clock`. Returns `false` when already subscribed.
    pub fn subscribe<C: ClockSource + ?Sized>(&mut self, clock: &mut C) -> bool {
        if self.subscription.is_some() {
            debug!("clock listener already subscribed");
            return false;
        }

        let projection = Rc::downgrade(&self.projection);
        let id = clock.subscribe(Box::new(move |now_ms| {
            if let Some(projection) = projection.upgrade() {
                projection.borrow_mut().advance_to(now_ms);
            }
        }));
        debug!(subscription = id.0, "clock listener subscribed");
        self.subscription = Some(id);
        true
    }

    /// Unsubscribes from `clock`. Returns `false` when nothing was subscribed
    /// or `clock` did not know the subscription; the id is kept in that case.
    pub fn unsubscribe<C: ClockSource + ?Sized>(&mut self, clock: &mut C) -> bool {
        let Some(id) = self.subscription else {
            return false;
        };
        if !clock.unsubscribe(id) {
            warn!(subscription = id.0, "clock did not hold this subscription");
            return false;
        }
        debug!(subscription = id.0, "clock listener unsubscribed");
        self.subscription = None;
        true
    }
}
