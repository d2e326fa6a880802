//! Scoped Timers
//!
//! Holds at most one live `gloo-timers` handle per slot. Dropping a handle
//! cancels it, so replacing, cancelling, or disposing the owning component
//! all stop the pending callback.

use std::time::Duration;

use gloo_timers::callback::{Interval, Timeout};
use leptos::prelude::*;

pub struct TimerSlot<T: 'static> {
    slot: StoredValue<Option<T>, LocalStorage>,
}

impl<T: 'static> Clone for TimerSlot<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for TimerSlot<T> {}

impl<T: 'static> TimerSlot<T> {
    /// Create an empty slot owned by the current reactive scope
    pub fn new() -> Self {
        let slot = StoredValue::new_local(None);
        on_cleanup(move || {
            slot.try_update_value(|timer: &mut Option<T>| timer.take());
        });
        Self { slot }
    }

    /// Install `timer`, cancelling the previous one
    pub fn replace(&self, timer: T) {
        self.slot.try_update_value(|current| *current = Some(timer));
    }

    pub fn cancel(&self) {
        self.slot.try_update_value(|current| current.take());
    }

    pub fn is_armed(&self) -> bool {
        self.slot.try_with_value(Option::is_some).unwrap_or(false)
    }
}

impl TimerSlot<Timeout> {
    /// Run `f` once after `delay`
    pub fn schedule(&self, delay: Duration, f: impl FnOnce() + 'static) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        self.replace(Timeout::new(millis, f));
    }
}

impl TimerSlot<Interval> {
    /// Run `f` every `period` until cancelled
    pub fn every(&self, period: Duration, f: impl FnMut() + 'static) {
        let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        self.replace(Interval::new(millis, f));
    }
}
