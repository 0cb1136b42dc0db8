//! Cooperative timer scheduling
//!
//! Timers are stored in a slot map and driven by the game tick instead of
//! wall-clock time. A cancelled or cleared timer never fires again, and a
//! stale [`TimerHandle`] is rejected by every lookup.
//!
//! ```text
//! host tick ─► poll(until) ─► earliest due timer ─► caller handles payload
//!                  ▲                                        │
//!                  └──────────── repeat until none due ◄────┘
//! ```
//!
//! Polling one timer at a time lets a handler cancel or clear timers that
//! would otherwise have fired later in the same tick.

use log::{trace, warn};
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Handle to a timer owned by a [`Scheduler`]
    pub struct TimerHandle;
}

/// Shortest interval accepted for repeating timers, in seconds
pub const MIN_REPEAT_INTERVAL: f32 = 1.0e-3;

/// A timer that came due during [`Scheduler::poll`]
#[derive(Debug, Clone, PartialEq)]
pub struct FiredTimer<T> {
    /// Handle of the timer that fired
    pub handle: TimerHandle,
    /// Payload registered with the timer
    pub payload: T,
    /// Scheduler time at which the timer fired
    pub at: f64,
}

#[derive(Debug)]
struct ScheduledTimer<T> {
    due: f64,
    interval: f64,
    payload: T,
    sequence: u64,
}

/// Tick-driven scheduler for repeating timers
#[derive(Debug)]
pub struct Scheduler<T> {
    timers: SlotMap<TimerHandle, ScheduledTimer<T>>,
    now: f64,
    next_sequence: u64,
}

impl<T: Clone> Scheduler<T> {
    /// Create an empty scheduler at time zero
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            now: 0.0,
            next_sequence: 0,
        }
    }

    /// Current scheduler time in seconds
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Schedule `payload` to fire every `interval` seconds.
    ///
    /// The first firing happens one full interval from now.
    pub fn every(&mut self, interval: f32, payload: T) -> TimerHandle {
        let interval = if interval.is_finite() && interval >= MIN_REPEAT_INTERVAL {
            interval
        } else {
            warn!(
                "Repeating timer interval {} is too small, clamping to {}",
                interval, MIN_REPEAT_INTERVAL
            );
            MIN_REPEAT_INTERVAL
        };
        let interval = f64::from(interval);
        let due = self.now + interval;
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        let handle = self.timers.insert(ScheduledTimer {
            due,
            interval,
            payload,
            sequence,
        });
        trace!("Scheduled timer {:?} every {:.3}s, first at {:.3}", handle, interval, due);
        handle
    }

    /// Cancel a timer. Returns `false` if it was already cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.timers.remove(handle).is_some()
    }

    /// Whether the timer is still scheduled
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.timers.contains_key(handle)
    }

    /// Number of scheduled timers
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Whether no timers are scheduled
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Cancel every timer. Handles issued before the call become stale.
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Fire the earliest timer due at or before `until`.
    ///
    /// Moves the scheduler time to the firing time. Returns `None` once no
    /// timer is due; call [`Scheduler::settle`] afterwards to move the clock
    /// to `until`.
    pub fn poll(&mut self, until: f64) -> Option<FiredTimer<T>> {
        let (handle, due) = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.due <= until)
            .min_by(|(_, a), (_, b)| {
                a.due
                    .total_cmp(&b.due)
                    .then_with(|| a.sequence.cmp(&b.sequence))
            })
            .map(|(handle, timer)| (handle, timer.due))?;

        self.now = self.now.max(due);

        let timer = self.timers.get_mut(handle)?;
        let payload = timer.payload.clone();
        timer.due += timer.interval;

        Some(FiredTimer {
            handle,
            payload,
            at: due,
        })
    }

    /// Move the scheduler time forward to `until` without firing anything
    pub fn settle(&mut self, until: f64) {
        self.now = self.now.max(until);
    }

    /// Advance by `delta` seconds and collect every timer that fired.
    ///
    /// Repeating timers fire once per elapsed interval. Prefer
    /// [`Scheduler::poll`] when handlers may cancel other timers.
    pub fn advance(&mut self, delta: f32) -> Vec<FiredTimer<T>> {
        let until = self.now + f64::from(delta.max(0.0));
        let mut fired = Vec::new();
        while let Some(timer) = self.poll(until) {
            fired.push(timer);
        }
        self.settle(until);
        fired
    }
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Tick {
        Spawn,
        Expire,
    }

    #[test]
    fn test_first_firing_after_one_interval() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.every(1.0, Tick::Expire);

        assert!(scheduler.advance(0.5).is_empty());
        let fired = scheduler.advance(0.5);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].handle, handle);
        assert_eq!(fired[0].payload, Tick::Expire);
        assert!(scheduler.is_pending(handle));
    }

    #[test]
    fn test_repeating_catches_up() {
        let mut scheduler = Scheduler::new();
        scheduler.every(0.5, Tick::Spawn);

        let fired = scheduler.advance(1.6);
        assert_eq!(fired.len(), 3);
        assert!(fired.iter().all(|t| t.payload == Tick::Spawn));
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.every(0.3, Tick::Expire);
        scheduler.every(0.2, Tick::Spawn);

        let order: Vec<_> = scheduler.advance(0.5).into_iter().map(|t| t.payload).collect();
        assert_eq!(order, vec![Tick::Spawn, Tick::Expire, Tick::Spawn]);
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.every(0.1, Tick::Spawn);

        assert!(scheduler.cancel(handle));
        assert!(!scheduler.cancel(handle));
        assert!(scheduler.advance(1.0).is_empty());
    }

    #[test]
    fn test_clear_invalidates_handles() {
        let mut scheduler = Scheduler::new();
        let old = scheduler.every(0.1, Tick::Spawn);
        scheduler.clear();
        let fresh = scheduler.every(0.1, Tick::Spawn);

        assert!(!scheduler.is_pending(old));
        assert!(scheduler.is_pending(fresh));
        assert_ne!(old, fresh);
    }

    #[test]
    fn test_cancel_between_polls_is_respected() {
        let mut scheduler = Scheduler::new();
        let first = scheduler.every(0.1, Tick::Expire);
        let later = scheduler.every(0.2, Tick::Spawn);

        let until = scheduler.now() + 1.0;
        let fired = scheduler.poll(until).map(|t| t.payload);
        assert_eq!(fired, Some(Tick::Expire));

        scheduler.cancel(later);
        scheduler.cancel(first);
        assert!(scheduler.poll(until).is_none());
        scheduler.settle(until);
        assert!((scheduler.now() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_tiny_interval_is_clamped() {
        let mut scheduler = Scheduler::new();
        scheduler.every(0.0, Tick::Spawn);
        let fired = scheduler.advance(0.0105);
        assert_eq!(fired.len(), 10);
    }
}
