//! Phase timers
//!
//! Widgets simulate pending work ("loading", "verifying") with fixed-duration
//! timers. A timer belongs to the phase that scheduled it: every timer carries
//! the widget's [`Generation`] at scheduling time, and the owner cancels
//! everything older than its current generation when the phase changes.
//!
//! The queue runs on a virtual clock advanced by the host, so tests and
//! headless runs are deterministic.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a scheduled timer
    pub struct TimerId;
}

/// Transition counter of a widget
///
/// Bumped on every phase change. A timer whose generation differs from the
/// owner's current generation is stale and must not mutate state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    /// The generation that follows this one
    pub fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }
}

struct PendingTimer<T> {
    due: Duration,
    seq: u64,
    generation: Generation,
    payload: T,
}

/// A timer that reached its deadline
#[derive(Debug, Clone, PartialEq)]
pub struct FiredTimer<T> {
    pub id: TimerId,
    pub generation: Generation,
    pub payload: T,
}

/// Virtual-clock queue of cancellable timers
pub struct TimerQueue<T> {
    timers: SlotMap<TimerId, PendingTimer<T>>,
    now: Duration,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            now: Duration::ZERO,
            next_seq: 0,
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `payload` to fire after `delay`
    pub fn schedule(&mut self, delay: Duration, generation: Generation, payload: T) -> TimerId {
        let due = self.now + delay;
        let seq = self.next_seq;
        self.next_seq += 1;

        let id = self.timers.insert(PendingTimer {
            due,
            seq,
            generation,
            payload,
        });
        tracing::trace!(
            ?id,
            due_ms = due.as_millis() as u64,
            generation = generation.0,
            "timer scheduled"
        );
        id
    }

    /// Cancel a single timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(id).is_some()
    }

    /// Cancel every timer scheduled under a generation other than `current`
    ///
    /// Returns the number of timers dropped.
    pub fn cancel_stale(&mut self, current: Generation) -> usize {
        let before = self.timers.len();
        self.timers.retain(|_, t| t.generation == current);
        let dropped = before - self.timers.len();
        if dropped > 0 {
            tracing::trace!(dropped, generation = current.0, "stale timers cancelled");
        }
        dropped
    }

    /// Cancel everything (used on unmount)
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.timers.len();
        self.timers.clear();
        dropped
    }

    /// Number of timers still pending
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Time until the earliest pending timer fires
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers
            .values()
            .map(|t| t.due.saturating_sub(self.now))
            .min()
    }

    /// Advance the virtual clock and take every timer that came due
    ///
    /// The clock keeps full `Duration` precision, so sub-millisecond steps
    /// add up. Fired timers are returned in deadline order, ties broken by
    /// scheduling order.
    pub fn advance(&mut self, dt: Duration) -> Vec<FiredTimer<T>> {
        self.now += dt;
        let now = self.now;

        let mut due: Vec<(Duration, u64, TimerId)> = self
            .timers
            .iter()
            .filter(|(_, t)| t.due <= now)
            .map(|(id, t)| (t.due, t.seq, id))
            .collect();
        due.sort_unstable_by_key(|&(due, seq, _)| (due, seq));

        due.into_iter()
            .filter_map(|(_, _, id)| {
                self.timers.remove(id).map(|t| FiredTimer {
                    id,
                    generation: t.generation,
                    payload: t.payload,
                })
            })
            .collect()
    }
}
