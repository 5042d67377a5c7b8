//! Virtual-time timer queue.
//!
//! Every delayed mutation (dice flicker, settle, movement steps, rotation) is
//! scheduled here and fired in deadline order when the owner advances time.
//! Timers with equal deadlines fire in the order they were scheduled.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

#[derive(Debug)]
struct Entry<T> {
    deadline: Duration,
    seq: u64,
    payload: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.deadline, self.seq).cmp(&(other.deadline, other.seq))
    }
}

/// Min-heap of pending timers keyed by virtual deadline.
#[derive(Debug)]
pub struct TimerQueue<T> {
    now: Duration,
    next_seq: u64,
    heap: BinaryHeap<Reverse<Entry<T>>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            heap: BinaryHeap::new(),
        }
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `payload` to fire `delay` after the current virtual time.
    pub fn schedule(&mut self, delay: Duration, payload: T) {
        let entry = Entry {
            deadline: self.now + delay,
            seq: self.next_seq,
            payload,
        };
        self.next_seq += 1;
        self.heap.push(Reverse(entry));
    }

    /// Pop the earliest timer due at or before `until`, moving virtual time to
    /// its deadline. Returns `None` once nothing else is due.
    pub fn pop_due(&mut self, until: Duration) -> Option<T> {
        let due = self
            .heap
            .peek()
            .is_some_and(|Reverse(entry)| entry.deadline <= until);
        if !due {
            return None;
        }
        let Reverse(entry) = self.heap.pop()?;
        self.now = self.now.max(entry.deadline);
        Some(entry.payload)
    }

    /// Move virtual time forward to `until` once all due timers have fired.
    pub fn settle_at(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Deadline of the next pending timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.heap.peek().map(|Reverse(entry)| entry.deadline)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Drop every pending timer. Virtual time is kept.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
