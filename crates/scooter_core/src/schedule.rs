//! Virtual-time task scheduler
//!
//! Deferred work (respawns, delayed cleanups, HUD timeouts) is queued here
//! keyed by fire time instead of real timers, so callers decide when time
//! moves and tests can advance it deterministically.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::Duration;

/// Identifier of a scheduled task, usable for cancellation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

/// Priority queue of pending tasks ordered by (fire time, insertion order).
///
/// Tasks scheduled for the same instant fire in the order they were queued.
pub struct Scheduler<T> {
    now: Duration,
    next_seq: u64,
    queue: BinaryHeap<Reverse<(Duration, u64)>>,
    tasks: HashMap<u64, T>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            queue: BinaryHeap::new(),
            tasks: HashMap::new(),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Queue a task to fire `delay` after the current virtual time.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TaskId {
        self.schedule_at(self.now + delay, task)
    }

    /// Queue a task for an absolute virtual time (clamped to now).
    pub fn schedule_at(&mut self, at: Duration, task: T) -> TaskId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse((at.max(self.now), seq)));
        self.tasks.insert(seq, task);
        TaskId(seq)
    }

    /// Cancel a pending task, returning it if it had not fired yet.
    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        // The heap entry stays behind and is skipped when popped.
        self.tasks.remove(&id.0)
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.contains_key(&id.0)
    }

    /// Move time forward by `delta` and return every task now due.
    pub fn advance(&mut self, delta: Duration) -> Vec<T> {
        let target = self.now + delta;
        self.advance_to(target)
    }

    /// Move time to `now` (never backwards) and return every task now due,
    /// earliest first.
    pub fn advance_to(&mut self, now: Duration) -> Vec<T> {
        self.now = self.now.max(now);

        let mut due = Vec::new();
        while let Some(Reverse((fire_at, seq))) = self.queue.peek().copied() {
            if fire_at > self.now {
                break;
            }
            self.queue.pop();
            if let Some(task) = self.tasks.remove(&seq) {
                due.push(task);
            }
        }
        due
    }

    /// Fire time of the earliest live task.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue
            .iter()
            .filter(|Reverse((_, seq))| self.tasks.contains_key(seq))
            .map(|Reverse((fire_at, _))| *fire_at)
            .min()
    }

    /// Number of tasks still waiting to fire.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
