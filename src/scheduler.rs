use crate::effects::Deferred;
use std::time::{Duration, Instant};

/// Pending deferred actions, fired once their deadline passes
#[derive(Debug, Default)]
pub struct Scheduler {
    pending: Vec<(Instant, Deferred)>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration, task: Deferred) {
        self.pending.push((now + delay, task));
    }

    /// Removes and returns every task due at `now`, earliest first
    pub fn take_due(&mut self, now: Instant) -> Vec<Deferred> {
        let mut due: Vec<(Instant, Deferred)> = Vec::new();
        self.pending.retain(|entry| {
            if entry.0 <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(at, _)| *at);
        due.into_iter().map(|(_, task)| task).collect()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.pending.iter().map(|(at, _)| *at).min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
