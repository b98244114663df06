//! Lock-free work queue handing out each task exactly once.

use std::sync::atomic::{AtomicUsize, Ordering};

/// A fixed list of tasks claimed by index through one shared counter.
#[derive(Debug)]
pub struct TaskQueue<T> {
    tasks: Vec<T>,
    next: AtomicUsize,
}

/// Snapshot of how far a queue has been drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub claimed: usize,
    pub total: usize,
}

impl Progress {
    /// Claimed share in [0, 1]. An empty queue counts as done.
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.claimed as f32 / self.total as f32
        }
    }

    pub fn is_done(&self) -> bool {
        self.claimed >= self.total
    }
}

impl<T> TaskQueue<T> {
    pub fn new(tasks: Vec<T>) -> Self {
        Self {
            tasks,
            next: AtomicUsize::new(0),
        }
    }

    /// Claim the next unclaimed task, or `None` once all are handed out.
    pub fn claim(&self) -> Option<&T> {
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        self.tasks.get(index)
    }

    /// Non-blocking progress read.
    pub fn progress(&self) -> Progress {
        let total = self.tasks.len();
        Progress {
            claimed: self.next.load(Ordering::Relaxed).min(total),
            total,
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
