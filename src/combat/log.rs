//! Player-facing combat log.
//!
//! Newest line first, capped. This is gameplay output shown next to the
//! table; diagnostics go through `tracing` instead.

use im::Vector;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatLog {
    lines: Vector<String>,
    capacity: usize,
}

impl CombatLog {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Vector::new(),
            capacity,
        }
    }

    /// Add a line at the front, dropping the oldest past capacity.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push_front(line.into());
        while self.lines.len() > self.capacity {
            self.lines.pop_back();
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines, newest first.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    #[must_use]
    pub fn latest(&self) -> Option<&str> {
        self.lines.front().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
