//! Card identity.
//!
//! Every stamped card gets a [`CardId`] that is never reused within a run.
//! Templates (the catalog entries cards are stamped from) have their own
//! [`TemplateId`] space.
//!
//! ## Allocation
//!
//! ```
//! use cinder_engine::core::{IdAllocator, SequentialIds};
//!
//! let mut ids = SequentialIds::starting_at(100);
//! assert_eq!(ids.next_id().raw(), 100);
//! assert_eq!(ids.next_id().raw(), 101);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier of a card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CardId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Identifier of a catalog template ("Strike", "Bash", ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateId(pub u16);

impl TemplateId {
    /// Create a new template ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Template({})", self.0)
    }
}

/// Hands out card identities.
///
/// Only uniqueness within a run matters; implementations may be swapped in
/// tests to pin ids to known values.
pub trait IdAllocator {
    /// Allocate an id that has not been returned before.
    fn next_id(&mut self) -> CardId;
}

/// Monotonic allocator: 1, 2, 3, ...
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequentialIds {
    next: u32,
}

impl SequentialIds {
    /// Start counting at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Start counting at `first`.
    #[must_use]
    pub fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    /// The id the next call will return.
    #[must_use]
    pub fn peek(&self) -> CardId {
        CardId(self.next)
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator for SequentialIds {
    fn next_id(&mut self) -> CardId {
        let id = CardId(self.next);
        self.next += 1;
        id
    }
}
