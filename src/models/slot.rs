//! Slot model.
//!
//! A slot is a fixed time window offered by the host. Slots are fungible:
//! the engine distinguishes them only by id and window.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An offered meeting window.
///
/// # Invariant
/// `end > start`. Ids are expected (not required) to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Slot identifier.
    pub id: String,
    /// Window start.
    pub start: NaiveDateTime,
    /// Window end.
    pub end: NaiveDateTime,
}

impl Slot {
    /// Creates a new slot.
    pub fn new(id: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            start,
            end,
        }
    }

    /// Whether two slots overlap (half-open windows).
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Absolute distance in whole minutes between this slot's start and `target`.
    ///
    /// Truncated toward zero before taking the absolute value.
    #[inline]
    pub fn start_distance_minutes(&self, target: NaiveDateTime) -> i64 {
        (self.start - target).num_minutes().abs()
    }
}
