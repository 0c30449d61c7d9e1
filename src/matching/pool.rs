//! Shrinking pool of available slots.
//!
//! # Ordering
//! Slots are kept sorted ascending by start time. The sort is stable, so
//! slots with equal starts keep their input order. Every tie-break in the
//! pool ("first match wins") is resolved by this order.
//!
//! # Complexity
//! Both removals are O(n) in the current pool size. Each successful
//! removal shrinks the pool by one.

use chrono::NaiveDateTime;

use crate::models::Slot;

/// Available slots for one engine run.
#[derive(Debug, Clone, Default)]
pub struct SlotPool {
    slots: Vec<Slot>,
}

impl SlotPool {
    /// Builds a pool from the raw slot collection.
    pub fn new(slots: &[Slot]) -> Self {
        let mut slots = slots.to_vec();
        slots.sort_by_key(|s| s.start);
        Self { slots }
    }

    /// Number of slots still available.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Remaining slots in pool order.
    pub fn remaining(&self) -> &[Slot] {
        &self.slots
    }

    /// Removes the first slot whose window equals `[start, end)` exactly.
    pub fn remove_exact_match(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> Option<Slot> {
        let index = self
            .slots
            .iter()
            .position(|s| s.start == start && s.end == end)?;
        Some(self.slots.remove(index))
    }

    /// Removes the slot whose start is closest to `target`, in whole minutes.
    ///
    /// Ties go to the first candidate in pool order, i.e. the earliest start.
    /// Returns `None` only when the pool is empty.
    pub fn remove_nearest(&mut self, target: NaiveDateTime) -> Option<Slot> {
        let mut best: Option<(usize, i64)> = None;
        for (index, slot) in self.slots.iter().enumerate() {
            let delta = slot.start_distance_minutes(target);
            match best {
                Some((_, best_delta)) if delta >= best_delta => {}
                _ => best = Some((index, delta)),
            }
        }
        best.map(|(index, _)| self.slots.remove(index))
    }
}
