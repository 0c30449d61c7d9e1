//! Slot matching engine and KPI evaluation.
//!
//! # Algorithm
//!
//! Requests are resolved one at a time in input order against a shrinking
//! [`SlotPool`]:
//!
//! 1. **Exact**: the first preference whose window equals an available slot.
//! 2. **Fallback**: the slot whose start is nearest the top preference's start.
//! 3. **Unassigned**: nothing left to give.
//!
//! The result is deterministic and greedy; it is not a global optimum.
//!
//! # KPI
//!
//! [`MatchKpi`] summarises fill rate, first-choice rate and adjustment distance.

mod engine;
mod fallback;
mod kpi;
mod matcher;
mod pool;

pub use engine::schedule_meetings;
pub use fallback::allocate_nearest;
pub use kpi::MatchKpi;
pub use matcher::match_exact;
pub use pool::SlotPool;
