//! Arrival-order assignment engine.
//!
//! # Algorithm
//!
//! 1. Build a [`SlotPool`] from the slots (sorted by start, stable).
//! 2. For each request, in input order:
//!    exact match on any preference → nearest slot to the top preference →
//!    unassigned.
//! 3. Collect records and derive the summary.
//!
//! A request never revisits the pool after it resolves, and a later request
//! cannot reclaim a slot taken by an earlier one. Input order is the only
//! fairness rule.
//!
//! # Complexity
//! O(r * (p + s) * s) worst case for r requests, p preferences each, s slots.

use tracing::{debug, info, instrument};

use super::{allocate_nearest, match_exact, SlotPool};
use crate::models::{AssignmentOutcome, AssignmentRecord, AssignmentStatus, MeetingRequest, Slot};

/// Assigns slots to requests.
///
/// Total over its input: never panics or errors. Requests without
/// preferences come out unassigned.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_slotmatch::matching::schedule_meetings;
/// use u_slotmatch::models::{AssignmentStatus, MeetingRequest, Preference, Requester, Slot};
///
/// let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// let ten = day.and_hms_opt(10, 0, 0).unwrap();
/// let ten_fifteen = day.and_hms_opt(10, 15, 0).unwrap();
///
/// let requests = vec![MeetingRequest::new(Requester::new("g1"))
///     .with_preference(Preference::new(1, ten, ten_fifteen))];
/// let slots = vec![Slot::new("s1", ten, ten_fifteen)];
///
/// let outcome = schedule_meetings(&requests, &slots);
/// assert_eq!(outcome.assignments()[0].status(), AssignmentStatus::Assigned);
/// assert_eq!(outcome.summary().assigned, 1);
/// ```
#[instrument(skip_all, fields(requests = requests.len(), slots = slots.len()))]
pub fn schedule_meetings(requests: &[MeetingRequest], slots: &[Slot]) -> AssignmentOutcome {
    let mut pool = SlotPool::new(slots);
    let mut assignments = Vec::new();
    let mut unassigned = Vec::new();

    for request in requests {
        let record = match_exact(request, &mut pool)
            .or_else(|| allocate_nearest(request, &mut pool))
            .unwrap_or_else(|| AssignmentRecord::unassigned(request.requester.clone()));

        debug!(
            guardian_id = %request.guardian_id(),
            status = %record.status(),
            slot_id = record.slot_id().unwrap_or(""),
            remaining = pool.len(),
            "request resolved"
        );

        match record.status() {
            AssignmentStatus::Unassigned => unassigned.push(record),
            _ => assignments.push(record),
        }
    }

    let outcome = AssignmentOutcome::new(assignments, unassigned);
    let summary = outcome.summary();
    info!(
        total = summary.total,
        assigned = summary.assigned,
        auto_adjusted = summary.auto_adjusted,
        unassigned = summary.unassigned,
        "meeting assignment complete"
    );
    outcome
}
