//! Nearest-slot fallback.
//!
//! Only the top-ranked preference is used as the target. Lower-ranked
//! preferences never influence which slot a fallback picks.

use tracing::debug;

use super::SlotPool;
use crate::models::{AssignmentRecord, MeetingRequest};

/// Claims the slot whose start is nearest the top preference's start.
///
/// Returns `None` when the request has no preferences or the pool is empty.
/// The minute distance is carried on the record as its adjustment.
pub fn allocate_nearest(request: &MeetingRequest, pool: &mut SlotPool) -> Option<AssignmentRecord> {
    let top = request.top_preference()?;
    let slot = pool.remove_nearest(top.start)?;
    let delta = slot.start_distance_minutes(top.start);

    debug!(
        guardian_id = %request.guardian_id(),
        slot_id = %slot.id,
        delta_minutes = delta,
        "fallback to nearest slot"
    );

    Some(AssignmentRecord::auto_adjusted(
        request.requester.clone(),
        slot,
        top.priority,
        delta,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssignmentStatus, Preference, Requester, Slot};
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn slot(id: &str, h: u32, m: u32) -> Slot {
        Slot::new(id, at(h, m), at(h, m) + Duration::minutes(15))
    }

    fn pref(priority: u32, h: u32, m: u32) -> Preference {
        Preference::new(priority, at(h, m), at(h, m) + Duration::minutes(15))
    }

    #[test]
    fn test_nearest_to_top_preference() {
        let request = MeetingRequest::new(Requester::new("g1")).with_preference(pref(1, 10, 0));
        let mut pool = SlotPool::new(&[slot("s1", 9, 0), slot("s2", 10, 20)]);

        let record = allocate_nearest(&request, &mut pool).unwrap();
        assert_eq!(record.status(), AssignmentStatus::AutoAdjusted);
        assert_eq!(record.slot_id(), Some("s2"));
        assert_eq!(record.matched_priority(), Some(1));
        assert_eq!(record.adjustment_minutes(), Some(20));
    }

    #[test]
    fn test_ignores_lower_preferences() {
        // Second preference sits right on s2, but only the top one is a target.
        let request = MeetingRequest::new(Requester::new("g1"))
            .with_preference(pref(1, 8, 0))
            .with_preference(pref(2, 12, 5));
        let mut pool = SlotPool::new(&[slot("s1", 9, 0), slot("s2", 12, 0)]);

        let record = allocate_nearest(&request, &mut pool).unwrap();
        assert_eq!(record.slot_id(), Some("s1"));
        assert_eq!(record.adjustment_minutes(), Some(60));
    }

    #[test]
    fn test_empty_pool() {
        let request = MeetingRequest::new(Requester::new("g1")).with_preference(pref(1, 10, 0));
        let mut pool = SlotPool::new(&[]);
        assert!(allocate_nearest(&request, &mut pool).is_none());
    }

    #[test]
    fn test_no_preferences() {
        let request = MeetingRequest::new(Requester::new("g1"));
        let mut pool = SlotPool::new(&[slot("s1", 9, 0)]);
        assert!(allocate_nearest(&request, &mut pool).is_none());
        assert_eq!(pool.len(), 1);
    }
}
