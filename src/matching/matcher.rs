//! Exact preference matching.

use super::SlotPool;
use crate::models::{AssignmentRecord, MeetingRequest};

/// Tries each preference in stored order against the pool.
///
/// The first preference whose window exactly equals an available slot claims
/// that slot and yields an `Assigned` record. When nothing matches the pool
/// is left untouched and `None` is returned.
pub fn match_exact(request: &MeetingRequest, pool: &mut SlotPool) -> Option<AssignmentRecord> {
    request.preferences.iter().find_map(|preference| {
        pool.remove_exact_match(preference.start, preference.end)
            .map(|slot| {
                AssignmentRecord::assigned(request.requester.clone(), slot, preference.priority)
            })
    })
}
