//! Assignment outcome model.
//!
//! The result of one engine run: a record per request, split into placed
//! and unassigned lists, plus aggregate counts.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Requester, Slot};

/// How a request was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    /// One of the requester's preferred windows matched a slot exactly.
    Assigned,
    /// No exact match; the slot nearest the top preference was used.
    AutoAdjusted,
    /// No slot could be given.
    Unassigned,
}

impl AssignmentStatus {
    /// Wire/export tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assigned => "assigned",
            Self::AutoAdjusted => "auto_adjusted",
            Self::Unassigned => "unassigned",
        }
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The slot a requester received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Claimed slot id.
    pub slot_id: String,
    /// Slot start.
    pub start: NaiveDateTime,
    /// Slot end.
    pub end: NaiveDateTime,
    /// Priority of the preference that produced this placement.
    pub matched_priority: u32,
    /// Minutes between the slot start and the targeted preference start.
    /// Always 0 for exact matches.
    pub adjustment_minutes: i64,
}

impl Placement {
    /// Builds a placement from a claimed slot.
    pub fn from_slot(slot: Slot, matched_priority: u32, adjustment_minutes: i64) -> Self {
        Self {
            slot_id: slot.id,
            start: slot.start,
            end: slot.end,
            matched_priority,
            adjustment_minutes,
        }
    }
}

/// Per-request result.
///
/// # Invariant
/// `placement` is present iff `status != Unassigned`. The constructors are
/// the only way to build a record; deserialization rejects any other pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct AssignmentRecord {
    /// Requester identity, copied from the request.
    pub requester: Requester,
    /// Resolution.
    status: AssignmentStatus,
    /// Claimed slot, if any.
    placement: Option<Placement>,
}

impl AssignmentRecord {
    /// Exact match on a preferred window.
    pub fn assigned(requester: Requester, slot: Slot, matched_priority: u32) -> Self {
        Self {
            requester,
            status: AssignmentStatus::Assigned,
            placement: Some(Placement::from_slot(slot, matched_priority, 0)),
        }
    }

    /// Nearest-slot fallback.
    pub fn auto_adjusted(
        requester: Requester,
        slot: Slot,
        matched_priority: u32,
        adjustment_minutes: i64,
    ) -> Self {
        Self {
            requester,
            status: AssignmentStatus::AutoAdjusted,
            placement: Some(Placement::from_slot(
                slot,
                matched_priority,
                adjustment_minutes,
            )),
        }
    }

    /// No slot given.
    pub fn unassigned(requester: Requester) -> Self {
        Self {
            requester,
            status: AssignmentStatus::Unassigned,
            placement: None,
        }
    }

    /// Resolution status.
    #[inline]
    pub fn status(&self) -> AssignmentStatus {
        self.status
    }

    /// Claimed slot details.
    #[inline]
    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }

    /// Requester's guardian id.
    pub fn guardian_id(&self) -> &str {
        &self.requester.guardian_id
    }

    /// Claimed slot id, if placed.
    pub fn slot_id(&self) -> Option<&str> {
        self.placement.as_ref().map(|p| p.slot_id.as_str())
    }

    /// Claimed slot start, if placed.
    pub fn assigned_start(&self) -> Option<NaiveDateTime> {
        self.placement.as_ref().map(|p| p.start)
    }

    /// Claimed slot end, if placed.
    pub fn assigned_end(&self) -> Option<NaiveDateTime> {
        self.placement.as_ref().map(|p| p.end)
    }

    /// Priority of the preference behind the placement, if placed.
    pub fn matched_priority(&self) -> Option<u32> {
        self.placement.as_ref().map(|p| p.matched_priority)
    }

    /// Fallback distance in minutes. `None` unless auto-adjusted.
    pub fn adjustment_minutes(&self) -> Option<i64> {
        match self.status {
            AssignmentStatus::AutoAdjusted => {
                self.placement.as_ref().map(|p| p.adjustment_minutes)
            }
            _ => None,
        }
    }
}

/// Unchecked wire form of [`AssignmentRecord`].
#[derive(Deserialize)]
struct RawRecord {
    requester: Requester,
    status: AssignmentStatus,
    placement: Option<Placement>,
}

impl TryFrom<RawRecord> for AssignmentRecord {
    type Error = String;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let placed = raw.status != AssignmentStatus::Unassigned;
        if placed != raw.placement.is_some() {
            return Err(format!(
                "{} record for guardian_id {} {} a placement",
                raw.status,
                raw.requester.guardian_id,
                if placed { "is missing" } else { "must not carry" }
            ));
        }
        Ok(Self {
            requester: raw.requester,
            status: raw.status,
            placement: raw.placement,
        })
    }
}

/// Aggregate counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentSummary {
    /// Number of requests processed.
    pub total: usize,
    /// Exact matches.
    pub assigned: usize,
    /// Nearest-slot fallbacks.
    pub auto_adjusted: usize,
    /// Requests left without a slot.
    pub unassigned: usize,
}

impl AssignmentSummary {
    /// Counts records by status.
    pub fn from_records(assignments: &[AssignmentRecord], unassigned: &[AssignmentRecord]) -> Self {
        let mut summary = Self::default();
        for record in assignments.iter().chain(unassigned) {
            summary.total += 1;
            match record.status() {
                AssignmentStatus::Assigned => summary.assigned += 1,
                AssignmentStatus::AutoAdjusted => summary.auto_adjusted += 1,
                AssignmentStatus::Unassigned => summary.unassigned += 1,
            }
        }
        summary
    }

    /// Requests that received a slot.
    #[inline]
    pub fn placed(&self) -> usize {
        self.assigned + self.auto_adjusted
    }
}

/// Complete result of one engine run.
///
/// Immutable once built: fields are read through accessors. The summary is
/// always derived from the lists, including on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOutcome")]
pub struct AssignmentOutcome {
    assignments: Vec<AssignmentRecord>,
    unassigned: Vec<AssignmentRecord>,
    summary: AssignmentSummary,
}

impl AssignmentOutcome {
    /// Builds an outcome and derives its summary.
    pub(crate) fn new(assignments: Vec<AssignmentRecord>, unassigned: Vec<AssignmentRecord>) -> Self {
        debug_assert!(assignments
            .iter()
            .all(|r| r.status() != AssignmentStatus::Unassigned));
        debug_assert!(unassigned
            .iter()
            .all(|r| r.status() == AssignmentStatus::Unassigned));

        let summary = AssignmentSummary::from_records(&assignments, &unassigned);
        Self {
            assignments,
            unassigned,
            summary,
        }
    }

    /// Records with a slot (`Assigned` or `AutoAdjusted`), in request order.
    pub fn assignments(&self) -> &[AssignmentRecord] {
        &self.assignments
    }

    /// Records without a slot, in request order.
    pub fn unassigned(&self) -> &[AssignmentRecord] {
        &self.unassigned
    }

    /// Counts by status.
    pub fn summary(&self) -> &AssignmentSummary {
        &self.summary
    }

    /// All records: placed first, then unassigned.
    pub fn records(&self) -> impl Iterator<Item = &AssignmentRecord> {
        self.assignments.iter().chain(self.unassigned.iter())
    }

    /// Records with the given status.
    pub fn with_status(
        &self,
        status: AssignmentStatus,
    ) -> impl Iterator<Item = &AssignmentRecord> {
        self.records().filter(move |r| r.status() == status)
    }

    /// Finds the record for a guardian.
    pub fn record_for(&self, guardian_id: &str) -> Option<&AssignmentRecord> {
        self.records().find(|r| r.guardian_id() == guardian_id)
    }

    /// Whether every request received a slot.
    pub fn is_fully_assigned(&self) -> bool {
        self.summary.unassigned == 0
    }
}

/// Unchecked wire form of [`AssignmentOutcome`]. A serialized `summary` is
/// ignored and recomputed.
#[derive(Deserialize)]
struct RawOutcome {
    assignments: Vec<AssignmentRecord>,
    unassigned: Vec<AssignmentRecord>,
}

impl TryFrom<RawOutcome> for AssignmentOutcome {
    type Error = String;

    fn try_from(raw: RawOutcome) -> Result<Self, Self::Error> {
        if let Some(r) = raw
            .assignments
            .iter()
            .find(|r| r.status() == AssignmentStatus::Unassigned)
        {
            return Err(format!(
                "unassigned record for guardian_id {} listed under assignments",
                r.guardian_id()
            ));
        }
        if let Some(r) = raw
            .unassigned
            .iter()
            .find(|r| r.status() != AssignmentStatus::Unassigned)
        {
            return Err(format!(
                "{} record for guardian_id {} listed under unassigned",
                r.status(),
                r.guardian_id()
            ));
        }
        Ok(Self::new(raw.assignments, raw.unassigned))
    }
}
