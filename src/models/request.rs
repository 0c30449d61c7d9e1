//! Meeting request model.
//!
//! A request is one requester (a guardian booking on behalf of a student)
//! together with a ranked list of preferred time windows.

use std::cmp::Ordering;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A ranked preferred time window.
///
/// # Invariant
/// `end > start`. Guaranteed by validation; not re-checked by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    /// Rank within the requester's list (1 = most preferred).
    pub priority: u32,
    /// Preferred window start.
    pub start: NaiveDateTime,
    /// Preferred window end.
    pub end: NaiveDateTime,
}

impl Preference {
    /// Creates a new preference.
    pub fn new(priority: u32, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            priority,
            start,
            end,
        }
    }

    /// Ranking order: ascending priority, then earlier start.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then(self.start.cmp(&other.start))
    }
}

/// Identity of the party asking for a meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    /// Unique guardian identifier. Primary key for grouping and lookup.
    pub guardian_id: String,
    /// Guardian display name.
    pub guardian_name: String,
    /// Student the meeting is about.
    pub student_name: String,
    /// Free-form notes carried through to exports.
    pub notes: Option<String>,
}

impl Requester {
    /// Creates a requester with empty names and no notes.
    pub fn new(guardian_id: impl Into<String>) -> Self {
        Self {
            guardian_id: guardian_id.into(),
            guardian_name: String::new(),
            student_name: String::new(),
            notes: None,
        }
    }

    /// Sets the guardian name.
    pub fn with_guardian_name(mut self, name: impl Into<String>) -> Self {
        self.guardian_name = name.into();
        self
    }

    /// Sets the student name.
    pub fn with_student_name(mut self, name: impl Into<String>) -> Self {
        self.student_name = name.into();
        self
    }

    /// Sets the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// A requester and their ranked preferences.
///
/// Preferences are expected sorted ascending by priority. The engine reads
/// them in stored order and treats the first entry as the top preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingRequest {
    /// Who is asking.
    pub requester: Requester,
    /// Ranked preferred windows, highest priority first.
    pub preferences: Vec<Preference>,
}

impl MeetingRequest {
    /// Creates a request with no preferences.
    pub fn new(requester: Requester) -> Self {
        Self {
            requester,
            preferences: Vec::new(),
        }
    }

    /// Appends a preference.
    pub fn with_preference(mut self, preference: Preference) -> Self {
        self.preferences.push(preference);
        self
    }

    /// The top-ranked preference (first entry), if any.
    pub fn top_preference(&self) -> Option<&Preference> {
        self.preferences.first()
    }

    /// Guardian identifier shortcut.
    #[inline]
    pub fn guardian_id(&self) -> &str {
        &self.requester.guardian_id
    }
}
