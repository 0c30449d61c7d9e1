//! Input validation for meeting requests and slots.
//!
//! Turns raw tabular rows into typed, engine-ready input. Detects:
//! - Missing required fields
//! - Non-positive or unparsable priorities
//! - Unparsable timestamps
//! - Windows whose end is not after their start
//! - Name mismatches within one guardian's rows (warning)
//! - Duplicate priorities per guardian (warning)
//! - Duplicate slot ids and overlapping slots (warning)
//!
//! Any `Error`-severity message empties the returned data, so partially
//! valid input never reaches the engine.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ImportOptions;
use crate::models::{MeetingRequest, Preference, Requester, Slot};

/// One input row: lower-cased header → trimmed cell value.
pub type RawRow = HashMap<String, String>;

const REQUEST_FIELDS: [&str; 6] = [
    "guardian_id",
    "guardian_name",
    "student_name",
    "priority",
    "preferred_start",
    "preferred_end",
];

const SLOT_FIELDS: [&str; 3] = ["slot_id", "start", "end"];

/// Message severity. Errors block the data; warnings do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationMessage {
    /// Severity.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// Location, e.g. `row 3`.
    pub context: Option<String>,
}

impl ValidationMessage {
    fn at_row(severity: Severity, message: impl Into<String>, row: usize) -> Self {
        Self {
            severity,
            message: message.into(),
            context: Some(format!("row {row}")),
        }
    }

    fn error(message: impl Into<String>, row: usize) -> Self {
        Self::at_row(Severity::Error, message, row)
    }

    fn warning(message: impl Into<String>, row: usize) -> Self {
        Self::at_row(Severity::Warning, message, row)
    }

    /// Whether this message blocks the data.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Validated data plus every message produced along the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedData<T> {
    /// Typed data. Empty when `has_errors` is set.
    pub data: T,
    /// Every message, in row order per pass.
    pub messages: Vec<ValidationMessage>,
    /// Whether any message is an error.
    pub has_errors: bool,
}

impl<T: Default> ParsedData<T> {
    fn finish(data: T, messages: Vec<ValidationMessage>) -> Self {
        let has_errors = messages.iter().any(ValidationMessage::is_error);
        debug!(
            messages = messages.len(),
            errors = messages.iter().filter(|m| m.is_error()).count(),
            "validation finished"
        );
        Self {
            data: if has_errors { T::default() } else { data },
            messages,
            has_errors,
        }
    }

    /// Warning-level messages only.
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationMessage> {
        self.messages.iter().filter(|m| !m.is_error())
    }

    /// Error-level messages only.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationMessage> {
        self.messages.iter().filter(|m| m.is_error())
    }
}

/// Lower-cases and trims keys, trims values.
pub fn normalize_row(row: &RawRow) -> RawRow {
    row.iter()
        .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_string()))
        .collect()
}

/// Whether every cell is blank.
pub fn is_row_empty(row: &RawRow) -> bool {
    row.values().all(|v| v.trim().is_empty())
}

/// Header occupies row 1, so the first data row is row 2.
#[inline]
fn row_number(index: usize) -> usize {
    index + 2
}

fn field<'a>(row: &'a RawRow, name: &str) -> &'a str {
    row.get(name).map(String::as_str).unwrap_or("")
}

fn missing_field<'a>(row: &RawRow, required: &[&'a str]) -> Option<&'a str> {
    required.iter().copied().find(|f| field(row, f).is_empty())
}

fn parse_time(
    row: &RawRow,
    name: &str,
    options: &ImportOptions,
    row_no: usize,
) -> Result<NaiveDateTime, ValidationMessage> {
    options
        .parse_datetime(field(row, name))
        .ok_or_else(|| {
            ValidationMessage::error(format!("{name} has an invalid date/time format"), row_no)
        })
}

/// Builds meeting requests from preference rows (one row per preference).
///
/// Rows sharing a `guardian_id` are merged into one request in first-seen
/// order. Each request's preferences are sorted by `(priority, start)`.
pub fn transform_request_rows(
    rows: &[RawRow],
    options: &ImportOptions,
) -> ParsedData<Vec<MeetingRequest>> {
    let mut messages = Vec::new();
    let mut requests: Vec<MeetingRequest> = Vec::new();
    // Row numbers parallel to each request's preferences.
    let mut pref_rows: Vec<Vec<usize>> = Vec::new();
    let mut by_guardian: HashMap<String, usize> = HashMap::new();

    for (index, original) in rows.iter().enumerate() {
        let row_no = row_number(index);
        let row = normalize_row(original);

        if let Some(name) = missing_field(&row, &REQUEST_FIELDS) {
            messages.push(ValidationMessage::error(format!("{name} is required"), row_no));
            continue;
        }

        let priority = match field(&row, "priority").parse::<u32>() {
            Ok(p) if p > 0 => p,
            _ => {
                messages.push(ValidationMessage::error(
                    "priority must be a positive integer",
                    row_no,
                ));
                continue;
            }
        };

        let start = match parse_time(&row, "preferred_start", options, row_no) {
            Ok(t) => t,
            Err(m) => {
                messages.push(m);
                continue;
            }
        };
        let end = match parse_time(&row, "preferred_end", options, row_no) {
            Ok(t) => t,
            Err(m) => {
                messages.push(m);
                continue;
            }
        };
        if end <= start {
            messages.push(ValidationMessage::error(
                "preferred_end must be after preferred_start",
                row_no,
            ));
            continue;
        }

        let guardian_id = field(&row, "guardian_id");
        let guardian_name = field(&row, "guardian_name");
        let student_name = field(&row, "student_name");
        let notes = Some(field(&row, "notes")).filter(|n| !n.is_empty());
        let preference = Preference::new(priority, start, end);

        match by_guardian.get(guardian_id) {
            Some(&idx) => {
                let request = &mut requests[idx];
                let requester = &mut request.requester;
                if requester.guardian_name != guardian_name
                    || requester.student_name != student_name
                {
                    messages.push(ValidationMessage::warning(
                        format!("guardian_id {guardian_id} has inconsistent names"),
                        row_no,
                    ));
                }
                if requester.notes.is_none() {
                    requester.notes = notes.map(str::to_string);
                }
                request.preferences.push(preference);
                pref_rows[idx].push(row_no);
            }
            None => {
                let mut requester = Requester::new(guardian_id)
                    .with_guardian_name(guardian_name)
                    .with_student_name(student_name);
                requester.notes = notes.map(str::to_string);

                by_guardian.insert(guardian_id.to_string(), requests.len());
                requests.push(MeetingRequest::new(requester).with_preference(preference));
                pref_rows.push(vec![row_no]);
            }
        }
    }

    for (request, row_nos) in requests.iter_mut().zip(pref_rows) {
        let mut paired: Vec<(Preference, usize)> =
            request.preferences.drain(..).zip(row_nos).collect();
        paired.sort_by(|(a, _), (b, _)| a.rank_cmp(b));

        let mut seen = HashSet::new();
        for (pref, row_no) in &paired {
            if !seen.insert(pref.priority) {
                messages.push(ValidationMessage::warning(
                    format!(
                        "{} has duplicate priority {}",
                        request.requester.guardian_id, pref.priority
                    ),
                    *row_no,
                ));
            }
        }

        request.preferences = paired.into_iter().map(|(p, _)| p).collect();
    }

    ParsedData::finish(requests, messages)
}

/// Builds slots from slot rows, sorted by start time.
pub fn transform_slot_rows(rows: &[RawRow], options: &ImportOptions) -> ParsedData<Vec<Slot>> {
    let mut messages = Vec::new();
    let mut slots: Vec<(Slot, usize)> = Vec::new();
    let mut slot_ids = HashSet::new();

    for (index, original) in rows.iter().enumerate() {
        let row_no = row_number(index);
        let row = normalize_row(original);

        if let Some(name) = missing_field(&row, &SLOT_FIELDS) {
            messages.push(ValidationMessage::error(format!("{name} is required"), row_no));
            continue;
        }

        let slot_id = field(&row, "slot_id");
        if !slot_ids.insert(slot_id.to_string()) {
            messages.push(ValidationMessage::warning(
                format!("slot_id {slot_id} is duplicated"),
                row_no,
            ));
        }

        let start = match parse_time(&row, "start", options, row_no) {
            Ok(t) => t,
            Err(m) => {
                messages.push(m);
                continue;
            }
        };
        let end = match parse_time(&row, "end", options, row_no) {
            Ok(t) => t,
            Err(m) => {
                messages.push(m);
                continue;
            }
        };
        if end <= start {
            messages.push(ValidationMessage::error("end must be after start", row_no));
            continue;
        }

        slots.push((Slot::new(slot_id, start, end), row_no));
    }

    slots.sort_by_key(|(s, _)| s.start);

    for pair in slots.windows(2) {
        let (previous, _) = &pair[0];
        let (current, row_no) = &pair[1];
        if previous.overlaps(current) {
            messages.push(ValidationMessage::warning(
                format!("slot {} overlaps the previous slot", current.id),
                *row_no,
            ));
        }
    }

    ParsedData::finish(slots.into_iter().map(|(s, _)| s).collect(), messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn request_row(id: &str, priority: &str, start: &str, end: &str) -> RawRow {
        row(&[
            ("guardian_id", id),
            ("guardian_name", "Guardian"),
            ("student_name", "Student"),
            ("priority", priority),
            ("preferred_start", start),
            ("preferred_end", end),
        ])
    }

    fn slot_row(id: &str, start: &str, end: &str) -> RawRow {
        row(&[("slot_id", id), ("start", start), ("end", end)])
    }

    #[test]
    fn test_valid_requests_grouped_and_sorted() {
        let rows = vec![
            request_row("g1", "2", "2025-03-01 11:00", "2025-03-01 11:15"),
            request_row("g2", "1", "2025-03-01 09:00", "2025-03-01 09:15"),
            request_row("g1", "1", "2025-03-01 10:00", "2025-03-01 10:15"),
        ];
        let parsed = transform_request_rows(&rows, &ImportOptions::default());

        assert!(!parsed.has_errors);
        assert!(parsed.messages.is_empty());
        assert_eq!(parsed.data.len(), 2);

        let g1 = &parsed.data[0];
        assert_eq!(g1.guardian_id(), "g1");
        let prios: Vec<_> = g1.preferences.iter().map(|p| p.priority).collect();
        assert_eq!(prios, vec![1, 2]);
        assert_eq!(g1.preferences[0].start, at(10, 0));
        assert_eq!(parsed.data[1].guardian_id(), "g2");
    }

    #[test]
    fn test_headers_and_values_normalized() {
        let rows = vec![row(&[
            (" Guardian_ID ", " g1 "),
            ("GUARDIAN_NAME", "Guardian"),
            ("student_name", " Student "),
            ("Priority", "1"),
            ("preferred_start", "2025-03-01 10:00"),
            ("preferred_end", "2025-03-01 10:15"),
            ("Notes", " wheelchair access "),
        ])];
        let parsed = transform_request_rows(&rows, &ImportOptions::default());

        assert!(!parsed.has_errors);
        let r = &parsed.data[0].requester;
        assert_eq!(r.guardian_id, "g1");
        assert_eq!(r.student_name, "Student");
        assert_eq!(r.notes.as_deref(), Some("wheelchair access"));
    }

    #[test]
    fn test_missing_field_is_error() {
        let mut bad = request_row("g1", "1", "2025-03-01 10:00", "2025-03-01 10:15");
        bad.insert("student_name".into(), "  ".into());
        let parsed = transform_request_rows(&[bad], &ImportOptions::default());

        assert!(parsed.has_errors);
        assert!(parsed.data.is_empty());
        let m = &parsed.messages[0];
        assert_eq!(m.severity, Severity::Error);
        assert_eq!(m.message, "student_name is required");
        assert_eq!(m.context.as_deref(), Some("row 2"));
    }

    #[test]
    fn test_invalid_priority() {
        for p in ["0", "-1", "abc", "1.5"] {
            let rows = vec![request_row("g1", p, "2025-03-01 10:00", "2025-03-01 10:15")];
            let parsed = transform_request_rows(&rows, &ImportOptions::default());
            assert!(parsed.has_errors, "priority {p} should be rejected");
            assert!(parsed.messages[0].message.contains("priority"));
        }
    }

    #[test]
    fn test_invalid_times() {
        let rows = vec![
            request_row("g1", "1", "not a date", "2025-03-01 10:15"),
            request_row("g2", "1", "2025-03-01 10:00", "soon"),
            request_row("g3", "1", "2025-03-01 10:15", "2025-03-01 10:15"),
        ];
        let parsed = transform_request_rows(&rows, &ImportOptions::default());

        let errors: Vec<_> = parsed.errors().map(|m| m.message.as_str()).collect();
        assert_eq!(
            errors,
            vec![
                "preferred_start has an invalid date/time format",
                "preferred_end has an invalid date/time format",
                "preferred_end must be after preferred_start",
            ]
        );
        assert_eq!(parsed.messages[2].context.as_deref(), Some("row 4"));
        assert!(parsed.data.is_empty());
    }

    #[test]
    fn test_error_blocks_valid_rows() {
        let rows = vec![
            request_row("g1", "1", "2025-03-01 10:00", "2025-03-01 10:15"),
            request_row("g2", "x", "2025-03-01 10:00", "2025-03-01 10:15"),
        ];
        let parsed = transform_request_rows(&rows, &ImportOptions::default());
        assert!(parsed.has_errors);
        assert!(parsed.data.is_empty());
    }

    #[test]
    fn test_name_mismatch_and_notes_warning() {
        let mut second = request_row("g1", "2", "2025-03-01 11:00", "2025-03-01 11:15");
        second.insert("guardian_name".into(), "Someone Else".into());
        second.insert("notes".into(), "late arrival".into());
        let rows = vec![
            request_row("g1", "1", "2025-03-01 10:00", "2025-03-01 10:15"),
            second,
        ];
        let parsed = transform_request_rows(&rows, &ImportOptions::default());

        assert!(!parsed.has_errors);
        assert_eq!(parsed.warnings().count(), 1);
        assert!(parsed.messages[0].message.contains("inconsistent names"));
        assert_eq!(parsed.messages[0].context.as_deref(), Some("row 3"));
        assert_eq!(parsed.data[0].requester.guardian_name, "Guardian");
        assert_eq!(parsed.data[0].requester.notes.as_deref(), Some("late arrival"));
    }

    #[test]
    fn test_duplicate_priority_warning() {
        let rows = vec![
            request_row("g1", "1", "2025-03-01 11:00", "2025-03-01 11:15"),
            request_row("g1", "1", "2025-03-01 10:00", "2025-03-01 10:15"),
        ];
        let parsed = transform_request_rows(&rows, &ImportOptions::default());

        assert!(!parsed.has_errors);
        let w: Vec<_> = parsed.warnings().collect();
        assert_eq!(w.len(), 1);
        assert_eq!(w[0].message, "g1 has duplicate priority 1");
        // 11:00 (row 2) sorts after 10:00 (row 3) and is the duplicate
        assert_eq!(w[0].context.as_deref(), Some("row 2"));
        assert_eq!(parsed.data[0].preferences[0].start, at(10, 0));
    }

    #[test]
    fn test_valid_slots_sorted() {
        let rows = vec![
            slot_row("s2", "2025-03-01 10:30", "2025-03-01 10:45"),
            slot_row("s1", "2025-03-01 10:00", "2025-03-01 10:15"),
        ];
        let parsed = transform_slot_rows(&rows, &ImportOptions::default());

        assert!(!parsed.has_errors);
        let ids: Vec<_> = parsed.data.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s2"]);
    }

    #[test]
    fn test_slot_errors() {
        let rows = vec![
            slot_row("", "2025-03-01 10:00", "2025-03-01 10:15"),
            slot_row("s2", "2025-03-01 10:30", "bad"),
            slot_row("s3", "2025-03-01 11:00", "2025-03-01 10:45"),
        ];
        let parsed = transform_slot_rows(&rows, &ImportOptions::default());

        let errors: Vec<_> = parsed.errors().map(|m| m.message.as_str()).collect();
        assert_eq!(
            errors,
            vec![
                "slot_id is required",
                "end has an invalid date/time format",
                "end must be after start",
            ]
        );
        assert!(parsed.data.is_empty());
    }

    #[test]
    fn test_slot_duplicate_and_overlap_warnings() {
        let rows = vec![
            slot_row("s1", "2025-03-01 10:00", "2025-03-01 10:30"),
            slot_row("s1", "2025-03-01 11:00", "2025-03-01 11:15"),
            slot_row("s3", "2025-03-01 10:15", "2025-03-01 10:45"),
        ];
        let parsed = transform_slot_rows(&rows, &ImportOptions::default());

        assert!(!parsed.has_errors);
        assert_eq!(parsed.data.len(), 3);
        let w: Vec<_> = parsed.warnings().map(|m| (m.message.as_str(), m.context.as_deref())).collect();
        assert_eq!(
            w,
            vec![
                ("slot_id s1 is duplicated", Some("row 3")),
                ("slot s3 overlaps the previous slot", Some("row 4")),
            ]
        );
    }

    #[test]
    fn test_row_helpers() {
        let r = row(&[(" A ", " x "), ("b", "")]);
        let n = normalize_row(&r);
        assert_eq!(n.get("a").map(String::as_str), Some("x"));
        assert!(!is_row_empty(&n));
        assert!(is_row_empty(&row(&[("a", " "), ("b", "")])));
    }
}
