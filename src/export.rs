//! CSV export of assignment results.
//!
//! Two tables: placed records (`assignments`) and requesters left without
//! a slot (`unassigned`). A header row is always written, even for an
//! empty table.

use std::io::Write;

use csv::WriterBuilder;
use serde::Serialize;
use tracing::debug;

use crate::config::ExportOptions;
use crate::error::Result;
use crate::models::{AssignmentRecord, AssignmentStatus};

const ASSIGNMENT_HEADERS: [&str; 9] = [
    "guardian_id",
    "guardian_name",
    "student_name",
    "slot_id",
    "assigned_start",
    "assigned_end",
    "status",
    "matched_priority",
    "notes",
];

const UNASSIGNED_HEADERS: [&str; 4] = ["guardian_id", "guardian_name", "student_name", "notes"];

#[derive(Serialize)]
struct AssignmentRow<'a> {
    guardian_id: &'a str,
    guardian_name: &'a str,
    student_name: &'a str,
    slot_id: &'a str,
    assigned_start: String,
    assigned_end: String,
    status: AssignmentStatus,
    matched_priority: Option<u32>,
    notes: String,
}

#[derive(Serialize)]
struct UnassignedRow<'a> {
    guardian_id: &'a str,
    guardian_name: &'a str,
    student_name: &'a str,
    notes: &'a str,
}

/// Notes column for a record: requester notes plus, for a non-zero
/// adjustment, how far the slot moved from the preferred start.
pub fn record_notes(record: &AssignmentRecord) -> String {
    let adjustment = record
        .adjustment_minutes()
        .filter(|&m| m != 0)
        .map(|m| format!("({m} min from preferred start)"));

    record
        .requester
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .into_iter()
        .chain(adjustment)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Writes the assignments table.
pub fn write_assignments_csv<W: Write>(
    writer: W,
    records: &[AssignmentRecord],
    options: &ExportOptions,
) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(ASSIGNMENT_HEADERS)?;

    for record in records {
        let r = &record.requester;
        wtr.serialize(AssignmentRow {
            guardian_id: &r.guardian_id,
            guardian_name: &r.guardian_name,
            student_name: &r.student_name,
            slot_id: record.slot_id().unwrap_or(""),
            assigned_start: options.format_datetime(record.assigned_start()),
            assigned_end: options.format_datetime(record.assigned_end()),
            status: record.status(),
            matched_priority: record.matched_priority(),
            notes: record_notes(record),
        })?;
    }

    wtr.flush()?;
    debug!(rows = records.len(), "assignments exported");
    Ok(())
}

/// Writes the unassigned table. Records with any other status are skipped.
pub fn write_unassigned_csv<W: Write>(writer: W, records: &[AssignmentRecord]) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(UNASSIGNED_HEADERS)?;

    let mut written = 0usize;
    for record in records
        .iter()
        .filter(|r| r.status() == AssignmentStatus::Unassigned)
    {
        let r = &record.requester;
        wtr.serialize(UnassignedRow {
            guardian_id: &r.guardian_id,
            guardian_name: &r.guardian_name,
            student_name: &r.student_name,
            notes: r.notes.as_deref().unwrap_or(""),
        })?;
        written += 1;
    }

    wtr.flush()?;
    debug!(rows = written, "unassigned exported");
    Ok(())
}
