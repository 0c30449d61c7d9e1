//! CSV ingestion.
//!
//! Reads header-led CSV into [`RawRow`]s and hands them to validation.
//! Headers are trimmed and lower-cased, cells trimmed, blank rows skipped.
//!
//! Ragged rows are read rather than rejecting the whole file: a short row
//! surfaces as a per-row "X is required" error during validation, and cells
//! past the header are dropped.

use std::io::Read;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::config::ImportOptions;
use crate::error::Result;
use crate::models::{MeetingRequest, Slot};
use crate::validation::{
    is_row_empty, transform_request_rows, transform_slot_rows, ParsedData, RawRow,
};

/// Reads every non-blank data row.
///
/// Rows may be shorter or longer than the header; extra cells are dropped
/// and missing cells are simply absent from the row.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.clone(), v.to_string()))
            .collect();

        if is_row_empty(&row) {
            continue;
        }
        rows.push(row);
    }

    debug!(rows = rows.len(), columns = headers.len(), "csv rows read");
    Ok(rows)
}

/// Reads and validates a preference CSV (one row per preference).
pub fn read_requests<R: Read>(
    reader: R,
    options: &ImportOptions,
) -> Result<ParsedData<Vec<MeetingRequest>>> {
    let rows = read_rows(reader)?;
    Ok(transform_request_rows(&rows, options))
}

/// Reads and validates a slot CSV.
pub fn read_slots<R: Read>(reader: R, options: &ImportOptions) -> Result<ParsedData<Vec<Slot>>> {
    let rows = read_rows(reader)?;
    Ok(transform_slot_rows(&rows, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_rows_normalizes() {
        let data = " Slot_ID , Start ,END\n s1 , 2025-03-01 10:00 , 2025-03-01 10:15 \n";
        let rows = read_rows(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["slot_id"], "s1");
        assert_eq!(rows[0]["start"], "2025-03-01 10:00");
        assert_eq!(rows[0]["end"], "2025-03-01 10:15");
    }

    #[test]
    fn test_read_rows_skips_blank() {
        let data = "slot_id,start,end\n,,\ns1,2025-03-01 10:00,2025-03-01 10:15\n , , \n";
        let rows = read_rows(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_read_rows_flexible_lengths() {
        let data = "slot_id,start,end\ns1,2025-03-01 10:00\ns2,2025-03-01 11:00,2025-03-01 11:15,extra\n";
        let rows = read_rows(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(!rows[0].contains_key("end"));
        assert_eq!(rows[1].len(), 3);
    }

    #[test]
    fn test_read_slots_validates() {
        let data = "slot_id,start,end\ns1,2025-03-01 10:00\n";
        let parsed = read_slots(data.as_bytes(), &ImportOptions::default()).unwrap();
        assert!(parsed.has_errors);
        assert_eq!(parsed.messages[0].message, "end is required");
    }

    #[test]
    fn test_read_requests() {
        let data = "\
guardian_id,guardian_name,student_name,priority,preferred_start,preferred_end,notes
g1,Guardian A,Student A,2,2025-03-01 11:00,2025-03-01 11:15,
g1,Guardian A,Student A,1,2025-03-01 10:00,2025-03-01 10:15,call first
";
        let parsed = read_requests(data.as_bytes(), &ImportOptions::default()).unwrap();

        assert!(!parsed.has_errors);
        assert_eq!(parsed.data.len(), 1);
        assert_eq!(parsed.data[0].preferences[0].priority, 1);
        assert_eq!(parsed.data[0].requester.notes.as_deref(), Some("call first"));
    }
}
