//! Meeting-slot matching for the U-Engine ecosystem.
//!
//! Matches ranked time preferences from requesters against a pool of
//! fixed-duration slots. Every requester ends up with exactly one of:
//! an exact match on a preferred window, the slot nearest their top
//! preference, or no slot at all.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Preference`, `Requester`, `MeetingRequest`,
//!   `Slot`, `AssignmentRecord`, `AssignmentOutcome`
//! - **`matching`**: The assignment engine (`schedule_meetings`), its slot pool,
//!   and `MatchKpi`
//! - **`validation`**: Raw rows → typed requests and slots, with
//!   severity-tagged messages
//! - **`import`** / **`export`**: CSV in and out
//! - **`config`**: Timestamp formats for import and export
//!
//! # Example
//!
//! ```
//! use u_slotmatch::{import, schedule_meetings, ImportOptions};
//!
//! let requests = "\
//! guardian_id,guardian_name,student_name,priority,preferred_start,preferred_end
//! g1,Guardian A,Student A,1,2025-03-01 10:00,2025-03-01 10:15
//! g2,Guardian B,Student B,1,2025-03-01 10:00,2025-03-01 10:15
//! ";
//! let slots = "\
//! slot_id,start,end
//! s1,2025-03-01 10:00,2025-03-01 10:15
//! s2,2025-03-01 10:30,2025-03-01 10:45
//! ";
//!
//! let options = ImportOptions::default();
//! let requests = import::read_requests(requests.as_bytes(), &options).unwrap();
//! let slots = import::read_slots(slots.as_bytes(), &options).unwrap();
//! assert!(!requests.has_errors && !slots.has_errors);
//!
//! let outcome = schedule_meetings(&requests.data, &slots.data);
//! assert_eq!(outcome.summary().assigned, 1);
//! assert_eq!(outcome.summary().auto_adjusted, 1);
//! assert!(outcome.is_fully_assigned());
//! ```
//!
//! # Determinism
//!
//! Requests are processed strictly in input order. An earlier request always
//! keeps the slot it claims, even when a later request would have matched it
//! exactly. The result is greedy, not globally optimal.

pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod matching;
pub mod models;
pub mod validation;

pub use config::{ExportOptions, ImportOptions};
pub use error::{Error, Result};
pub use matching::{schedule_meetings, MatchKpi};
pub use models::{
    AssignmentOutcome, AssignmentRecord, AssignmentStatus, AssignmentSummary, MeetingRequest,
    Preference, Requester, Slot,
};
pub use validation::{ParsedData, Severity, ValidationMessage};
