//! Meeting assignment domain models.
//!
//! Provides the data types exchanged with the matching engine: what
//! requesters ask for, what the host offers, and what each requester got.
//!
//! # Domain Mappings
//!
//! | u-slotmatch | School conferences | Clinic | Office hours |
//! |-------------|--------------------|--------|--------------|
//! | Requester | Guardian + student | Patient | Student |
//! | Preference | Preferred time | Requested visit | Requested time |
//! | Slot | Teacher's free slot | Doctor's opening | TA slot |
//! | AssignmentOutcome | Conference timetable | Day roster | Session list |

mod outcome;
mod request;
mod slot;

pub use outcome::{
    AssignmentOutcome, AssignmentRecord, AssignmentStatus, AssignmentSummary, Placement,
};
pub use request::{MeetingRequest, Preference, Requester};
pub use slot::Slot;
