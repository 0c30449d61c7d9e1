//! Error type for CSV import and export.
//!
//! The matching engine and validation never fail; data problems are
//! reported as [`ValidationMessage`](crate::validation::ValidationMessage)s.
//! Only reading and writing files can produce an [`Error`].

use thiserror::Error;

/// I/O-facing failures.
#[derive(Error, Debug)]
pub enum Error {
    #[error("CSV parse failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for import/export.
pub type Result<T> = std::result::Result<T, Error>;
