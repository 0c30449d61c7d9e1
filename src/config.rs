//! Import and export options.
//!
//! The matching engine takes no configuration. These options only affect
//! how timestamps are read from and written to CSV.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp layouts accepted by default, tried in order.
pub const DEFAULT_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Default export layout.
pub const DEFAULT_EXPORT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Options for reading request and slot rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOptions {
    /// `chrono` format strings tried in order.
    pub datetime_formats: Vec<String>,
}

impl ImportOptions {
    /// Creates options with the default timestamp layouts.
    pub fn new() -> Self {
        Self {
            datetime_formats: DEFAULT_DATETIME_FORMATS
                .iter()
                .map(|f| f.to_string())
                .collect(),
        }
    }

    /// Adds an accepted timestamp layout (tried after the existing ones).
    pub fn with_datetime_format(mut self, format: impl Into<String>) -> Self {
        self.datetime_formats.push(format.into());
        self
    }

    /// Replaces the accepted layouts.
    pub fn with_datetime_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.datetime_formats = formats.into_iter().map(Into::into).collect();
        self
    }

    /// Parses a timestamp with the first matching layout.
    pub fn parse_datetime(&self, value: &str) -> Option<NaiveDateTime> {
        let value = value.trim();
        self.datetime_formats
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    }
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Options for writing result tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// `chrono` format string for assigned start/end columns.
    pub datetime_format: String,
}

impl ExportOptions {
    /// Creates options with the default export layout.
    pub fn new() -> Self {
        Self {
            datetime_format: DEFAULT_EXPORT_FORMAT.to_string(),
        }
    }

    /// Sets the timestamp layout.
    pub fn with_datetime_format(mut self, format: impl Into<String>) -> Self {
        self.datetime_format = format.into();
        self
    }

    /// Formats an optional timestamp; `None` becomes an empty string.
    pub fn format_datetime(&self, value: Option<NaiveDateTime>) -> String {
        value
            .map(|v| v.format(&self.datetime_format).to_string())
            .unwrap_or_default()
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::new()
    }
}
