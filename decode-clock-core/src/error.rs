//! Error types for decode-clock-core.

use std::num::ParseFloatError;

use thiserror::Error;

/// A decode log line that does not carry a usable delta_t field.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    /// The line has fewer whitespace-delimited fields than the delta_t index needs.
    #[error("expected at least {expected} fields, found {found} in line {line:?}")]
    MissingField {
        expected: usize,
        found: usize,
        line: String,
    },

    /// The delta_t field is present but is not a finite decimal number.
    #[error("delta_t field {field:?} is not a finite number")]
    InvalidNumber {
        field: String,
        #[source]
        source: Option<ParseFloatError>,
    },
}

/// A byte buffer that is not a well-formed clock sample record.
#[derive(Debug, Error, PartialEq)]
pub enum SampleError {
    #[error("sample record must be {expected} bytes, got {found}")]
    Length { expected: usize, found: usize },

    #[error("sample magic {found:#010x} does not match {expected:#010x}")]
    Magic { expected: u32, found: u32 },
}
