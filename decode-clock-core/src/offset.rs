//! delta_t extraction from WSJT-X `ALL.TXT` decode lines.
//!
//! A decode line looks like
//!
//! ```text
//! 230610_120000    14.074 Rx FT8    -12  0.3 1234 CQ K1ABC FN42
//! ```
//!
//! and only the sixth whitespace-delimited field (index 5) is consumed; the
//! rest of the format is opaque here.

use crate::error::ParseError;
use crate::types::{SignConvention, TimingOffset};

/// Zero-based index of the delta_t field in a decode line.
pub const DELTA_T_FIELD: usize = 5;

/// Parse the delta_t field of `line` and apply `sign`.
///
/// # Errors
/// [`ParseError::MissingField`] if the line is too short,
/// [`ParseError::InvalidNumber`] if the field is not a finite decimal number.
pub fn extract_offset(line: &str, sign: SignConvention) -> Result<TimingOffset, ParseError> {
    let delta_t = delta_t(line)?;
    Ok(sign.apply(delta_t))
}

fn delta_t(line: &str) -> Result<f64, ParseError> {
    let mut fields = line.split_whitespace();
    let Some(field) = fields.nth(DELTA_T_FIELD) else {
        return Err(ParseError::MissingField {
            expected: DELTA_T_FIELD + 1,
            found: line.split_whitespace().count(),
            line: line.to_string(),
        });
    };

    let value: f64 = field.parse().map_err(|source| ParseError::InvalidNumber {
        field: field.to_string(),
        source: Some(source),
    })?;
    if !value.is_finite() {
        return Err(ParseError::InvalidNumber {
            field: field.to_string(),
            source: None,
        });
    }
    Ok(value)
}
