//! decode-clock core library — offset extraction, chrony sample codec, errors.
//!
//! Public API surface:
//! - [`types`] — [`TimingOffset`] and [`SignConvention`]
//! - [`offset`] — [`extract_offset`] for WSJT-X decode lines
//! - [`sample`] — [`ClockSample`] encode / decode
//! - [`error`] — [`ParseError`], [`SampleError`]

pub mod error;
pub mod offset;
pub mod sample;
pub mod types;

pub use error::{ParseError, SampleError};
pub use offset::{extract_offset, DELTA_T_FIELD};
pub use sample::{ClockSample, SAMPLE_LEN, SAMPLE_MAGIC};
pub use types::{SignConvention, TimingOffset};
