//! chrony `refclock SOCK` sample record.
//!
//! chrony reads the datagram straight into its `struct sock_sample`:
//!
//! ```text
//! offset  size  field
//!      0     8  tv_sec   (i64)
//!      8     8  tv_usec  (i64)
//!     16     8  offset   (f64, seconds)
//!     24     4  pulse    (i32)
//!     28     4  leap     (i32)
//!     32     4  _pad     (i32)
//!     36     4  magic    (u32, "SOCK")
//! ```
//!
//! Fields are in host byte order because chrony does not convert them.

use byteorder::{ByteOrder, NativeEndian};
use chrono::{DateTime, Utc};

use crate::error::SampleError;
use crate::types::TimingOffset;

/// Identifies a chrony SOCK sample (`"SOCK"` as a big-endian u32).
pub const SAMPLE_MAGIC: u32 = 0x534F_434B;

/// Size of an encoded sample on the wire.
pub const SAMPLE_LEN: usize = 40;

/// One offset measurement stamped with the wall-clock time it was taken.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockSample {
    pub seconds: i64,
    pub micros: i64,
    pub offset: TimingOffset,
    pub pulse: i32,
    pub leap: i32,
}

impl ClockSample {
    /// Stamp `offset` with the current wall-clock time.
    pub fn capture(offset: TimingOffset) -> Self {
        Self::at(offset, Utc::now())
    }

    /// Stamp `offset` with an explicit time.
    pub fn at(offset: TimingOffset, now: DateTime<Utc>) -> Self {
        Self {
            seconds: now.timestamp(),
            micros: i64::from(now.timestamp_subsec_micros()),
            offset,
            pulse: 0,
            leap: 0,
        }
    }

    /// The (seconds, microseconds) pair chrony keys samples on.
    pub fn timestamp(&self) -> (i64, i64) {
        (self.seconds, self.micros)
    }

    pub fn encode(&self) -> [u8; SAMPLE_LEN] {
        let mut buf = [0u8; SAMPLE_LEN];
        NativeEndian::write_i64(&mut buf[0..8], self.seconds);
        NativeEndian::write_i64(&mut buf[8..16], self.micros);
        NativeEndian::write_f64(&mut buf[16..24], self.offset.seconds());
        NativeEndian::write_i32(&mut buf[24..28], self.pulse);
        NativeEndian::write_i32(&mut buf[28..32], self.leap);
        // 32..36 is padding and stays zero.
        NativeEndian::write_u32(&mut buf[36..40], SAMPLE_MAGIC);
        buf
    }

    /// Parse a record the way chrony validates it: exact length and magic.
    pub fn decode(bytes: &[u8]) -> Result<Self, SampleError> {
        if bytes.len() != SAMPLE_LEN {
            return Err(SampleError::Length {
                expected: SAMPLE_LEN,
                found: bytes.len(),
            });
        }
        let magic = NativeEndian::read_u32(&bytes[36..40]);
        if magic != SAMPLE_MAGIC {
            return Err(SampleError::Magic {
                expected: SAMPLE_MAGIC,
                found: magic,
            });
        }
        Ok(Self {
            seconds: NativeEndian::read_i64(&bytes[0..8]),
            micros: NativeEndian::read_i64(&bytes[8..16]),
            offset: TimingOffset(NativeEndian::read_f64(&bytes[16..24])),
            pulse: NativeEndian::read_i32(&bytes[24..28]),
            leap: NativeEndian::read_i32(&bytes[28..32]),
        })
    }
}
