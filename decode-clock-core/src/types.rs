//! Domain types shared by the extractor and the sample codec.

use std::fmt;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A clock correction in seconds, inferred from one decode's delta_t.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimingOffset(pub f64);

impl TimingOffset {
    pub fn seconds(self) -> f64 {
        self.0
    }
}

impl fmt::Display for TimingOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<f64> for TimingOffset {
    fn from(seconds: f64) -> Self {
        Self(seconds)
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// How a logged delta_t maps onto the offset handed to the clock daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignConvention {
    /// Negate delta_t: a signal logged as arriving late means the local clock runs ahead.
    #[default]
    Invert,
    /// Forward delta_t unchanged.
    AsLogged,
}

impl SignConvention {
    pub fn apply(self, delta_t: f64) -> TimingOffset {
        match self {
            SignConvention::Invert => TimingOffset(-delta_t),
            SignConvention::AsLogged => TimingOffset(delta_t),
        }
    }
}

impl fmt::Display for SignConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignConvention::Invert => write!(f, "invert"),
            SignConvention::AsLogged => write!(f, "as-logged"),
        }
    }
}
