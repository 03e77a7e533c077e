//! Command implementations for the `decode-clock` binary.

pub mod forward;
