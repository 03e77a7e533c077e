//! Log follower, chrony sample forwarder and the loop that joins them.

pub mod config;
mod error;
pub mod follower;
pub mod forwarder;
pub mod paths;
mod runtime;

pub use config::{BridgeConfig, LogFormat, StartPosition, WatchMode};
pub use error::{BridgeError, ErrorCategory};
pub use follower::{LineSource, LogFollower, LogLine};
pub use forwarder::ClockSampleForwarder;
pub use runtime::{forward_lines, forward_one, run, start_blocking, ForwardReport};
