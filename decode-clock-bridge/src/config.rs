//! Immutable runtime configuration, built once at startup.

use std::path::PathBuf;
use std::time::Duration;

use decode_clock_core::SignConvention;

use crate::paths::{DEFAULT_PACING, DEFAULT_POLL_INTERVAL, DEFAULT_SOCKET_PATH};

/// Where the follower starts reading the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartPosition {
    /// Skip decodes already in the file.
    #[default]
    End,
    /// Replay the whole file.
    Beginning,
}

/// How the follower waits when the log has no new data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatchMode {
    /// Sleep for the poll interval.
    #[default]
    Poll,
    /// Wake on filesystem change events, falling back to the poll interval.
    Notify,
}

/// Subscriber output format for `tracing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub log_path: PathBuf,
    pub socket_path: PathBuf,
    pub sign: SignConvention,
    pub start: StartPosition,
    pub watch: WatchMode,
    pub poll_interval: Duration,
    pub pacing: Duration,
    pub log_format: LogFormat,
}

impl BridgeConfig {
    /// Defaults for everything except the log to follow.
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
            socket_path: PathBuf::from(DEFAULT_SOCKET_PATH),
            sign: SignConvention::default(),
            start: StartPosition::default(),
            watch: WatchMode::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            pacing: DEFAULT_PACING,
            log_format: LogFormat::default(),
        }
    }
}
