use std::time::Duration;

/// Matches `refclock SOCK /run/chrony.allsync.sock` in chrony.conf. Existing
/// AllSync deployments keep working without `--socket`.
pub const DEFAULT_SOCKET_PATH: &str = "/run/chrony.allsync.sock";

/// Idle wait between reads when the log has no new data.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// chrony drops a sample whose timeval equals the previous one.
pub const DEFAULT_PACING: Duration = Duration::from_micros(1);
