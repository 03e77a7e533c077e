//! `decode-clock` — follow ALL.TXT and forward delta_t samples to chrony.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use decode_clock_bridge::paths::DEFAULT_SOCKET_PATH;
use decode_clock_bridge::{start_blocking, BridgeConfig, StartPosition};

use crate::{LogFormatArg, SignArg, WatchArg};

/// Arguments for the forwarding loop.
#[derive(Args, Debug)]
pub struct ForwardArgs {
    /// Path to the WSJT-X ALL.TXT log, e.g. ~/.local/share/WSJT-X/ALL.TXT.
    #[arg(short = 'a', long = "log", visible_alias = "all-txt", value_name = "PATH")]
    pub log: PathBuf,

    /// chrony socket, as named by the `refclock SOCK` directive in chrony.conf.
    #[arg(short = 'c', long = "socket", visible_alias = "chrony-socket", default_value = DEFAULT_SOCKET_PATH)]
    pub socket: PathBuf,

    /// Whether to negate delta_t before handing it to chrony: invert, as-logged.
    #[arg(long, default_value = "invert")]
    pub offset_sign: SignArg,

    /// Replay decodes already in the log instead of starting at its end.
    #[arg(long)]
    pub from_start: bool,

    /// How to wait for new log lines: poll, notify.
    #[arg(long, default_value = "poll")]
    pub watch: WatchArg,

    /// Idle wait between reads when the log has nothing new.
    #[arg(long, default_value_t = 100, value_name = "MS")]
    pub poll_interval_ms: u64,

    /// Minimum pause after each sample.
    #[arg(long, default_value_t = 1, value_name = "US")]
    pub pacing_us: u64,

    /// Log output format: text, json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormatArg,
}

impl ForwardArgs {
    pub fn config(self) -> BridgeConfig {
        let mut config = BridgeConfig::new(self.log);
        config.socket_path = self.socket;
        config.sign = self.offset_sign.into();
        config.start = if self.from_start {
            StartPosition::Beginning
        } else {
            StartPosition::End
        };
        config.watch = self.watch.into();
        config.poll_interval = Duration::from_millis(self.poll_interval_ms);
        config.pacing = Duration::from_micros(self.pacing_us);
        config.log_format = self.log_format.into();
        config
    }

    pub fn run(self) -> Result<()> {
        let config = self.config();
        let never = start_blocking(&config).with_context(|| {
            format!(
                "stopped forwarding decodes from {} to {}",
                config.log_path.display(),
                config.socket_path.display()
            )
        })?;
        match never {}
    }
}
