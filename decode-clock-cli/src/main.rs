//! decode-clock — feed WSJT-X decode timing to chrony as a reference clock.
//!
//! # Usage
//!
//! ```text
//! decode-clock --log <ALL.TXT> [--socket /run/chrony.allsync.sock]
//!              [--offset-sign invert|as-logged] [--from-start]
//!              [--watch poll|notify] [--poll-interval-ms 100] [--pacing-us 1]
//!              [--log-format text|json]
//! ```
//!
//! chrony.conf needs a matching source:
//!
//! ```text
//! refclock SOCK /run/chrony.allsync.sock refid WSJT precision 1e-1 offset 0.0
//! ```

mod commands;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use clap::Parser;

use commands::forward::ForwardArgs;
use decode_clock_bridge::{LogFormat, WatchMode};
use decode_clock_core::SignConvention;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "decode-clock",
    version,
    about = "Tail WSJT-X ALL.TXT and use decode delta_t offsets to sync the system clock through chrony SOCK",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    forward: ForwardArgs,
}

// ---------------------------------------------------------------------------
// Value wrappers — parsed from CLI strings, convert to library types
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse `SignConvention` from CLI args.
#[derive(Debug, Clone, Default)]
pub struct SignArg(pub SignConvention);

impl FromStr for SignArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "invert" => Ok(Self(SignConvention::Invert)),
            "as-logged" => Ok(Self(SignConvention::AsLogged)),
            other => Err(format!(
                "unknown offset sign '{other}'; expected: invert, as-logged"
            )),
        }
    }
}

impl fmt::Display for SignArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<SignArg> for SignConvention {
    fn from(s: SignArg) -> Self {
        s.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct WatchArg(pub WatchMode);

impl FromStr for WatchArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "poll" => Ok(Self(WatchMode::Poll)),
            "notify" => Ok(Self(WatchMode::Notify)),
            other => Err(format!("unknown watch mode '{other}'; expected: poll, notify")),
        }
    }
}

impl From<WatchArg> for WatchMode {
    fn from(w: WatchArg) -> Self {
        w.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogFormatArg(pub LogFormat);

impl FromStr for LogFormatArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self(LogFormat::Text)),
            "json" => Ok(Self(LogFormat::Json)),
            other => Err(format!("unknown log format '{other}'; expected: text, json")),
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(l: LogFormatArg) -> Self {
        l.0
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.forward.run()
}
