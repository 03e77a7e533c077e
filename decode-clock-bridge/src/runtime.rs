use std::convert::Infallible;

use decode_clock_core::{extract_offset, ClockSample, SignConvention};

use crate::config::{BridgeConfig, LogFormat};
use crate::error::{io_err, BridgeError};
use crate::follower::{LineSource, LogFollower};
use crate::forwarder::ClockSampleForwarder;

/// What one pass of the loop sent, and for which line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForwardReport {
    pub line_number: u64,
    pub sample: ClockSample,
}

/// Initialise tracing, then run the bridge on the current thread until it fails.
pub fn start_blocking(config: &BridgeConfig) -> Result<Infallible, BridgeError> {
    init_tracing(config.log_format);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| io_err("tokio-runtime", e))?;
    runtime.block_on(run(config))
}

/// Open the log, connect to chrony and forward every new decode.
///
/// Only returns on a fatal error; there is no clean exit path.
pub async fn run(config: &BridgeConfig) -> Result<Infallible, BridgeError> {
    let mut follower = LogFollower::from_config(config).await?;
    let mut forwarder = ClockSampleForwarder::from_config(config)?;

    tracing::info!(
        log = %config.log_path.display(),
        socket = %config.socket_path.display(),
        sign = %config.sign,
        "waiting for decodes to log",
    );

    forward_lines(&mut follower, &mut forwarder, config.sign).await
}

pub async fn forward_lines<S: LineSource>(
    source: &mut S,
    forwarder: &mut ClockSampleForwarder,
    sign: SignConvention,
) -> Result<Infallible, BridgeError> {
    loop {
        forward_one(source, forwarder, sign).await?;
    }
}

/// Wait for the next line, turn it into a sample and send it.
pub async fn forward_one<S: LineSource>(
    source: &mut S,
    forwarder: &mut ClockSampleForwarder,
    sign: SignConvention,
) -> Result<ForwardReport, BridgeError> {
    let line = source.next_line().await?;
    let offset = extract_offset(&line.text, sign).map_err(|source_err| BridgeError::Parse {
        path: source.path().to_path_buf(),
        line_number: line.number,
        source: source_err,
    })?;

    let sample = forwarder.forward(offset).await?;
    tracing::info!(
        offset = %sample.offset,
        line = line.number,
        socket = %forwarder.socket_path().display(),
        "forwarded sample to chrony",
    );

    Ok(ForwardReport {
        line_number: line.number,
        sample,
    })
}

fn init_tracing(format: LogFormat) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_target(false);
    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
