//! Tail a log file that another process keeps appending to.
//!
//! The follower reads up to the next `\n`, keeps any trailing partial line in a
//! pending buffer and only hands out a line once its terminator has been
//! written. When the file has nothing new it waits: either a plain sleep
//! ([`WatchMode::Poll`]) or a filesystem change event bounded by the same
//! interval ([`WatchMode::Notify`]).

use std::future::Future;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{recommended_watcher, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};
use tokio::sync::mpsc;

use crate::config::{BridgeConfig, StartPosition, WatchMode};
use crate::error::{io_err, BridgeError};

/// One complete line, terminator stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// 1-based count of lines yielded since the follower was opened.
    pub number: u64,
    pub text: String,
}

/// Anything that yields complete log lines, one at a time, in order.
pub trait LineSource {
    fn next_line(&mut self) -> impl Future<Output = Result<LogLine, BridgeError>>;

    /// Where the lines come from, for error reports.
    fn path(&self) -> &Path;
}

pub struct LogFollower {
    path: PathBuf,
    reader: BufReader<File>,
    pending: Vec<u8>,
    lines_read: u64,
    idle: IdleWait,
}

enum IdleWait {
    Poll(Duration),
    Notify {
        interval: Duration,
        events: mpsc::UnboundedReceiver<notify::Result<Event>>,
        _watcher: RecommendedWatcher,
    },
}

impl LogFollower {
    pub async fn from_config(config: &BridgeConfig) -> Result<Self, BridgeError> {
        Self::open(
            &config.log_path,
            config.start,
            config.watch,
            config.poll_interval,
        )
        .await
    }

    pub async fn open(
        path: &Path,
        start: StartPosition,
        watch: WatchMode,
        poll_interval: Duration,
    ) -> Result<Self, BridgeError> {
        let log_open = |source| BridgeError::LogOpen {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).await.map_err(log_open)?;
        let from = match start {
            StartPosition::End => SeekFrom::End(0),
            StartPosition::Beginning => SeekFrom::Start(0),
        };
        let position = file.seek(from).await.map_err(log_open)?;

        let idle = match watch {
            WatchMode::Poll => IdleWait::Poll(poll_interval),
            WatchMode::Notify => {
                let (event_tx, events) = mpsc::unbounded_channel::<notify::Result<Event>>();
                let mut watcher = recommended_watcher(move |event| {
                    let _ = event_tx.send(event);
                })?;
                watcher.watch(path, RecursiveMode::NonRecursive)?;
                IdleWait::Notify {
                    interval: poll_interval,
                    events,
                    _watcher: watcher,
                }
            }
        };

        tracing::debug!(
            path = %path.display(),
            position,
            watch = ?watch,
            "opened log for following",
        );

        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            pending: Vec::new(),
            lines_read: 0,
            idle,
        })
    }
}

impl LineSource for LogFollower {
    async fn next_line(&mut self) -> Result<LogLine, BridgeError> {
        loop {
            let read = self
                .reader
                .read_until(b'\n', &mut self.pending)
                .await
                .map_err(|e| io_err(&self.path, e))?;

            if read == 0 {
                self.idle.wait().await;
                continue;
            }
            if self.pending.last() != Some(&b'\n') {
                // Writer is mid-line; keep the fragment and read again.
                continue;
            }

            self.lines_read += 1;
            let bytes = std::mem::take(&mut self.pending);
            return Ok(LogLine {
                number: self.lines_read,
                text: line_text(bytes),
            });
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl IdleWait {
    async fn wait(&mut self) {
        match self {
            IdleWait::Poll(interval) => tokio::time::sleep(*interval).await,
            IdleWait::Notify {
                interval, events, ..
            } => {
                match tokio::time::timeout(*interval, events.recv()).await {
                    Ok(Some(Ok(_))) | Err(_) => {}
                    Ok(Some(Err(err))) => {
                        tracing::warn!(error = %err, "log watcher event error");
                    }
                    Ok(None) => tokio::time::sleep(*interval).await,
                }
                // One read drains however many events a burst of writes produced.
                while events.try_recv().is_ok() {}
            }
        }
    }
}

fn line_text(mut bytes: Vec<u8>) -> String {
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
    }
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}
