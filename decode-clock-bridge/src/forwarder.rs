//! Send offset samples to chrony's `refclock SOCK` datagram socket.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::net::UnixDatagram;

use decode_clock_core::{ClockSample, TimingOffset};

use crate::config::BridgeConfig;
use crate::error::{io_err, BridgeError};

pub struct ClockSampleForwarder {
    socket: UnixDatagram,
    path: PathBuf,
    pacing: Duration,
    last_stamp: Option<(i64, i64)>,
}

impl ClockSampleForwarder {
    pub fn from_config(config: &BridgeConfig) -> Result<Self, BridgeError> {
        Self::connect(&config.socket_path, config.pacing)
    }

    /// Connect a client datagram socket to chrony's listening socket.
    ///
    /// # Errors
    /// [`BridgeError::SocketNotFound`] and [`BridgeError::SocketPermission`]
    /// carry operator guidance; anything else is [`BridgeError::SocketConnect`].
    pub fn connect(path: &Path, pacing: Duration) -> Result<Self, BridgeError> {
        let socket = UnixDatagram::unbound().map_err(|e| io_err(path, e))?;
        socket
            .connect(path)
            .map_err(|err| classify_connect_error(path, err))?;

        Ok(Self {
            socket,
            path: path.to_path_buf(),
            pacing,
            last_stamp: None,
        })
    }

    pub fn socket_path(&self) -> &Path {
        &self.path
    }

    /// Stamp `offset` with the current time, send it, then pace.
    ///
    /// Returns the sample exactly as it went out on the wire.
    pub async fn forward(&mut self, offset: TimingOffset) -> Result<ClockSample, BridgeError> {
        let mut sample = ClockSample::capture(offset);
        while Some(sample.timestamp()) == self.last_stamp {
            tokio::time::sleep(self.pacing).await;
            sample = ClockSample::capture(offset);
        }

        let bytes = sample.encode();
        let sent = self
            .socket
            .send(&bytes)
            .await
            .map_err(|e| io_err(&self.path, e))?;
        if sent != bytes.len() {
            return Err(BridgeError::ShortSend {
                socket: self.path.clone(),
                sent,
                expected: bytes.len(),
            });
        }
        self.last_stamp = Some(sample.timestamp());

        tokio::time::sleep(self.pacing).await;
        Ok(sample)
    }
}

fn classify_connect_error(path: &Path, err: std::io::Error) -> BridgeError {
    match err.kind() {
        ErrorKind::PermissionDenied => BridgeError::SocketPermission {
            socket: path.to_path_buf(),
        },
        ErrorKind::NotFound => BridgeError::SocketNotFound {
            socket: path.to_path_buf(),
        },
        _ => BridgeError::SocketConnect {
            socket: path.to_path_buf(),
            source: err,
        },
    }
}
