use std::path::PathBuf;

use thiserror::Error;

use decode_clock_core::ParseError;

/// Which external precondition a [`BridgeError`] violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad startup input: log path or socket path unusable.
    Configuration,
    /// A decode line did not have the expected shape.
    Parse,
    /// The log became unreadable or the socket stopped accepting samples.
    Io,
}

/// Error surface for the follower, forwarder and runtime loop.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("cannot open log file {path}: {source}")]
    LogOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "permission denied on {socket}\n\
         Check that the socket exists and you have write permission on it.\n\
         chronyd creates it at startup from the `refclock SOCK {socket}` directive; \
         writing to it usually requires running as root"
    )]
    SocketPermission { socket: PathBuf },

    #[error(
        "no such socket {socket}\n\
         Add `refclock SOCK {socket} refid WSJT` to chrony.conf and restart chronyd"
    )]
    SocketNotFound { socket: PathBuf },

    #[error("failed to connect to {socket}: {source}")]
    SocketConnect {
        socket: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("short send to {socket}: {sent} of {expected} bytes")]
    ShortSend {
        socket: PathBuf,
        sent: usize,
        expected: usize,
    },

    #[error("{path}: line {line_number} since startup: {source}")]
    Parse {
        path: PathBuf,
        /// Counted from where following began, not from the top of the file.
        line_number: u64,
        #[source]
        source: ParseError,
    },

    #[error("notify error: {0}")]
    Notify(#[from] notify::Error),
}

impl BridgeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BridgeError::LogOpen { .. }
            | BridgeError::SocketPermission { .. }
            | BridgeError::SocketNotFound { .. }
            | BridgeError::SocketConnect { .. }
            | BridgeError::Notify(_) => ErrorCategory::Configuration,
            BridgeError::Parse { .. } => ErrorCategory::Parse,
            BridgeError::Io { .. } | BridgeError::ShortSend { .. } => ErrorCategory::Io,
        }
    }
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> BridgeError {
    BridgeError::Io {
        path: path.into(),
        source,
    }
}
