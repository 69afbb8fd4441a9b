// File: src/error.rs
// Purpose: Error taxonomy for initialization and request hooks

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The routes directory could not be traversed
///
/// Raised by the scanner when the routes root (or a directory below it) is
/// missing or unreadable. Initialization logs it at warning level and then
/// propagates it, so a misconfigured routes root fails fast instead of
/// serving an empty site.
#[derive(Debug, Error)]
#[error("failed to scan routes directory {path:?}: {source}")]
pub struct ScanError {
    /// The routes root the scan started from
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Failures that abort the one-time `init` pass
///
/// Everything else during initialization (controller factories failing,
/// unsupported exports) is logged and skipped so one bad controller never
/// takes down the other routes.
#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// The blocking scan task panicked or was cancelled
    #[error("routes scan task failed: {0}")]
    ScanTask(#[from] tokio::task::JoinError),
}

/// A per-request hook failure
///
/// Always carries an HTTP status; constructors default it to 500. Statuses
/// below 500 are client-facing and reported with full details; 500 and above
/// are logged centrally and reported generically (message sanitized in
/// production on JSON routes).
#[derive(Debug, Clone, Error)]
#[error("{message} (status {status})")]
pub struct HookError {
    pub status: u16,
    pub message: String,
    /// Machine-readable error code, surfaced in JSON error bodies
    pub code: Option<String>,
}

impl HookError {
    /// A server fault (status 500)
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: 500,
            message: message.into(),
            code: None,
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
        }
    }

    /// Attaches a machine-readable code
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Whether this is a server fault (logged centrally, reported generically)
    pub fn is_server_fault(&self) -> bool {
        self.status >= 500
    }
}

impl From<anyhow::Error> for HookError {
    fn from(err: anyhow::Error) -> Self {
        Self::new(format!("{err:#}"))
    }
}
