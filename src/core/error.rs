use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Central error type for the installer pipeline.
/// Every stage returns `Result<T, InstallerError>`.
#[derive(Debug, Error)]
pub enum InstallerError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {url} failed: HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    // ── Manifest ────────────────────────────────────────
    #[error("Modpack info failed to be read: {0}")]
    Decode(String),

    // ── Environment ─────────────────────────────────────
    #[error("{what} not found at {path:?}")]
    NotFound { what: &'static str, path: PathBuf },

    // ── Dependency ──────────────────────────────────────
    #[error("Forge {required} is not installed. Please install it and run the installer again")]
    DependencyMismatch { required: String },

    // ── Mods ────────────────────────────────────────────
    #[error("Failed to download {url}: {reason}")]
    Download { url: String, reason: String },
}

/// Convenience alias used throughout the crate.
pub type InstallerResult<T> = Result<T, InstallerError>;

/// Coarse failure class, one per pipeline concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Fetch,
    Decode,
    NotFound,
    DependencyMismatch,
    Download,
    Other,
}

impl ErrorClass {
    pub fn code(self) -> u8 {
        match self {
            ErrorClass::Other => 1,
            ErrorClass::Fetch => 2,
            ErrorClass::Decode => 3,
            ErrorClass::NotFound => 4,
            ErrorClass::DependencyMismatch => 5,
            ErrorClass::Download => 6,
        }
    }

    pub fn exit_code(self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

impl InstallerError {
    pub fn class(&self) -> ErrorClass {
        match self {
            InstallerError::Http(_) | InstallerError::HttpStatus { .. } => ErrorClass::Fetch,
            InstallerError::Decode(_) => ErrorClass::Decode,
            InstallerError::NotFound { .. } => ErrorClass::NotFound,
            InstallerError::DependencyMismatch { .. } => ErrorClass::DependencyMismatch,
            InstallerError::Download { .. } => ErrorClass::Download,
            InstallerError::Io { .. } => ErrorClass::Other,
        }
    }

    /// Response detail shown under the error line, mirroring what the user
    /// would paste into a support request.
    pub fn response_detail(&self) -> Option<String> {
        match self {
            InstallerError::HttpStatus { status, .. } => Some(format!("HTTP {}", status)),
            InstallerError::Http(e) => Some(
                e.status()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "No Response".to_string()),
            ),
            _ => None,
        }
    }

    /// Re-tag a transport or IO failure that happened while fetching a mod.
    pub fn into_download(self, url: &str) -> Self {
        match self {
            InstallerError::Download { .. } => self,
            other => InstallerError::Download {
                url: url.to_string(),
                reason: other.to_string(),
            },
        }
    }
}
