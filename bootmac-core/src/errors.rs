use crate::safety::RejectionReason;
use crate::write::WriteFailure;
use bootmac_hal::HalError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bootmac operations
pub type Result<T> = anyhow::Result<T>;

#[derive(Error, Debug)]
pub enum BootmacError {
    #[error("{0} requires elevated privileges. Re-run with sudo.")]
    PrivilegeRequired(String),

    #[error("Not a recognised macOS installer: {}", .0.display())]
    InvalidInstaller(PathBuf),

    #[error("Output directory not found: {}", .0.display())]
    OutputDirMissing(PathBuf),

    #[error("Image file not found: {}", .0.display())]
    ImageUnavailable(PathBuf),

    #[error("Disk rejected: {0}")]
    Rejected(#[from] RejectionReason),

    #[error("Write failed: {0}")]
    Write(#[from] WriteFailure),

    #[error("ISO build tool exited with code {code:?}")]
    BuildFailed { code: Option<i32> },

    #[error("Operation aborted by user")]
    Aborted,

    #[error(transparent)]
    Hal(#[from] HalError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
