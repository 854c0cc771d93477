//! Disk safety gate.
//!
//! A user-typed disk identifier only becomes a [`ValidatedDisk`] after three guards
//! pass, in order:
//!
//! 1. syntax: `disk<digits>` exactly, no partition suffix, no whitespace
//! 2. boot disk: never the boot disk token (`disk0`), checked before any inspection
//! 3. attachment: `diskutil info` must report an external, removable or USB /
//!    Thunderbolt attached disk
//!
//! The write orchestrator only accepts a [`ValidatedDisk`].

pub mod inspector;

pub use inspector::{Attachment, DiskDescriptor, Transport};

use bootmac_hal::{combined_output, path, DiskUtilOps, HalError, HalResult, SystemHal};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Boot disk. Never a write target, whatever the configuration says.
pub const BOOT_DISK: &str = "disk0";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    #[error("'{0}' is not a whole-disk identifier (expected diskN, e.g. disk4)")]
    MalformedIdentifier(String),

    #[error("{0} is the boot disk; refusing to write to it")]
    RefusedBootDisk(String),

    #[error("{identifier} is not an external or removable disk ({detail})")]
    NotRemovable { identifier: String, detail: String },
}

/// A syntactically valid whole-disk identifier (`disk4`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiskIdentifier(String);

fn is_whole_disk_identifier(input: &str) -> bool {
    input
        .strip_prefix("disk")
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

impl DiskIdentifier {
    /// Syntax guard. The input is not trimmed: surrounding whitespace is rejected.
    pub fn parse(input: &str) -> Result<Self, RejectionReason> {
        if !is_whole_disk_identifier(input) {
            return Err(RejectionReason::MalformedIdentifier(input.to_string()));
        }
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for DiskIdentifier {
    type Err = RejectionReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DiskIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A disk that passed every guard. Only [`validate_for_write`] can build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDisk {
    identifier: DiskIdentifier,
    descriptor: DiskDescriptor,
}

impl ValidatedDisk {
    pub fn identifier(&self) -> &DiskIdentifier {
        &self.identifier
    }

    pub fn descriptor(&self) -> &DiskDescriptor {
        &self.descriptor
    }

    /// `/dev/diskN`
    pub fn block_node(&self) -> String {
        path::block_node(self.identifier.as_str())
    }

    /// `/dev/rdiskN`
    pub fn raw_node(&self) -> String {
        path::raw_node(self.identifier.as_str())
    }
}

/// Run the three guards in order; the first failing guard is reported.
pub fn validate_for_write<H: SystemHal + ?Sized>(
    hal: &H,
    identifier: &str,
) -> Result<ValidatedDisk, RejectionReason> {
    let identifier = DiskIdentifier::parse(identifier)?;

    // Unconditional: an inspection tool that misreports disk0 must not matter.
    if identifier.as_str() == BOOT_DISK {
        log::warn!("🛑 Refusing boot disk {}", identifier);
        return Err(RejectionReason::RefusedBootDisk(identifier.0));
    }

    let descriptor = inspector::inspect(hal, &identifier).map_err(|detail| {
        RejectionReason::NotRemovable {
            identifier: identifier.to_string(),
            detail,
        }
    })?;
    log::debug!("diskutil info {}:\n{}", identifier, descriptor.raw);

    if !descriptor.is_eligible_for_write() {
        log::warn!("🛑 {} is neither external nor removable", identifier);
        return Err(RejectionReason::NotRemovable {
            identifier: identifier.to_string(),
            detail: "diskutil reports an internal, fixed disk".to_string(),
        });
    }

    log::info!(
        "✅ {} passed safety checks ({:?}, {:?}, removable={})",
        identifier,
        descriptor.attachment,
        descriptor.transport,
        descriptor.removable
    );
    Ok(ValidatedDisk {
        identifier,
        descriptor,
    })
}

/// `diskutil list`, shown to the operator before asking for an identifier.
pub fn list_disks<H: SystemHal + ?Sized>(hal: &H) -> HalResult<String> {
    let output = hal.diskutil_list()?;
    if !output.status.success() {
        return Err(HalError::CommandFailed {
            program: bootmac_hal::DISKUTIL.to_string(),
            code: output.status.code(),
            stderr: combined_output(&output),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
