//! `diskutil` invocations.
//!
//! Argument shapes live here so every caller (validator, orchestrator, CLI) issues
//! exactly the same commands, and fakes only need to script the process layer.

use super::ProcessOps;
use crate::path::block_node;
use crate::HalResult;
use std::process::Output;
use std::time::Duration;

pub const DISKUTIL: &str = "diskutil";

/// Upper bound for read-only queries. Destructive steps never time out.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(30);

pub trait DiskUtilOps: ProcessOps {
    /// `diskutil info <identifier>`
    fn diskutil_info(&self, identifier: &str) -> HalResult<Output> {
        self.command_output(DISKUTIL, &["info", identifier], Some(QUERY_TIMEOUT))
    }

    /// `diskutil list`
    fn diskutil_list(&self) -> HalResult<Output> {
        self.command_output(DISKUTIL, &["list"], Some(QUERY_TIMEOUT))
    }

    /// `diskutil unmountDisk /dev/<identifier>`
    fn diskutil_unmount_disk(&self, identifier: &str) -> HalResult<Output> {
        let node = block_node(identifier);
        self.command_output(DISKUTIL, &["unmountDisk", &node], None)
    }

    /// `diskutil eject /dev/<identifier>`
    fn diskutil_eject(&self, identifier: &str) -> HalResult<Output> {
        let node = block_node(identifier);
        self.command_output(DISKUTIL, &["eject", &node], None)
    }
}

impl<T: ProcessOps + ?Sized> DiskUtilOps for T {}
