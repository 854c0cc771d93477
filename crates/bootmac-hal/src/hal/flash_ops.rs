//! Raw image write (`dd`) to a whole-disk device node.

use super::ProcessOps;
use crate::path::raw_node;
use crate::HalResult;
use std::path::Path;
use std::process::ExitStatus;

pub const DD: &str = "dd";

/// Block size for sequential throughput on USB media.
pub const RAW_WRITE_BLOCK_SIZE: &str = "1m";

/// Trait for copying an image onto the raw device node of a disk.
pub trait FlashOps: ProcessOps {
    /// `dd if=<image> of=/dev/r<identifier> bs=1m`, run with inherited stdio so the
    /// operator sees progress (SIGINFO / Ctrl+T) directly.
    fn dd_raw_write(&self, image: &Path, identifier: &str) -> HalResult<ExitStatus> {
        let input = format!("if={}", image.display());
        let output = format!("of={}", raw_node(identifier));
        let block_size = format!("bs={}", RAW_WRITE_BLOCK_SIZE);
        self.command_interactive(DD, &[&input, &output, &block_size])
    }
}

impl<T: ProcessOps + ?Sized> FlashOps for T {}
