//! HAL trait definitions and implementations.
//!
//! This module defines the core traits for system operations and provides
//! both real (MacosHal) and fake (FakeHal) implementations.

pub mod diskutil_ops;
pub mod fake_hal;
pub mod flash_ops;
pub mod macos_hal;
pub mod plist_ops;
pub mod privilege_ops;
pub mod process_ops;

pub use diskutil_ops::{DiskUtilOps, DISKUTIL, QUERY_TIMEOUT};
pub use fake_hal::{FakeHal, FakeResponse, Operation};
pub use flash_ops::{FlashOps, DD, RAW_WRITE_BLOCK_SIZE};
pub use macos_hal::MacosHal;
pub use plist_ops::{PlistOps, PLIST_BUDDY};
pub use privilege_ops::PrivilegeOps;
pub use process_ops::{combined_output, ProcessOps};

/// Complete HAL combining all system operation traits.
///
/// `DiskUtilOps`, `FlashOps` and `PlistOps` are blanket-implemented on top of
/// `ProcessOps`, so every `SystemHal` has them too.
pub trait SystemHal: ProcessOps + PrivilegeOps + Send + Sync {}

/// Automatically implement SystemHal for any type implementing all required traits.
impl<T> SystemHal for T where T: ProcessOps + PrivilegeOps + Send + Sync {}
