//! bootmac Hardware Abstraction Layer (HAL).
//!
//! Every external program the tool runs (`diskutil`, `dd`, `PlistBuddy`, the ISO
//! build tool) goes through [`ProcessOps`], so the classifier, the disk safety
//! validator and the write orchestrator can be driven by [`FakeHal`] in tests.
//!
//! Unix only: exit statuses are modelled with `std::os::unix::process::ExitStatusExt`.

pub mod error;
pub mod hal;
pub mod path;

pub use error::{HalError, HalResult};
pub use hal::*;
