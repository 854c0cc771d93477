//! 🍎 bootmac core library.
//!
//! Installer classification, the disk safety gate, the raw USB writer and the
//! ISO build bridge. Every system interaction goes through a `bootmac_hal::SystemHal`.

pub mod bridge;
pub mod cli;
pub mod config;
pub mod errors;
pub mod installer;
pub mod logging;
pub mod preflight;
pub mod safety;
pub mod write;
