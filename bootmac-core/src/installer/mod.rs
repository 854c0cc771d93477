//! Installer application classification.
//!
//! An installer bundle's generation decides how the ISO build tool must treat it
//! and whether the build needs root.

mod classify;
mod discover;

pub use classify::{
    classify, InstallerMarkers, HELPER_TOOL, INSTALL_INFO, SHARED_SUPPORT_DIR,
    SHARED_SUPPORT_IMAGE,
};
pub use discover::{
    discover, display_name, inspect, is_known_installer_name, InstallerReport,
    KNOWN_INSTALLER_NAMES,
};

use serde::Serialize;
use std::fmt;

/// Packaging generation of a macOS installer application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InstallerType {
    /// 10.7 - 10.8: payload shipped directly, no `createinstallmedia`.
    LionMountainLion,
    /// 10.9 - 10.11: `createinstallmedia`, no per-version info file.
    MavericksElCapitan,
    /// 10.12 - 10.15: `createinstallmedia` + `InstallInfo.plist`.
    SierraCatalina,
    /// 11+: `createinstallmedia` + packed `SharedSupport.dmg`.
    BigSurAndLater,
    /// Not an installer (no shared-support directory) or unreadable.
    Unknown,
}

struct Capability {
    label: &'static str,
    requires_privilege: bool,
}

impl InstallerType {
    pub const ALL: [InstallerType; 5] = [
        InstallerType::LionMountainLion,
        InstallerType::MavericksElCapitan,
        InstallerType::SierraCatalina,
        InstallerType::BigSurAndLater,
        InstallerType::Unknown,
    ];

    const fn capability(self) -> Capability {
        match self {
            InstallerType::LionMountainLion => Capability {
                label: "OS X Lion / Mountain Lion",
                requires_privilege: false,
            },
            InstallerType::MavericksElCapitan => Capability {
                label: "OS X Mavericks - El Capitan",
                requires_privilege: false,
            },
            InstallerType::SierraCatalina => Capability {
                label: "macOS Sierra - Catalina",
                requires_privilege: true,
            },
            InstallerType::BigSurAndLater => Capability {
                label: "macOS Big Sur and later",
                requires_privilege: true,
            },
            // Dependent operations are refused before privilege matters.
            InstallerType::Unknown => Capability {
                label: "unknown",
                requires_privilege: false,
            },
        }
    }

    /// Whether building from this generation must run as root.
    pub const fn requires_privilege(self) -> bool {
        self.capability().requires_privilege
    }

    /// Human readable generation range.
    pub const fn label(self) -> &'static str {
        self.capability().label
    }

    /// `false` only for [`InstallerType::Unknown`].
    pub const fn is_known(self) -> bool {
        !matches!(self, InstallerType::Unknown)
    }
}

impl fmt::Display for InstallerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn privilege_table() {
        assert!(!InstallerType::LionMountainLion.requires_privilege());
        assert!(!InstallerType::MavericksElCapitan.requires_privilege());
        assert!(InstallerType::SierraCatalina.requires_privilege());
        assert!(InstallerType::BigSurAndLater.requires_privilege());
    }

    #[test]
    fn only_unknown_is_unknown() {
        let unknown: Vec<_> = InstallerType::ALL
            .iter()
            .filter(|t| !t.is_known())
            .collect();
        assert_eq!(unknown, vec![&InstallerType::Unknown]);
    }

    #[test]
    fn serialises_as_variant_name() {
        let json = serde_json::to_string(&InstallerType::SierraCatalina).unwrap();
        assert_eq!(json, "\"SierraCatalina\"");
    }
}
