use super::{classify, InstallerType};
use bootmac_hal::{PlistOps, SystemHal};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Display names of official installer applications, oldest first.
pub const KNOWN_INSTALLER_NAMES: &[&str] = &[
    "Install Mac OS X Lion",
    "Install OS X Mountain Lion",
    "Install OS X Mavericks",
    "Install OS X Yosemite",
    "Install OS X El Capitan",
    "Install macOS Sierra",
    "Install macOS High Sierra",
    "Install macOS Mojave",
    "Install macOS Catalina",
    "Install macOS Big Sur",
    "Install macOS Monterey",
    "Install macOS Ventura",
    "Install macOS Sonoma",
    "Install macOS Sequoia",
    "Install macOS Tahoe",
];

const DISPLAY_NAME_KEY: &str = "CFBundleDisplayName";

/// `CFBundleDisplayName` from `<bundle>/Contents/Info.plist`, if readable.
pub fn display_name<H: SystemHal + ?Sized>(hal: &H, bundle: &Path) -> Option<String> {
    let plist = bundle.join("Contents/Info.plist");
    match hal.plist_string(&plist, DISPLAY_NAME_KEY) {
        Ok(name) => name,
        Err(err) => {
            log::warn!("Could not read display name from {}: {}", plist.display(), err);
            None
        }
    }
}

/// Exact match against the allow-list; beta builds carry a " Beta" suffix.
pub fn is_known_installer_name(name: &str) -> bool {
    let name = name.strip_suffix(" Beta").unwrap_or(name);
    KNOWN_INSTALLER_NAMES.contains(&name)
}

/// Everything the CLI reports about one installer bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallerReport {
    pub path: PathBuf,
    pub installer_type: InstallerType,
    pub display_name: Option<String>,
    pub known_name: bool,
    pub requires_privilege: bool,
}

pub fn inspect<H: SystemHal + ?Sized>(hal: &H, bundle: &Path) -> InstallerReport {
    let installer_type = classify(bundle);
    let display_name = if installer_type.is_known() {
        display_name(hal, bundle)
    } else {
        None
    };
    let known_name = display_name
        .as_deref()
        .is_some_and(is_known_installer_name);

    InstallerReport {
        path: bundle.to_path_buf(),
        installer_type,
        display_name,
        known_name,
        requires_privilege: installer_type.requires_privilege(),
    }
}

/// `Install *.app` bundles directly under `dir`, sorted by path.
///
/// Candidates are returned unclassified; an unreadable `dir` yields an empty list.
pub fn discover(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            log::warn!("Cannot list {}: {}", dir.display(), err);
            return Vec::new();
        }
    };

    let mut found: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("Install ") && n.ends_with(".app"))
        })
        .collect();
    found.sort();
    found
}
