use super::InstallerType;
use std::path::Path;

/// Present in every installer since Lion.
pub const SHARED_SUPPORT_DIR: &str = "Contents/SharedSupport";
/// Helper that writes install media; absent in Lion / Mountain Lion.
pub const HELPER_TOOL: &str = "Contents/Resources/createinstallmedia";
/// Per-version descriptor shipped by Sierra through Catalina.
pub const INSTALL_INFO: &str = "Contents/SharedSupport/InstallInfo.plist";
/// Packed shared-support image shipped since Big Sur.
pub const SHARED_SUPPORT_IMAGE: &str = "Contents/SharedSupport/SharedSupport.dmg";

/// Which of the four layout markers exist under a bundle root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InstallerMarkers {
    pub shared_support: bool,
    pub helper_tool: bool,
    pub install_info: bool,
    pub shared_support_image: bool,
}

impl InstallerMarkers {
    /// Read-only existence checks. Unreadable paths count as absent.
    pub fn scan(bundle: &Path) -> Self {
        Self {
            shared_support: bundle.join(SHARED_SUPPORT_DIR).is_dir(),
            helper_tool: bundle.join(HELPER_TOOL).exists(),
            install_info: bundle.join(INSTALL_INFO).exists(),
            shared_support_image: bundle.join(SHARED_SUPPORT_IMAGE).exists(),
        }
    }

    /// Ordered, short-circuiting decision over the markers.
    ///
    /// InstallInfo.plist wins over SharedSupport.dmg when both are present.
    pub fn installer_type(&self) -> InstallerType {
        if !self.shared_support {
            return InstallerType::Unknown;
        }
        if !self.helper_tool {
            return InstallerType::LionMountainLion;
        }
        if self.install_info {
            InstallerType::SierraCatalina
        } else if self.shared_support_image {
            InstallerType::BigSurAndLater
        } else {
            InstallerType::MavericksElCapitan
        }
    }
}

/// Classify an installer bundle by its on-disk layout. Never fails.
pub fn classify(bundle: &Path) -> InstallerType {
    let markers = InstallerMarkers::scan(bundle);
    let installer_type = markers.installer_type();
    log::debug!(
        "classify {}: {:?} -> {:?}",
        bundle.display(),
        markers,
        installer_type
    );
    installer_type
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn bundle_with(markers: &[&str]) -> tempfile::TempDir {
        let tmp = tempdir().unwrap();
        for marker in markers {
            let path = tmp.path().join(marker);
            if *marker == SHARED_SUPPORT_DIR {
                fs::create_dir_all(&path).unwrap();
            } else {
                fs::create_dir_all(path.parent().unwrap()).unwrap();
                fs::write(&path, b"").unwrap();
            }
        }
        tmp
    }

    #[test]
    fn lion_has_no_helper_tool() {
        let bundle = bundle_with(&[SHARED_SUPPORT_DIR]);
        assert_eq!(classify(bundle.path()), InstallerType::LionMountainLion);
    }

    #[test]
    fn mavericks_has_helper_only() {
        let bundle = bundle_with(&[SHARED_SUPPORT_DIR, HELPER_TOOL]);
        assert_eq!(classify(bundle.path()), InstallerType::MavericksElCapitan);
    }

    #[test]
    fn sierra_has_install_info() {
        let bundle = bundle_with(&[SHARED_SUPPORT_DIR, HELPER_TOOL, INSTALL_INFO]);
        assert_eq!(classify(bundle.path()), InstallerType::SierraCatalina);
    }

    #[test]
    fn big_sur_has_shared_support_image() {
        let bundle = bundle_with(&[SHARED_SUPPORT_DIR, HELPER_TOOL, SHARED_SUPPORT_IMAGE]);
        assert_eq!(classify(bundle.path()), InstallerType::BigSurAndLater);
    }

    #[test]
    fn install_info_wins_over_image() {
        let bundle = bundle_with(&[
            SHARED_SUPPORT_DIR,
            HELPER_TOOL,
            INSTALL_INFO,
            SHARED_SUPPORT_IMAGE,
        ]);
        assert_eq!(classify(bundle.path()), InstallerType::SierraCatalina);
    }

    #[test]
    fn missing_shared_support_is_unknown_regardless_of_markers() {
        let bundle = bundle_with(&[HELPER_TOOL]);
        assert_eq!(classify(bundle.path()), InstallerType::Unknown);

        let markers = InstallerMarkers {
            shared_support: false,
            helper_tool: true,
            install_info: true,
            shared_support_image: true,
        };
        assert_eq!(markers.installer_type(), InstallerType::Unknown);
    }

    #[test]
    fn shared_support_file_is_not_a_directory() {
        let tmp = tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("Contents")).unwrap();
        fs::write(tmp.path().join(SHARED_SUPPORT_DIR), b"").unwrap();
        assert_eq!(classify(tmp.path()), InstallerType::Unknown);
    }

    #[test]
    fn nonexistent_bundle_is_unknown() {
        assert_eq!(
            classify(Path::new("/nonexistent/Install macOS Nothing.app")),
            InstallerType::Unknown
        );
    }

    #[test]
    fn every_marker_combination_is_classified() {
        for bits in 0u8..16 {
            let markers = InstallerMarkers {
                shared_support: bits & 1 != 0,
                helper_tool: bits & 2 != 0,
                install_info: bits & 4 != 0,
                shared_support_image: bits & 8 != 0,
            };
            let result = markers.installer_type();
            if !markers.shared_support {
                assert_eq!(result, InstallerType::Unknown);
            } else {
                assert!(result.is_known());
            }
        }
    }
}
