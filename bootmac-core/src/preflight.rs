use crate::config::Config;
use anyhow::{bail, Result};
use bootmac_hal::{SystemHal, DD, DISKUTIL, PLIST_BUDDY};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct PreflightConfig {
    pub required_binaries: Vec<String>,
    pub path_env: String,
}

impl PreflightConfig {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            required_binaries: vec![
                DISKUTIL.to_string(),
                DD.to_string(),
                PLIST_BUDDY.to_string(),
                cfg.build_tool.display().to_string(),
            ],
            ..Self::default()
        }
    }
}

impl Default for PreflightConfig {
    fn default() -> Self {
        let path_env = std::env::var("PATH").unwrap_or_default();
        Self {
            required_binaries: vec![
                DISKUTIL.to_string(),
                DD.to_string(),
                PLIST_BUDDY.to_string(),
            ],
            path_env,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreflightReport {
    pub found: Vec<(String, PathBuf)>,
    pub missing: Vec<String>,
    pub elevated: bool,
}

impl PreflightReport {
    pub fn is_ready(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Collect tool availability and privilege status without failing.
pub fn check<H: SystemHal + ?Sized>(hal: &H, cfg: &PreflightConfig) -> PreflightReport {
    let mut found = Vec::new();
    let mut missing = Vec::new();
    for bin in &cfg.required_binaries {
        match find_executable(bin, &cfg.path_env) {
            Some(path) => found.push((bin.clone(), path)),
            None => missing.push(bin.clone()),
        }
    }
    PreflightReport {
        found,
        missing,
        elevated: hal.is_elevated(),
    }
}

pub fn run_with<H: SystemHal + ?Sized>(hal: &H, cfg: &PreflightConfig) -> Result<PreflightReport> {
    log::info!("🧪 Preflight checks");

    let report = check(hal, cfg);
    for (bin, path) in &report.found {
        log::info!("  ✅ {} -> {}", bin, path.display());
    }
    if report.elevated {
        log::info!("  🔑 Running with root privileges");
    } else {
        log::warn!("  ⚠️  Not running as root: writing to disks and building from Sierra or later installers will be refused");
    }

    if !report.is_ready() {
        bail!("Missing required binaries on PATH: {}", report.missing.join(", "));
    }

    log::info!("✅ Preflight complete");
    Ok(report)
}

/// Absolute (or relative, slash-containing) paths are checked directly; bare
/// names are searched on `path_env`.
pub fn find_executable(binary: &str, path_env: &str) -> Option<PathBuf> {
    if binary.contains('/') {
        let candidate = PathBuf::from(binary);
        return is_executable(&candidate).then_some(candidate);
    }
    find_executable_in_path(binary, path_env)
}

fn find_executable_in_path(binary: &str, path_env: &str) -> Option<PathBuf> {
    path_env
        .split(':')
        .filter(|dir| !dir.is_empty())
        .map(|dir| Path::new(dir).join(binary))
        .find(|candidate| is_executable(candidate))
}

fn is_executable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|metadata| metadata.is_file() && metadata.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
