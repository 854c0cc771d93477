//! ISO build bridge.
//!
//! Image construction is delegated to an external build tool. This module only
//! checks preconditions, builds the argument list from validated configuration,
//! runs the tool with the operator's terminal attached and renames the artifact
//! on success.

use crate::config::Config;
use crate::errors::BootmacError;
use crate::installer::{classify, InstallerType};
use anyhow::{Context, Result};
use bootmac_hal::{ProcessOps, SystemHal};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Validated inputs for one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub installer: PathBuf,
    pub output_dir: PathBuf,
    pub iso_name: Option<String>,
    pub patch_sierra: bool,
    pub replace_code_signatures: bool,
    pub build_tool: PathBuf,
}

impl BuildRequest {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let installer = cfg
            .installer
            .clone()
            .context("Installer path is required (provide --installer or set `installer` in the config)")?;
        let output_dir = cfg
            .output_dir
            .clone()
            .context("Output directory is required (provide --output-dir or set `output_dir` in the config)")?;
        Ok(Self {
            installer,
            output_dir,
            iso_name: cfg.iso_name.clone(),
            patch_sierra: cfg.patch_sierra,
            replace_code_signatures: cfg.replace_code_signatures,
            build_tool: cfg.build_tool.clone(),
        })
    }

    /// `--isodirectory <dir> --applicationpath <bundle> --nointeraction [flags]`
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "--isodirectory".to_string(),
            self.output_dir.display().to_string(),
            "--applicationpath".to_string(),
            self.installer.display().to_string(),
            "--nointeraction".to_string(),
        ];
        if self.patch_sierra {
            args.push("--patchsierrainstaller".to_string());
        }
        if self.replace_code_signatures {
            args.push("--replacecodesignatures".to_string());
        }
        args
    }

    /// Where the build tool leaves the image: `<output_dir>/<bundle stem>.iso`.
    pub fn default_artifact(&self) -> PathBuf {
        let stem = self
            .installer
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "macOS".to_string());
        self.output_dir.join(format!("{}.iso", stem))
    }

    /// Requested artifact path, with `.iso` appended when missing.
    pub fn renamed_artifact(&self) -> Option<PathBuf> {
        let name = self.iso_name.as_deref()?.trim();
        let file_name = Path::new(name).file_name()?.to_string_lossy().to_string();
        let file_name = if file_name.to_ascii_lowercase().ends_with(".iso") {
            file_name
        } else {
            format!("{}.iso", file_name)
        };
        Some(self.output_dir.join(file_name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    pub installer_type: InstallerType,
    /// Final image path, when the build tool left one where expected.
    pub artifact: Option<PathBuf>,
}

/// Check preconditions, then run the build tool.
///
/// Every refusal happens before any process is started.
pub fn build<H: SystemHal + ?Sized>(
    hal: &H,
    request: &BuildRequest,
) -> std::result::Result<BuildOutcome, BootmacError> {
    let installer_type = classify(&request.installer);
    if !installer_type.is_known() {
        return Err(BootmacError::InvalidInstaller(request.installer.clone()));
    }
    info!(
        "📦 {} ({})",
        request.installer.display(),
        installer_type.label()
    );

    if installer_type.requires_privilege() && !hal.is_elevated() {
        return Err(BootmacError::PrivilegeRequired(format!(
            "Building from a {} installer",
            installer_type.label()
        )));
    }

    if !request.output_dir.is_dir() {
        return Err(BootmacError::OutputDirMissing(request.output_dir.clone()));
    }

    let program = request.build_tool.display().to_string();
    let args = request.args();
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    info!("🛠️  Running {} {}", program, args.join(" "));

    let status = hal.command_interactive(&program, &arg_refs)?;
    if !status.success() {
        return Err(BootmacError::BuildFailed {
            code: status.code(),
        });
    }
    info!("✅ Build tool finished");

    let artifact = finalise_artifact(request)?;
    Ok(BuildOutcome {
        installer_type,
        artifact,
    })
}

fn finalise_artifact(request: &BuildRequest) -> std::io::Result<Option<PathBuf>> {
    let produced = request.default_artifact();
    if !produced.is_file() {
        warn!(
            "⚠️  Expected image not found at {}; leaving output as-is",
            produced.display()
        );
        return Ok(None);
    }

    match request.renamed_artifact() {
        Some(target) if target != produced => {
            if target.exists() {
                warn!("⚠️  Replacing existing {}", target.display());
            }
            fs::rename(&produced, &target)?;
            info!("📀 {} -> {}", produced.display(), target.display());
            Ok(Some(target))
        }
        _ => {
            info!("📀 Image: {}", produced.display());
            Ok(Some(produced))
        }
    }
}
