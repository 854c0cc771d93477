//! Session configuration.
//!
//! Built once per invocation (TOML file, then CLI overrides) and passed by reference.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_BUILD_TOOL: &str = "macos-iso-builder";
pub const DEFAULT_INSTALLERS_DIR: &str = "/Applications";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Installer application bundle (`/Applications/Install macOS Sonoma.app`).
    pub installer: Option<PathBuf>,
    /// Directory the build tool writes the ISO into.
    pub output_dir: Option<PathBuf>,
    /// Final ISO file name; the build tool's default name is kept when unset.
    pub iso_name: Option<String>,
    pub patch_sierra: bool,
    pub replace_code_signatures: bool,
    /// External ISO build tool (looked up on PATH unless absolute).
    pub build_tool: PathBuf,
    /// Where `discover` looks for installers.
    pub installers_dir: PathBuf,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            installer: None,
            output_dir: None,
            iso_name: None,
            patch_sierra: false,
            replace_code_signatures: false,
            build_tool: PathBuf::from(DEFAULT_BUILD_TOOL),
            installers_dir: PathBuf::from(DEFAULT_INSTALLERS_DIR),
            debug: false,
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("failed to parse bootmac config TOML")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Unable to read config {}", path.display()))?;
        Self::from_toml_str(&text)
    }

    /// `path` when given, otherwise defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
