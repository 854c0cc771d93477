//! CLI argument parsing for bootmac
//!
//! Every subcommand is one-shot; configuration from `--config` is overridden by
//! whatever is given on the command line.

use crate::config::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bootmac")]
#[command(version)]
#[command(about = "🍎 bootmac - turn a macOS installer into a bootable ISO or USB stick")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose logging (also logs `diskutil unmountDisk` output)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 🔎 Classify an installer application bundle
    Classify {
        /// Path to the installer, e.g. "/Applications/Install macOS Sonoma.app"
        bundle: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// 📂 List installer applications in a directory
    Discover {
        /// Directory to scan (defaults to /Applications)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// 💽 Show attached disks (`diskutil list`)
    Disks,

    /// 📀 Build an ISO image with the external build tool
    Build {
        /// Installer application bundle
        #[arg(long)]
        installer: Option<PathBuf>,

        /// Existing directory to write the ISO into
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Rename the finished image (".iso" is appended when missing)
        #[arg(long)]
        iso_name: Option<String>,

        /// Ask the build tool to patch Sierra installers
        #[arg(long)]
        patch_sierra: bool,

        /// Ask the build tool to replace code signatures
        #[arg(long)]
        replace_code_signatures: bool,

        /// Build tool executable
        #[arg(long)]
        build_tool: Option<PathBuf>,
    },

    /// 💾 Write an image to an external disk (destroys its contents)
    Write {
        /// Image file to write
        #[arg(long)]
        image: PathBuf,

        /// Whole-disk identifier, e.g. disk4 (prompted for when omitted)
        #[arg(long)]
        disk: Option<String>,
    },

    /// 🧪 Check required tools and privileges
    Preflight,
}

impl Cli {
    /// Fold command-line values over `cfg`; flags only ever switch options on.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if self.debug {
            cfg.debug = true;
        }
        match &self.command {
            Command::Discover { dir: Some(dir) } => cfg.installers_dir = dir.clone(),
            Command::Build {
                installer,
                output_dir,
                iso_name,
                patch_sierra,
                replace_code_signatures,
                build_tool,
            } => {
                if let Some(installer) = installer {
                    cfg.installer = Some(installer.clone());
                }
                if let Some(output_dir) = output_dir {
                    cfg.output_dir = Some(output_dir.clone());
                }
                if let Some(iso_name) = iso_name {
                    cfg.iso_name = Some(iso_name.clone());
                }
                if let Some(build_tool) = build_tool {
                    cfg.build_tool = build_tool.clone();
                }
                cfg.patch_sierra |= *patch_sierra;
                cfg.replace_code_signatures |= *replace_code_signatures;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_build() {
        let cli = Cli::try_parse_from([
            "bootmac",
            "--debug",
            "build",
            "--installer",
            "/Applications/Install macOS Sierra.app",
            "--output-dir",
            "/tmp",
            "--patch-sierra",
        ])
        .unwrap();
        assert!(cli.debug);

        let mut cfg = Config::default();
        cli.apply_overrides(&mut cfg);
        assert!(cfg.debug);
        assert!(cfg.patch_sierra);
        assert!(!cfg.replace_code_signatures);
        assert_eq!(
            cfg.installer,
            Some(PathBuf::from("/Applications/Install macOS Sierra.app"))
        );
        assert_eq!(cfg.output_dir, Some(PathBuf::from("/tmp")));
        assert_eq!(cfg.build_tool, PathBuf::from("macos-iso-builder"));
    }

    #[test]
    fn cli_keeps_config_values_it_does_not_mention() {
        let cli = Cli::try_parse_from(["bootmac", "build", "--iso-name", "sonoma"]).unwrap();
        let mut cfg = Config {
            installer: Some(PathBuf::from("/Applications/Install macOS Sonoma.app")),
            replace_code_signatures: true,
            ..Config::default()
        };
        cli.apply_overrides(&mut cfg);
        assert_eq!(cfg.iso_name.as_deref(), Some("sonoma"));
        assert!(cfg.replace_code_signatures);
        assert!(cfg.installer.is_some());
    }

    #[test]
    fn parses_write_and_classify() {
        let cli = Cli::try_parse_from(["bootmac", "write", "--image", "a.iso", "--disk", "disk4"])
            .unwrap();
        assert_eq!(
            cli.command,
            Command::Write {
                image: PathBuf::from("a.iso"),
                disk: Some("disk4".to_string()),
            }
        );

        let cli = Cli::try_parse_from(["bootmac", "classify", "X.app", "--json"]).unwrap();
        assert!(matches!(cli.command, Command::Classify { json: true, .. }));
    }

    #[test]
    fn discover_dir_override() {
        let cli = Cli::try_parse_from(["bootmac", "discover", "--dir", "/Volumes/Stash"]).unwrap();
        let mut cfg = Config::default();
        cli.apply_overrides(&mut cfg);
        assert_eq!(cfg.installers_dir, PathBuf::from("/Volumes/Stash"));
    }

    #[test]
    fn debug_help_describes_what_it_changes() {
        use clap::CommandFactory;
        let cmd = Cli::command();
        let help = cmd
            .get_arguments()
            .find(|arg| arg.get_id() == "debug")
            .and_then(|arg| arg.get_help())
            .map(|help| help.to_string())
            .unwrap();
        assert!(help.contains("unmountDisk"));
        assert!(!help.contains("dd"));
    }

    #[test]
    fn write_requires_image() {
        assert!(Cli::try_parse_from(["bootmac", "write"]).is_err());
    }
}
