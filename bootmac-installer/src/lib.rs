use anyhow::Result;
use bootmac_core::cli::{Cli, Command};
use bootmac_core::config::Config;
use bootmac_core::installer::InstallerReport;
use bootmac_core::{bridge, installer, logging, preflight, safety, write};
use bootmac_hal::{MacosHal, SystemHal};
use clap::Parser;
use std::io::{self, BufRead, Write};

pub mod ui;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut cfg = Config::load_or_default(cli.config.as_deref())?;
    cli.apply_overrides(&mut cfg);
    logging::init_with(cli.log_file.clone(), cfg.debug);

    if matches!(cli.command, Command::Write { .. }) {
        ui::ensure_interactive_terminal()?;
    }

    let hal = MacosHal::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    dispatch(&hal, &cli.command, &cfg, stdin.lock(), stdout.lock())
}

/// Run one subcommand. Prompts read from `input`; results go to `out`.
pub fn dispatch<H, R, W>(hal: &H, command: &Command, cfg: &Config, input: R, mut out: W) -> Result<()>
where
    H: SystemHal + ?Sized,
    R: BufRead,
    W: Write,
{
    match command {
        Command::Classify { bundle, json } => {
            let report = installer::inspect(hal, bundle);
            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            } else {
                print_report(&mut out, &report)?;
            }
        }
        Command::Discover { .. } => {
            log::info!("📂 Scanning {}", cfg.installers_dir.display());
            let found = installer::discover(&cfg.installers_dir);
            if found.is_empty() {
                writeln!(
                    out,
                    "No installer applications found in {}",
                    cfg.installers_dir.display()
                )?;
            }
            for bundle in found {
                let report = installer::inspect(hal, &bundle);
                writeln!(
                    out,
                    "{:<24} {}",
                    report.installer_type.label(),
                    bundle.display()
                )?;
            }
        }
        Command::Disks => {
            let listing = safety::list_disks(hal)?;
            write!(out, "{}", listing)?;
        }
        Command::Build { .. } => {
            log::info!("📀 Building ISO image...");
            let request = bridge::BuildRequest::from_config(cfg)?;
            ui::validation::validate_installer_path(&request.installer)
                .map_err(anyhow::Error::msg)?;
            ui::validation::validate_output_dir(&request.output_dir)
                .map_err(anyhow::Error::msg)?;

            let outcome = bridge::build(hal, &request)?;
            match outcome.artifact {
                Some(path) => writeln!(out, "📀 {}", path.display())?,
                None => writeln!(
                    out,
                    "✅ Build finished; output left in {}",
                    request.output_dir.display()
                )?,
            }
        }
        Command::Write { image, disk } => {
            log::info!("💾 Running write in CLI mode...");
            ui::validation::validate_image_path(image).map_err(anyhow::Error::msg)?;
            let request = write::WriteRequest {
                image: image.clone(),
                disk: disk.clone(),
                debug: cfg.debug,
            };

            let outcome = {
                let mut prompter = ui::confirm::TerminalPrompter::new(input, &mut out);
                write::run_with_hal(hal, &request, &mut prompter)?
            };
            writeln!(out, "✅ Image written to {}", outcome.identifier)?;
            if let Some(warning) = outcome.eject_warning {
                writeln!(out, "⚠️  Eject failed, remove the disk manually: {}", warning)?;
            }
        }
        Command::Preflight => {
            let report = preflight::run_with(hal, &preflight::PreflightConfig::from_config(cfg))?;
            for (bin, path) in &report.found {
                writeln!(out, "✅ {:<28} {}", bin, path.display())?;
            }
            writeln!(
                out,
                "{} root privileges: {}",
                if report.elevated { "🔑" } else { "⚠️ " },
                if report.elevated { "yes" } else { "no" }
            )?;
        }
    }
    Ok(())
}

fn print_report<W: Write>(out: &mut W, report: &InstallerReport) -> io::Result<()> {
    writeln!(out, "{}", report.path.display())?;
    writeln!(out, "  type:          {}", report.installer_type)?;
    if let Some(name) = &report.display_name {
        let note = if report.known_name { "" } else { " (unrecognised name)" };
        writeln!(out, "  name:          {}{}", name, note)?;
    }
    writeln!(
        out,
        "  root required: {}",
        if report.requires_privilege { "yes" } else { "no" }
    )
}
