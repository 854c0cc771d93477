//! Terminal helpers for the CLI flows.

use std::io::IsTerminal;

pub mod confirm;
pub mod validation;

pub fn ensure_interactive_terminal() -> anyhow::Result<()> {
    if std::io::stdin().is_terminal() {
        return Ok(());
    }

    anyhow::bail!(
        "No TTY detected. Writing a disk asks for confirmation on the terminal.\n\
         Run bootmac directly in a terminal (not piped or via script).\n\
         If using sudo, try: sudo -E bootmac write ..."
    );
}
