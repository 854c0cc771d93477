//! Line-based prompts for the destructive write flow.

use anyhow::{Context, Result};
use bootmac_core::safety::{RejectionReason, ValidatedDisk};
use bootmac_core::write::{WritePrompter, CONFIRMATION_LITERAL};
use std::io::{BufRead, Write};
use std::path::Path;

/// One line from `reader` with only the line terminator removed.
///
/// `None` at end of input. Surrounding spaces are kept so that `" YES"` is not
/// mistaken for the confirmation literal.
pub fn read_answer<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .context("Failed to read input")?;
    if read == 0 {
        return Ok(None);
    }
    let answer = line
        .strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line.as_str());
    Ok(Some(answer.to_string()))
}

/// [`WritePrompter`] over any reader / writer pair (stdin / stdout in the binary).
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
    inventory_shown: bool,
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            inventory_shown: false,
        }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> WritePrompter for TerminalPrompter<R, W> {
    fn disk_identifier(
        &mut self,
        inventory: &str,
        rejected: Option<&RejectionReason>,
    ) -> Result<Option<String>> {
        if !self.inventory_shown {
            if !inventory.trim().is_empty() {
                writeln!(self.output, "{}", inventory.trim_end())?;
                writeln!(self.output)?;
            }
            self.inventory_shown = true;
        }
        if let Some(reason) = rejected {
            writeln!(self.output, "❌ {}", reason)?;
        }
        write!(
            self.output,
            "Enter the disk to write to (e.g. disk4), or press Enter to cancel: "
        )?;
        self.output.flush()?;

        Ok(read_answer(&mut self.input)?.filter(|answer| !answer.is_empty()))
    }

    fn confirmation(&mut self, source: &Path, target: &ValidatedDisk) -> Result<String> {
        let descriptor = target.descriptor();
        writeln!(self.output)?;
        writeln!(
            self.output,
            "⚠️  ALL DATA on {} will be destroyed.",
            target.block_node()
        )?;
        writeln!(self.output, "   Source: {}", source.display())?;
        writeln!(
            self.output,
            "   Target: {} ({:?}, {:?}, removable: {})",
            target.raw_node(),
            descriptor.attachment,
            descriptor.transport,
            descriptor.removable
        )?;
        write!(self.output, "Type {} to continue: ", CONFIRMATION_LITERAL)?;
        self.output.flush()?;

        Ok(read_answer(&mut self.input)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn strips_only_line_terminator() {
        let mut input = Cursor::new(" YES \r\nYES\nlast");
        assert_eq!(read_answer(&mut input).unwrap().as_deref(), Some(" YES "));
        assert_eq!(read_answer(&mut input).unwrap().as_deref(), Some("YES"));
        assert_eq!(read_answer(&mut input).unwrap().as_deref(), Some("last"));
        assert_eq!(read_answer(&mut input).unwrap(), None);
    }
}
