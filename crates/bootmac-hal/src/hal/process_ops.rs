//! Process execution helpers.
//!
//! External commands are considered "world-touching" and must go through the HAL so we can
//! test workflows without spawning real processes.

use crate::HalResult;
use std::process::{ExitStatus, Output};
use std::time::Duration;

/// Process execution trait (external command runner).
pub trait ProcessOps {
    /// Run `program` to completion with stdin closed, capturing stdout and stderr.
    ///
    /// `timeout: None` blocks until the program exits.
    fn command_output(
        &self,
        program: &str,
        args: &[&str],
        timeout: Option<Duration>,
    ) -> HalResult<Output>;

    /// Run `program` with the operator's terminal attached (inherited stdio).
    ///
    /// Never times out. A non-zero exit is returned as a status, not an error.
    fn command_interactive(&self, program: &str, args: &[&str]) -> HalResult<ExitStatus>;
}

/// Stdout followed by stderr, lossily decoded and trimmed.
pub fn combined_output(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let mut text = stdout.trim_end().to_string();
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(stderr);
    }
    text.trim().to_string()
}
