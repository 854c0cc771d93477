//! Fake HAL implementation for testing.
//!
//! This implementation records all operations without executing them,
//! allowing for CI-safe testing without root privileges or real disks.
//! Responses are scripted per program + argument prefix; anything unscripted
//! exits 0 with empty output.

use super::{PrivilegeOps, ProcessOps};
use crate::{HalError, HalResult};
use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Output};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Operation records for testing and verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Command {
        program: String,
        args: Vec<String>,
        interactive: bool,
        timeout_secs: Option<u64>,
    },
}

impl Operation {
    pub fn program(&self) -> &str {
        match self {
            Operation::Command { program, .. } => program,
        }
    }

    pub fn args(&self) -> &[String] {
        match self {
            Operation::Command { args, .. } => args,
        }
    }
}

/// Scripted result for a faked process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeResponse {
    Exit {
        code: i32,
        stdout: String,
        stderr: String,
    },
    /// Behave as if the program is not installed.
    NotFound,
}

impl FakeResponse {
    pub fn success(stdout: impl Into<String>) -> Self {
        FakeResponse::Exit {
            code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        FakeResponse::Exit {
            code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

#[derive(Debug, Clone)]
struct Rule {
    program: String,
    args_prefix: Vec<String>,
    response: FakeResponse,
}

impl Rule {
    fn matches(&self, program: &str, args: &[&str]) -> bool {
        self.program == program
            && self.args_prefix.len() <= args.len()
            && self
                .args_prefix
                .iter()
                .zip(args.iter())
                .all(|(want, got)| want == got)
    }
}

/// Shared state for FakeHal operations.
#[derive(Debug, Clone, Default)]
struct FakeHalState {
    /// All operations that were recorded
    operations: Vec<Operation>,
    /// Scripted responses; the most recently added matching rule wins
    rules: Vec<Rule>,
    elevated: bool,
}

/// Fake HAL implementation that records operations without executing them.
///
/// This is designed for testing and CI environments where real system
/// operations would fail or be dangerous.
#[derive(Debug, Clone, Default)]
pub struct FakeHal {
    state: Arc<Mutex<FakeHalState>>,
}

impl FakeHal {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeHalState::default())),
        }
    }

    /// A fake that reports an elevated (root) process.
    pub fn elevated() -> Self {
        let hal = Self::new();
        hal.set_elevated(true);
        hal
    }

    pub fn set_elevated(&self, elevated: bool) {
        self.state.lock().unwrap().elevated = elevated;
    }

    /// Script the response for `program` when its arguments start with `args_prefix`.
    pub fn respond(&self, program: &str, args_prefix: &[&str], response: FakeResponse) {
        self.state.lock().unwrap().rules.push(Rule {
            program: program.to_string(),
            args_prefix: args_prefix.iter().map(|s| s.to_string()).collect(),
            response,
        });
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<Operation> {
        self.state.lock().unwrap().operations.clone()
    }

    /// Get the number of operations recorded.
    pub fn operation_count(&self) -> usize {
        self.state.lock().unwrap().operations.len()
    }

    /// Check if a specific operation was recorded.
    pub fn has_operation(&self, check: impl Fn(&Operation) -> bool) -> bool {
        self.state.lock().unwrap().operations.iter().any(check)
    }

    /// Number of recorded invocations of `program` whose first argument is `first_arg`
    /// (or any invocation of `program` when `first_arg` is `None`).
    pub fn count_commands(&self, program: &str, first_arg: Option<&str>) -> usize {
        self.state
            .lock()
            .unwrap()
            .operations
            .iter()
            .filter(|op| op.program() == program)
            .filter(|op| match first_arg {
                Some(arg) => op.args().first().map(String::as_str) == Some(arg),
                None => true,
            })
            .count()
    }

    /// Clear all recorded operations (scripted responses are kept).
    pub fn clear(&self) {
        self.state.lock().unwrap().operations.clear();
    }

    fn record_operation(&self, op: Operation) {
        self.state.lock().unwrap().operations.push(op);
    }

    fn lookup(&self, program: &str, args: &[&str]) -> FakeResponse {
        self.state
            .lock()
            .unwrap()
            .rules
            .iter()
            .rev()
            .find(|rule| rule.matches(program, args))
            .map(|rule| rule.response.clone())
            .unwrap_or_else(|| FakeResponse::success(""))
    }
}

fn exit_status(code: i32) -> ExitStatus {
    // Wait status layout: exit code lives in bits 8..16.
    ExitStatus::from_raw((code & 0xff) << 8)
}

impl ProcessOps for FakeHal {
    fn command_output(
        &self,
        program: &str,
        args: &[&str],
        timeout: Option<Duration>,
    ) -> HalResult<Output> {
        self.record_operation(Operation::Command {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            interactive: false,
            timeout_secs: timeout.map(|t| t.as_secs()),
        });
        log::info!("FAKE HAL: {} {}", program, args.join(" "));

        match self.lookup(program, args) {
            FakeResponse::Exit {
                code,
                stdout,
                stderr,
            } => Ok(Output {
                status: exit_status(code),
                stdout: stdout.into_bytes(),
                stderr: stderr.into_bytes(),
            }),
            FakeResponse::NotFound => Err(HalError::CommandNotFound(program.to_string())),
        }
    }

    fn command_interactive(&self, program: &str, args: &[&str]) -> HalResult<ExitStatus> {
        self.record_operation(Operation::Command {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            interactive: true,
            timeout_secs: None,
        });
        log::info!("FAKE HAL (interactive): {} {}", program, args.join(" "));

        match self.lookup(program, args) {
            FakeResponse::Exit { code, .. } => Ok(exit_status(code)),
            FakeResponse::NotFound => Err(HalError::CommandNotFound(program.to_string())),
        }
    }
}

impl PrivilegeOps for FakeHal {
    fn is_elevated(&self) -> bool {
        self.state.lock().unwrap().elevated
    }
}
